use std::fmt::Write as _;

use serde_json::json;

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{optional_str, required_str};

struct TermEntry {
    full_name: &'static str,
    description: &'static str,
    related_terms: &'static [&'static str],
    practical_tips: &'static str,
    advanced: Option<&'static str>,
    mature: Option<&'static str>,
}

const TERMS: &[(&str, TermEntry)] = &[
    (
        "PODE",
        TermEntry {
            full_name: "Poly on Diffusion Edge",
            description: "Transistor structure in which polysilicon overlaps the edge of the \
                          diffusion region. Poly-to-diffusion alignment is critical and the \
                          structure is sensitive to lithography variation.",
            related_terms: &["CPODE", "Poly Cut", "Continuous Poly"],
            practical_tips: "Helps drive strength on high-performance processes, but gate to \
                             source/drain overlap and CD variation must be checked strictly in DRC.",
            advanced: Some("Mandatory consideration on FinFET/CFET; heavy DRC and OPC constraints"),
            mature: Some("Rarely used on planar processes"),
        },
    ),
    (
        "CPODE",
        TermEntry {
            full_name: "Continuous Poly on Diffusion Edge",
            description: "Continuous poly lines crossing the diffusion region. Used to keep CD \
                          uniform across multi-finger transistors.",
            related_terms: &["PODE", "Poly Cut"],
            practical_tips: "Combine with dummy poly to balance CD uniformity and stress.",
            advanced: Some("Review color constraints introduced by multi-patterning as well"),
            mature: Some("CMP and stress effects are comparatively small"),
        },
    ),
    (
        "Metal Fill",
        TermEntry {
            full_name: "Metal Dummy Fill",
            description: "Dummy metal shapes inserted for CMP planarity and uniform metal \
                          density. They do not carry IR/EM current but can add coupling and \
                          proximity effects.",
            related_terms: &["Density Rule", "CMP", "Dummy Pattern"],
            practical_tips: "Define keep-out around sensitive analog paths; tune fill spacing and \
                             layer choice next to clock and high-speed IO routes.",
            advanced: Some("Narrow density windows and many per-layer fill shape constraints"),
            mature: Some("Density limits are looser but still a mandatory check"),
        },
    ),
    (
        "Antenna Rule",
        TermEntry {
            full_name: "Plasma Induced Gate Damage Rule",
            description: "Rule preventing long metal lines from accumulating charge during \
                          plasma etch and damaging the gate oxide they connect to.",
            related_terms: &["Antenna Diode", "Metal Jump", "Partial Ratio"],
            practical_tips: "Jump to an upper layer before reaching the gate, or insert an \
                             antenna diode to bring the area ratio under the limit.",
            advanced: Some("Thin high-k/metal gate oxide makes the rule stricter"),
            mature: Some("Rule is looser, but watch long-distance routes"),
        },
    ),
    (
        "Dummy Gate",
        TermEntry {
            full_name: "Dummy Poly/Gate",
            description: "Dummy gates placed at both ends of active transistors to improve \
                          patterning and stress uniformity.",
            related_terms: &["OD Dummy", "Dummy Active", "OPC"],
            practical_tips: "Place symmetrically for analog matching and confirm DRC recognizes \
                             the dummies.",
            advanced: None,
            mature: None,
        },
    ),
];

fn lookup(term: &str) -> Option<&'static TermEntry> {
    let upper = term.to_uppercase();
    TERMS
        .iter()
        .find(|(key, _)| *key == term)
        .or_else(|| TERMS.iter().find(|(key, _)| *key == upper))
        .map(|(_, entry)| entry)
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "explain_foundry_term",
        "Explain semiconductor foundry and PDK terminology with practical tips. \
         Returns Markdown.",
        json!({
            "type": "object",
            "properties": {
                "term": {"type": "string", "description": "Term to explain"},
                "foundry": {
                    "type": "string",
                    "description": "Foundry name (e.g. TSMC/Samsung/general)",
                    "default": "general"
                },
                "context": {
                    "type": "string",
                    "description": "Additional context",
                    "default": ""
                }
            },
            "required": ["term"]
        }),
    )
}

/// Explain a foundry term.
///
/// # Errors
///
/// Fails only when an argument is not a string.
pub fn explain_foundry_term(args: &Arguments) -> Result<String, ToolError> {
    let term = required_str(args, "term")?.trim();
    let foundry = optional_str(args, "foundry", "general")?;
    let context = optional_str(args, "context", "")?;

    if term.is_empty() {
        return Ok("Input error: term must not be empty.".to_string());
    }

    let Some(entry) = lookup(term) else {
        return Ok(format!(
            "Term not registered yet: `{term}`.\n\
             - Re-enter the term if a general explanation from public information is enough.\n\
             - Foundry-specific rules may be under NDA; please confirm with your FAE."
        ));
    };

    let mut body = format_entry(term, entry, foundry);
    if !context.is_empty() {
        let _ = write!(body, "\n- Given context: {}", context.trim());
    }
    Ok(body)
}

fn format_entry(term: &str, entry: &TermEntry, foundry: &str) -> String {
    let foundry = if foundry.is_empty() { "general" } else { foundry };
    let mut lines = vec![
        format!("### {} ({term})", entry.full_name),
        format!("- Foundry context: {foundry}"),
        format!("- What it means: {}", entry.description),
        format!("- Practical tips: {}", entry.practical_tips),
    ];

    if entry.advanced.is_some() || entry.mature.is_some() {
        lines.push("- Process relevance:".to_string());
        if let Some(adv) = entry.advanced {
            lines.push(format!("  - Advanced: {adv}"));
        }
        if let Some(mat) = entry.mature {
            lines.push(format!("  - Mature: {mat}"));
        }
    }

    if !entry.related_terms.is_empty() {
        lines.push(format!("- Related terms: {}", entry.related_terms.join(", ")));
    }

    lines.join("\n")
}
