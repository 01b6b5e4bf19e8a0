use serde_json::json;

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{optional_str, required_str};

/// Public, generic rule tendencies for one category on one node.
struct RuleEntry {
    min_width: Option<&'static str>,
    min_spacing: Option<&'static str>,
    enclosure: Option<&'static str>,
    notes: &'static [&'static str],
    practical: &'static [&'static str],
}

type NodeRules = &'static [(&'static str, RuleEntry)];

const N5: NodeRules = &[
    (
        "metal",
        RuleEntry {
            min_width: Some("M1 around 18-20nm, multi-patterning based"),
            min_spacing: Some("Same-layer spacing in the 20nm range, shaped by coloring"),
            enclosure: None,
            notes: &[],
            practical: &[
                "Check router coloring settings to avoid SADP/SAQP color conflicts",
                "EM limits are low; widen and multiply upper-layer power straps",
            ],
        },
    ),
    (
        "via",
        RuleEntry {
            min_width: None,
            min_spacing: None,
            enclosure: Some("Self-aligned vias simplify enclosure, but cut counts are limited"),
            notes: &[],
            practical: &[
                "Use dual or arrayed vias on critical current paths",
                "Account for pitch mismatch between adjacent layers in router constraints",
            ],
        },
    ),
    (
        "antenna",
        RuleEntry {
            min_width: None,
            min_spacing: None,
            enclosure: None,
            notes: &["Thin gate oxide on high-k/metal gate makes the rules strict"],
            practical: &[
                "Jump to an upper layer before the gate connection to cut the partial ratio",
                "Check whether standard cells provide internal antenna diodes",
            ],
        },
    ),
    (
        "density",
        RuleEntry {
            min_width: None,
            min_spacing: None,
            enclosure: None,
            notes: &["Narrow per-layer density windows and many fill shape constraints"],
            practical: &[
                "Define fill keep-out over analog regions",
                "Adjust fill spacing near clock and IO to limit coupling",
            ],
        },
    ),
];

const N28: NodeRules = &[
    (
        "metal",
        RuleEntry {
            min_width: Some("M1 around 60-80nm (varies by foundry)"),
            min_spacing: Some("Typically 80-100nm"),
            enclosure: None,
            notes: &[],
            practical: &[
                "EM limits are relaxed, but keep power mesh width and overlap",
                "Metal density windows still apply; fill verification is mandatory",
            ],
        },
    ),
    (
        "poly",
        RuleEntry {
            min_width: None,
            min_spacing: Some("Poly pitch in the ~140-190nm range"),
            enclosure: None,
            notes: &[],
            practical: &["Insert dummy poly for CD uniformity when matching analog devices"],
        },
    ),
    (
        "antenna",
        RuleEntry {
            min_width: None,
            min_spacing: None,
            enclosure: None,
            notes: &[],
            practical: &[
                "Jump long global routes to upper layers to shrink the area ratio",
                "Use standard-cell antenna diodes where needed",
            ],
        },
    ),
];

const N65: NodeRules = &[(
    "general",
    RuleEntry {
        min_width: None,
        min_spacing: None,
        enclosure: None,
        notes: &["Mature node with relaxed rules, but density, latch-up and ESD still need care"],
        practical: &[
            "Follow the IO/ESD cell application notes",
            "Use the foundry reference flow for decap and IR-drop review",
        ],
    },
)];

const NODES: &[(&str, NodeRules)] = &[("5nm", N5), ("28nm", N28), ("65nm", N65)];

const CATEGORIES: &str = "metal/via/poly/well/antenna/density/esd/general";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "design_rule_qa",
        "Design rule Q&A by process node and category. process_node e.g. 5nm/28nm/65nm; \
         rule_category one of metal/via/poly/well/antenna/density/esd/general. Returns Markdown.",
        json!({
            "type": "object",
            "properties": {
                "process_node": {"type": "string", "description": "Process node, e.g. 5nm"},
                "rule_category": {"type": "string", "description": "Rule category, e.g. metal"},
                "question": {"type": "string", "description": "The design rule question"},
                "foundry": {"type": "string", "description": "Foundry name", "default": "general"}
            },
            "required": ["process_node", "rule_category", "question"]
        }),
    )
}

/// Answer a design rule question.
///
/// # Errors
///
/// Fails only when an argument is not a string.
pub fn design_rule_qa(args: &Arguments) -> Result<String, ToolError> {
    let process_node = required_str(args, "process_node")?;
    let rule_category = required_str(args, "rule_category")?;
    let question = required_str(args, "question")?;
    let foundry = optional_str(args, "foundry", "general")?;

    let node_key = process_node.trim().to_lowercase();
    let cat_key = rule_category.trim().to_lowercase();

    if node_key.is_empty() || cat_key.is_empty() || question.trim().is_empty() {
        return Ok(
            "Input error: process_node, rule_category and question are required.".to_string(),
        );
    }

    let Some((_, node)) = NODES.iter().find(|(key, _)| *key == node_key) else {
        return Ok(format!(
            "Unsupported process node: `{process_node}`.\n\
             - Only general answers from public information are available; \
             confirm unregistered nodes with your foundry FAE."
        ));
    };

    let Some((_, entry)) = node.iter().find(|(key, _)| *key == cat_key) else {
        return Ok(format!(
            "No `{rule_category}` category information for the `{process_node}` node.\n\
             - Use one of {CATEGORIES} as the category."
        ));
    };

    let foundry = if foundry.is_empty() { "general" } else { foundry };
    let body = format_rule(process_node, rule_category, entry);
    Ok(format!(
        "{body}\n- Foundry context: {foundry}\n- Question: {}\n\n\
         > For uncertain or NDA-covered values, please confirm with your foundry FAE.",
        question.trim()
    ))
}

fn format_rule(node: &str, category: &str, entry: &RuleEntry) -> String {
    let mut lines = vec![format!("### Design Rule: {node} / {category}")];
    if let Some(w) = entry.min_width {
        lines.push(format!("- Min width: {w}"));
    }
    if let Some(s) = entry.min_spacing {
        lines.push(format!("- Min spacing: {s}"));
    }
    if let Some(e) = entry.enclosure {
        lines.push(format!("- Enclosure: {e}"));
    }
    if !entry.notes.is_empty() {
        lines.push("- Notes:".to_string());
        lines.extend(entry.notes.iter().take(4).map(|n| format!("  - {n}")));
    }
    if !entry.practical.is_empty() {
        lines.push("- Practical tips:".to_string());
        lines.extend(entry.practical.iter().take(6).map(|t| format!("  - {t}")));
    }
    lines.join("\n")
}
