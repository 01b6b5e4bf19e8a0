use serde_json::json;

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{optional_str, required_str};

struct DocGuide {
    contents: &'static [&'static str],
    tips: &'static [&'static str],
}

const GUIDES: &[(&str, DocGuide)] = &[
    (
        "tech_file",
        DocGuide {
            contents: &[
                "Layer map / purpose",
                "DRC grid/unit",
                "Routing directions, width/space tables",
            ],
            tips: &[
                "Check techlef/lef/def compatibility",
                "Keep the router tech file consistent with the signoff deck",
            ],
        },
    ),
    (
        "drc_deck",
        DocGuide {
            contents: &[
                "Rule sections by layer",
                "Density/Antenna/DFM checks",
                "Recommended vs required rules",
            ],
            tips: &[
                "Version-control the signoff deck",
                "Check the waiver process and screenshot requirements",
            ],
        },
    ),
    (
        "lvs_deck",
        DocGuide {
            contents: &[
                "Device extraction rules",
                "Black-box/marker layers",
                "Parasitic options",
            ],
            tips: &[
                "Keep subckt names and pcell maps consistent",
                "Confirm guard ring and ESD devices are recognized",
            ],
        },
    ),
    (
        "spice_model",
        DocGuide {
            contents: &[
                "Corner models (tt/ss/ff...)",
                "Voltage/Temp ranges",
                "Noise/Monte Carlo options",
            ],
            tips: &[
                "Check the BSIM version and params",
                "Check simulator compatibility (HSPICE/Spectre)",
            ],
        },
    ),
    (
        "cell_library",
        DocGuide {
            contents: &["Liberty timing/power", "LEF abstracts", "AOCV/POCV tables"],
            tips: &[
                "Match Lib and LEF versions",
                "Validate the buffer/inverter set used by CTS",
            ],
        },
    ),
    (
        "io_library",
        DocGuide {
            contents: &["Pad cells, ESD clamps", "IBIS/AMI models", "ESD connection rules"],
            tips: &[
                "Use the reference pad ring examples",
                "Align the package pinmap with the supply split plan",
            ],
        },
    ),
    (
        "memory_compiler",
        DocGuide {
            contents: &["Generator options", "Timing/power models", "Repair/fuse flow"],
            tips: &[
                "Validate per-corner timing libraries",
                "Document the BIST/BISR procedure",
            ],
        },
    ),
    (
        "design_guide",
        DocGuide {
            contents: &[
                "Floorplan rules",
                "Clock/power methodology",
                "DFM recommendations",
            ],
            tips: &[
                "Read the latest errata/clarification section",
                "Reuse the reference flow scripts",
            ],
        },
    ),
];

const DOC_TYPES: &str =
    "tech_file/drc_deck/lvs_deck/spice_model/cell_library/io_library/memory_compiler/design_guide";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "pdk_document_guide",
        "Explain the structure, typical contents and usage tips of a PDK document type. \
         document_type: tech_file/drc_deck/lvs_deck/spice_model/cell_library/io_library/\
         memory_compiler/design_guide.",
        json!({
            "type": "object",
            "properties": {
                "document_type": {"type": "string", "description": "PDK document type"},
                "specific_topic": {
                    "type": "string",
                    "description": "Topic of particular interest",
                    "default": ""
                }
            },
            "required": ["document_type"]
        }),
    )
}

/// Describe a PDK document type.
///
/// # Errors
///
/// Fails only when an argument is not a string.
pub fn pdk_document_guide(args: &Arguments) -> Result<String, ToolError> {
    let document_type = required_str(args, "document_type")?;
    let specific_topic = optional_str(args, "specific_topic", "")?;

    let doc = document_type.trim().to_lowercase();
    if doc.is_empty() {
        return Ok("Input error: document_type is required.".to_string());
    }

    let Some((_, guide)) = GUIDES.iter().find(|(key, _)| *key == doc) else {
        return Ok(format!(
            "Unsupported document_type: `{document_type}`. Choose one of {DOC_TYPES}."
        ));
    };

    let mut lines = vec![format!("### PDK Document Guide: {document_type}")];
    lines.push("- Typical contents:".to_string());
    lines.extend(guide.contents.iter().take(8).map(|c| format!("  - {c}")));
    lines.push("- Usage tips:".to_string());
    lines.extend(guide.tips.iter().take(8).map(|t| format!("  - {t}")));
    if !specific_topic.is_empty() {
        lines.push(format!("- Specific topic: {specific_topic}"));
    }
    lines.push(
        "\n> NDA details are not included; check the foundry portal for the latest version."
            .to_string(),
    );
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(value: serde_json::Value) -> String {
        pdk_document_guide(value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn known_type() {
        let resp = call(json!({"document_type": "drc_deck"}));
        assert!(resp.starts_with("### PDK Document Guide: drc_deck"));
        assert!(resp.contains("Rule sections by layer"));
        assert!(!resp.contains("Specific topic"));
    }

    #[test]
    fn specific_topic_is_echoed() {
        let resp = call(json!({"document_type": "LVS_DECK", "specific_topic": "ESD"}));
        assert!(resp.contains("- Specific topic: ESD"));
    }

    #[test]
    fn invalid_type() {
        let resp = call(json!({"document_type": "invalid"}));
        assert!(resp.starts_with("Unsupported document_type"));
    }
}
