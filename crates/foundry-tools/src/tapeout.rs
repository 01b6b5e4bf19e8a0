use serde_json::json;

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{optional_str, required_str};

type Sections = &'static [(&'static str, &'static [&'static str])];

/// Category order used when `checklist_category` is `all`.
const ALL_CATEGORIES: &[&str] = &[
    "drc_lvs",
    "timing",
    "power",
    "signal_integrity",
    "documentation",
];

const DIGITAL: Sections = &[
    (
        "drc_lvs",
        &[
            "DRC clean against the signoff deck",
            "LVS clean with black-box cell mapping confirmed",
            "Antenna/EM/DFM extra checks complete",
        ],
    ),
    (
        "timing",
        &[
            "Setup/Hold margin met (all corners, OCV/AOCV/POCV)",
            "Clock tree skew/uncertainty updates applied",
            "Async crossing CDC report clean",
        ],
    ),
    (
        "power",
        &[
            "IR-drop/EM signoff complete (static/dynamic)",
            "Power grid coverage and strap width reviewed",
            "Power intent (UPF/CPF) consistency confirmed",
        ],
    ),
    (
        "signal_integrity",
        &[
            "Crosstalk/noise analysis complete",
            "High-speed IO/SerDes channel loss budget reviewed",
        ],
    ),
    (
        "documentation",
        &[
            "GDS/DEF, netlist, timing libs and SDC packaged",
            "ECO log, waiver list and release notes included",
        ],
    ),
];

const ANALOG: Sections = &[
    (
        "drc_lvs",
        &[
            "DRC exceptions for matching/symmetric structures reviewed",
            "LVS with device parameters (W/L/multiplier) clean",
        ],
    ),
    (
        "power",
        &[
            "IR-drop/ground bounce on sensitive nodes reviewed",
            "ESD path and clamp connections confirmed",
        ],
    ),
    (
        "signal_integrity",
        &[
            "Noise coupling (substrate/metal) analyzed",
            "Differences between simulation models and layout parasitics checked",
        ],
    ),
    (
        "documentation",
        &[
            "Bias conditions, corner definitions and sweep ranges documented",
            "Measured/expected spec table provided",
        ],
    ),
];

const MIXED_SIGNAL: Sections = &[
    (
        "drc_lvs",
        &[
            "DRC waiver list for digitally-assisted analog regions compiled",
            "LVS black-box/abstract boundaries confirmed",
        ],
    ),
    (
        "timing",
        &[
            "Mixed-signal boundary handshake timing confirmed",
            "Clock/reset domain interface CDC clean",
        ],
    ),
    (
        "power",
        &[
            "Separate analog/digital supplies, guard rings and guard traces checked",
            "Power-up/down sequence documented",
        ],
    ),
    (
        "signal_integrity",
        &[
            "Shielding of crosstalk/EMI sensitive paths reviewed",
            "ADC/DAC reference node isolation confirmed",
        ],
    ),
    (
        "documentation",
        &["Top-level integration guide and test modes defined"],
    ),
];

const MEMORY: Sections = &[
    (
        "drc_lvs",
        &[
            "Embedded memory compiler release version/patch confirmed",
            "LVS black-box/signature match",
        ],
    ),
    (
        "power",
        &[
            "Droop mitigation for IR-drop/di/dt events",
            "Retention/standby current measurement planned",
        ],
    ),
    (
        "signal_integrity",
        &[
            "Read/write disturb conditions reviewed",
            "Wire skew and sense amp timing margin checked",
        ],
    ),
    ("documentation", &["Fuse/repair flow and BIST procedure documented"]),
];

const IO: Sections = &[
    (
        "drc_lvs",
        &[
            "ESD cell connections and clamp routing verified",
            "Pad ring DRC/LVS clean",
        ],
    ),
    (
        "power",
        &[
            "IO supply decap placement and return path reviewed",
            "Current paths during hot-plug/ESD events confirmed",
        ],
    ),
    (
        "signal_integrity",
        &[
            "SI/PI analysis (package + estimated board) complete",
            "RC impact of ESD protection checked",
        ],
    ),
    (
        "documentation",
        &[
            "Package pinmap/ballmap and IBIS/AMI models provided",
            "Electrical spec (Vih/Vil/Io) stated",
        ],
    ),
];

const DESIGN_TYPES: &[(&str, Sections)] = &[
    ("digital", DIGITAL),
    ("analog", ANALOG),
    ("mixed_signal", MIXED_SIGNAL),
    ("memory", MEMORY),
    ("io", IO),
];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "tapeout_checklist",
        "Generate a pre-tape-out checklist as Markdown checkboxes. \
         design_type: digital/analog/mixed_signal/memory/io. \
         checklist_category: all/drc_lvs/timing/power/signal_integrity/documentation.",
        json!({
            "type": "object",
            "properties": {
                "design_type": {"type": "string", "description": "Design type"},
                "process_node": {"type": "string", "description": "Process node"},
                "checklist_category": {
                    "type": "string",
                    "description": "Checklist category",
                    "default": "all"
                }
            },
            "required": ["design_type", "process_node"]
        }),
    )
}

/// Build a tape-out checklist.
///
/// # Errors
///
/// Fails only when an argument is not a string.
pub fn tapeout_checklist(args: &Arguments) -> Result<String, ToolError> {
    let design_type = required_str(args, "design_type")?;
    let process_node = required_str(args, "process_node")?;
    let category = optional_str(args, "checklist_category", "all")?;

    if design_type.trim().is_empty() || process_node.trim().is_empty() {
        return Ok("Input error: design_type and process_node are required.".to_string());
    }

    let items = gather_items(design_type, category);
    if items.is_empty() {
        return Ok(format!(
            "Could not find design type `{design_type}` or category `{category}`. \
             Supported values: design_type=digital/analog/mixed_signal/memory/io, \
             category=all/drc_lvs/timing/power/signal_integrity/documentation."
        ));
    }

    let mut lines = vec![format!("### Tape-out Checklist ({design_type}, {process_node})")];
    lines.extend(items.into_iter().map(|item| format!("- [ ] {item}")));
    Ok(lines.join("\n"))
}

fn gather_items(design_type: &str, category: &str) -> Vec<&'static str> {
    let design_type = design_type.to_lowercase();
    let category = category.to_lowercase();

    let Some((_, sections)) = DESIGN_TYPES.iter().find(|(key, _)| *key == design_type) else {
        return Vec::new();
    };

    let wanted: Vec<&str> = if category == "all" {
        ALL_CATEGORIES.to_vec()
    } else {
        vec![category.as_str()]
    };

    wanted
        .into_iter()
        .filter_map(|c| sections.iter().find(|(key, _)| *key == c))
        .flat_map(|(_, items)| items.iter().copied())
        .collect()
}
