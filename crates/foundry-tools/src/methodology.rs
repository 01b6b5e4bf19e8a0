use serde_json::json;

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{optional_str, required_str};

/// Tips per topic, split by process class.
struct Guide {
    advanced: &'static [&'static str],
    mature: &'static [&'static str],
}

const GUIDES: &[(&str, Guide)] = &[
    (
        "floorplan",
        Guide {
            advanced: &[
                "Use macro edge keep-outs to ease double-patterning conflicts",
                "Fix the power grid early and validate it with a congestion map",
                "Reserve area for the clock spine/mesh",
            ],
            mature: &[
                "Add stripes in IR-drop sensitive regions",
                "Keep distance from IO/analog blocks for crosstalk and EMI",
            ],
        },
    ),
    (
        "power_grid",
        Guide {
            advanced: &[
                "Set strap pitch and width from combined EM/IR analysis",
                "Separate local and global grid hierarchy",
            ],
            mature: &[
                "Check IR margin across corner temperature and voltage",
                "Split pad ring supplies and place decaps",
            ],
        },
    ),
    (
        "clock_tree",
        Guide {
            advanced: &[
                "Use mesh or hybrid structures to lower OCV sensitivity",
                "Apply useful skew sparingly during CTS",
            ],
            mature: &[
                "Restrict the buffer set to balance skew and latency",
                "Define the jitter budget together with PLL/deskew",
            ],
        },
    ),
    (
        "placement",
        Guide {
            advanced: &[
                "Enable color-aware placement options",
                "Use multi-bit flops to cut clock load and area",
            ],
            mature: &[
                "Cluster by logical proximity to relieve routing congestion",
                "Minimize don't-touch regions to keep reordering flexible",
            ],
        },
    ),
    (
        "routing",
        Guide {
            advanced: &[
                "Route on tracks in a double-patterning friendly way",
                "Straighten high-speed nets on upper layers and minimize via count",
            ],
            mature: &[
                "Adjust layer assignment to avoid congestion hotspots",
                "Reinforce EM-sensitive paths with width or parallel routes",
            ],
        },
    ),
    (
        "timing_closure",
        Guide {
            advanced: &[
                "Analyze margin with AOCV/POCV and automate the STA/ECO loop",
                "Fix hold while keeping upper-layer vias to a minimum",
            ],
            mature: &[
                "Size/swap on critical paths and watch inductive noise on idle paths",
                "Document the margin budget reserved for late ECOs",
            ],
        },
    ),
    (
        "low_power",
        Guide {
            advanced: &[
                "Mix multi-Vt cells with MTCMOS gating to suppress leakage",
                "Analyze IR and ground bounce at power gating boundaries",
            ],
            mature: &[
                "Widen clock gating coverage and minimize retention flops",
                "Keep corner libraries consistent when applying DVFS",
            ],
        },
    ),
    (
        "multi_voltage",
        Guide {
            advanced: &[
                "Define automatic placement rules for level shifters/detectors",
                "Plan CDC for clock and reset domains between islands",
            ],
            mature: &[
                "Fix level shifter location and orientation for predictable routing",
                "Verify power-up/down sequences",
            ],
        },
    ),
];

const TOPICS: &str =
    "floorplan/power_grid/clock_tree/placement/routing/timing_closure/low_power/multi_voltage";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "design_methodology_guide",
        "Design methodology guide by process class (advanced/mature) and topic. \
         methodology_topic: floorplan/power_grid/clock_tree/placement/routing/timing_closure/\
         low_power/multi_voltage.",
        json!({
            "type": "object",
            "properties": {
                "methodology_topic": {"type": "string", "description": "Methodology topic"},
                "process_node": {
                    "type": "string",
                    "description": "Process class (advanced or mature)",
                    "default": "advanced"
                }
            },
            "required": ["methodology_topic"]
        }),
    )
}

/// Give methodology tips for a topic.
///
/// # Errors
///
/// Fails only when an argument is not a string.
pub fn design_methodology_guide(args: &Arguments) -> Result<String, ToolError> {
    let methodology_topic = required_str(args, "methodology_topic")?;
    let process_node = optional_str(args, "process_node", "advanced")?;

    let topic = methodology_topic.trim().to_lowercase();
    let class = if process_node.to_lowercase().starts_with("adv") {
        "advanced"
    } else {
        "mature"
    };

    if topic.is_empty() {
        return Ok("Input error: methodology_topic is required.".to_string());
    }

    let Some((_, guide)) = GUIDES.iter().find(|(key, _)| *key == topic) else {
        return Ok(format!(
            "Unsupported topic: `{methodology_topic}`. Choose one of {TOPICS}."
        ));
    };

    let tips = if class == "advanced" {
        guide.advanced
    } else {
        guide.mature
    };

    let mut lines = vec![format!("### Design Methodology: {methodology_topic} ({class})")];
    lines.extend(tips.iter().take(8).map(|t| format!("- {t}")));
    lines.push("\n> Follow your FAE guidance for process and foundry specific values.".to_string());
    Ok(lines.join("\n"))
}
