use serde_json::{json, Value};

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{must_be, required_str};

const ASPECTS: &[(&str, &str)] = &[
    ("performance", "Expected trend in switching speed / fmax"),
    ("power", "Dynamic and static power trend"),
    ("area", "Cell and routing density trend"),
    ("cost", "Relative wafer cost and NRE trend"),
    ("maturity", "IP/PDK maturity"),
    ("availability", "MPW/production lead time"),
];

const DEFAULT_ASPECTS: &[&str] = &["performance", "power", "area", "cost"];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "compare_process_nodes",
        "Compare two process nodes on performance/power/area/cost/maturity/availability. \
         Returns a Markdown table with short notes.",
        json!({
            "type": "object",
            "properties": {
                "node1": {"type": "string", "description": "First process node"},
                "node2": {"type": "string", "description": "Second process node"},
                "comparison_aspects": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Aspects to compare",
                    "default": DEFAULT_ASPECTS
                }
            },
            "required": ["node1", "node2"]
        }),
    )
}

/// Compare two nodes aspect by aspect.
///
/// # Errors
///
/// Fails when a node is not a string or `comparison_aspects` is not an
/// array of strings.
pub fn compare_process_nodes(args: &Arguments) -> Result<String, ToolError> {
    let node1 = required_str(args, "node1")?;
    let node2 = required_str(args, "node2")?;

    if node1.trim().is_empty() || node2.trim().is_empty() {
        return Ok("Input error: node1 and node2 are required.".to_string());
    }

    let requested = requested_aspects(args)?;
    let mut aspects: Vec<&'static str> = requested
        .iter()
        .filter_map(|a| canonical_aspect(a))
        .collect();
    if aspects.is_empty() {
        aspects = DEFAULT_ASPECTS.to_vec();
    }

    let mut lines = vec![
        "### Process Node Comparison".to_string(),
        String::new(),
        format!("| Aspect | {node1} | {node2} |"),
        "| --- | --- | --- |".to_string(),
    ];
    for aspect in &aspects {
        lines.push(format!(
            "| {aspect} | {} | {} |",
            aspect_note(aspect, node1),
            aspect_note(aspect, node2)
        ));
    }
    lines.push(String::new());
    lines.push("Summary notes:".to_string());
    for aspect in &aspects {
        if let Some((_, summary)) = ASPECTS.iter().find(|(key, _)| key == aspect) {
            lines.push(format!("- {aspect}: {summary}"));
        }
    }
    lines.push(
        "\n> No NDA information is included; confirm foundry-specific figures with your FAE."
            .to_string(),
    );
    Ok(lines.join("\n"))
}

fn requested_aspects(args: &Arguments) -> Result<Vec<String>, ToolError> {
    match args.get("comparison_aspects") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_lowercase)
                    .ok_or_else(|| must_be("comparison_aspects", "a list of strings"))
            })
            .collect(),
        Some(_) => Err(must_be("comparison_aspects", "a list of strings")),
    }
}

fn canonical_aspect(aspect: &str) -> Option<&'static str> {
    ASPECTS
        .iter()
        .find(|(key, _)| *key == aspect)
        .map(|(key, _)| *key)
}

fn aspect_note(aspect: &str, node: &str) -> String {
    match aspect {
        "performance" => {
            format!("{node}: finer nodes raise fmax potential; RC and variability need managing")
        }
        "power" => format!("{node}: power trends down, but leakage is node and temperature sensitive"),
        "area" => format!("{node}: tighter cell/routing pitch shrinks area, more layout/grid constraints"),
        "cost" => format!("{node}: finer nodes cost more per wafer and mask set, with more masks"),
        "maturity" => format!("{node}: maturity depends on PDK, libraries and production track record"),
        "availability" => {
            format!("{node}: check MPW availability and production slot lead time per foundry")
        }
        _ => format!("{node}: not enough general comparison data"),
    }
}
