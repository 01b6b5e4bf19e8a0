use serde_json::{json, Map, Value};

use foundry_core::{Arguments, ToolDescriptor, ToolError};

use crate::args::{must_be, required_str};

const TEMPLATES: &[(&str, &str)] = &[
    (
        "technical_inquiry",
        "Subject: [Project] {project_name} - {process} Technical Inquiry\n\n\
         Dear FAE team,\n\n\
         We have a question regarding:\n\
         - Issue: {issue_description}\n\
         - Urgency: {urgency}\n\n\
         Could you please provide guidance or relevant application notes?\n\
         If needed, we can share simplified schematics/logs.\n\n\
         Thanks,\n\
         {sender}",
    ),
    (
        "drc_waiver_request",
        "Subject: [Waiver] {project_name} - {process} DRC Waiver Request\n\n\
         Dear FAE team,\n\n\
         We request a waiver for the following DRC rule:\n\
         - Rule ID / Layer: {rule_id}\n\
         - Location / Instance: {location}\n\
         - Rationale: {issue_description}\n\
         - Impact: Functionally benign, no reliability risk (please confirm)\n\n\
         Attached: screenshots, layout clip, signoff report excerpt.\n\
         Please advise acceptance criteria and any required mitigations.\n\n\
         Regards,\n\
         {sender}",
    ),
    (
        "tapeout_schedule",
        "Subject: {project_name} Tape-out Schedule Alignment ({process})\n\n\
         Dear FAE team,\n\n\
         We plan the following milestones:\n\
         - Final netlist freeze: {netlist_freeze}\n\
         - Signoff complete: {signoff_complete}\n\
         - GDS release target: {gds_release}\n\n\
         Please confirm mask shop lead time and any holiday/maintenance windows.\n\n\
         Thanks,\n\
         {sender}",
    ),
    (
        "yield_issue_report",
        "Subject: Yield Issue Report - {project_name} ({process})\n\n\
         Dear FAE team,\n\n\
         Summary of issue:\n\
         - Symptom: {issue_description}\n\
         - Lots / wafers affected: {lots}\n\
         - Test conditions: {test_conditions}\n\
         - Urgency: {urgency}\n\n\
         Attachments: wafer maps, fail logs, pareto.\n\
         Please advise next debug steps and recommended monitors.\n\n\
         Regards,\n\
         {sender}",
    ),
    (
        "respin_request",
        "Subject: Respin Request - {project_name} ({process})\n\n\
         Dear FAE team,\n\n\
         We need a respin due to:\n\
         - Issue: {issue_description}\n\
         - Impact: {impact}\n\
         - Urgency: {urgency}\n\n\
         Kindly share updated mask schedule and any NPI requirements.\n\n\
         Thanks,\n\
         {sender}",
    ),
];

/// Placeholder names and the text used when the context omits them.
const FIELDS: &[(&str, &str)] = &[
    ("project_name", "PROJECT"),
    ("process", "PROCESS"),
    ("issue_description", "Describe issue"),
    ("urgency", "medium"),
    ("sender", "Team"),
    ("rule_id", "RuleID"),
    ("location", "Layout location"),
    ("netlist_freeze", "YYYY-MM-DD"),
    ("signoff_complete", "YYYY-MM-DD"),
    ("gds_release", "YYYY-MM-DD"),
    ("lots", "N/A"),
    ("test_conditions", "N/A"),
    ("impact", "Impact description"),
];

const TYPES: &str =
    "technical_inquiry/drc_waiver_request/tapeout_schedule/yield_issue_report/respin_request";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "foundry_communication_template",
        "Generate a communication template for the foundry FAE. communication_type: \
         technical_inquiry/drc_waiver_request/tapeout_schedule/yield_issue_report/respin_request.",
        json!({
            "type": "object",
            "properties": {
                "communication_type": {"type": "string", "description": "Template type"},
                "context": {
                    "type": "object",
                    "description": "Values substituted into the template \
                                    (project_name, process, issue_description, sender, ...)"
                }
            },
            "required": ["communication_type", "context"]
        }),
    )
}

/// Fill in a communication template.
///
/// # Errors
///
/// Fails when `communication_type` is not a string or `context` is not an
/// object.
pub fn foundry_communication_template(args: &Arguments) -> Result<String, ToolError> {
    let communication_type = required_str(args, "communication_type")?;
    let context = match args.get("context") {
        Some(Value::Object(context)) => context,
        _ => return Err(must_be("context", "an object")),
    };

    let ctype = communication_type.trim().to_lowercase();
    if ctype.is_empty() {
        return Ok("Input error: communication_type is required.".to_string());
    }

    let Some((_, template)) = TEMPLATES.iter().find(|(key, _)| *key == ctype) else {
        return Ok(format!(
            "Unsupported communication_type: `{communication_type}`. Choose one of {TYPES}."
        ));
    };

    Ok(fill(template, context))
}

fn fill(template: &str, context: &Map<String, Value>) -> String {
    FIELDS.iter().fold(template.to_string(), |body, (field, default)| {
        let value = match context.get(*field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => (*default).to_string(),
        };
        body.replace(&format!("{{{field}}}"), &value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(value: Value) -> Result<String, ToolError> {
        foundry_communication_template(value.as_object().unwrap())
    }

    #[test]
    fn waiver_request() {
        let resp = call(json!({
            "communication_type": "drc_waiver_request",
            "context": {
                "project_name": "Proj",
                "process": "5nm",
                "issue_description": "Spacing",
                "sender": "Team"
            }
        }))
        .unwrap();
        assert!(resp.contains("Waiver"));
        assert!(resp.starts_with("Subject: [Waiver] Proj - 5nm DRC Waiver Request"));
        assert!(resp.contains("- Rule ID / Layer: RuleID"));
        assert!(!resp.contains('{'));
    }

    #[test]
    fn non_string_values_are_rendered() {
        let resp = call(json!({
            "communication_type": "yield_issue_report",
            "context": {"lots": 3}
        }))
        .unwrap();
        assert!(resp.contains("- Lots / wafers affected: 3"));
    }

    #[test]
    fn invalid_type() {
        let resp = call(json!({"communication_type": "unknown", "context": {}})).unwrap();
        assert!(resp.starts_with("Unsupported communication_type"));
    }

    #[test]
    fn context_must_be_object() {
        let err = call(json!({"communication_type": "respin_request", "context": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "argument 'context' must be an object");
    }
}
