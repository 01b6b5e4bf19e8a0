use serde_json::Value;

use foundry_core::{Arguments, ToolError};

/// A required string argument.
pub(crate) fn required_str<'a>(args: &'a Arguments, name: &str) -> Result<&'a str, ToolError> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(must_be(name, "a string")),
        None => Err(ToolError::execution(format!("missing argument '{name}'"))),
    }
}

/// An optional string argument; absent or `null` yields `default`.
pub(crate) fn optional_str<'a>(
    args: &'a Arguments,
    name: &str,
    default: &'a str,
) -> Result<&'a str, ToolError> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Ok(default),
        Some(_) => Err(must_be(name, "a string")),
    }
}

pub(crate) fn must_be(name: &str, kind: &str) -> ToolError {
    ToolError::execution(format!("argument '{name}' must be {kind}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> Arguments {
        json!({"node": "5nm", "count": 3, "nothing": null})
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn required() {
        assert_eq!(required_str(&args(), "node").unwrap(), "5nm");
        assert_eq!(
            required_str(&args(), "count").unwrap_err().to_string(),
            "argument 'count' must be a string"
        );
        assert!(required_str(&args(), "absent").is_err());
    }

    #[test]
    fn optional() {
        assert_eq!(optional_str(&args(), "absent", "general").unwrap(), "general");
        assert_eq!(optional_str(&args(), "nothing", "general").unwrap(), "general");
        assert_eq!(optional_str(&args(), "node", "general").unwrap(), "5nm");
        assert!(optional_str(&args(), "count", "general").is_err());
    }
}
