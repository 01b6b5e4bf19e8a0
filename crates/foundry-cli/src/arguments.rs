use anyhow::{bail, Context};
use serde_json::{Map, Value};

/// Build a tool argument object from `--json` and `--arg KEY=VALUE` flags.
pub fn parse(pairs: &[String], json: Option<&str>) -> anyhow::Result<Map<String, Value>> {
    let mut arguments = match json {
        Some(raw) => match serde_json::from_str(raw).context("--json is not valid JSON")? {
            Value::Object(object) => object,
            _ => bail!("--json must be a JSON object"),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected KEY=VALUE, got '{pair}'");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("empty argument name in '{pair}'");
        }
        arguments.insert(key.to_string(), parse_value(value));
    }

    Ok(arguments)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
