use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read a source record from a JSON file, or stdin when the path is `-`.
///
/// A backend envelope (`{"success": true, "data": {...}}`) is unwrapped so
/// responses saved from the API can be used as-is.
pub fn read_record(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read record from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file: {:?}", path))?
    };

    parse_record(&content).with_context(|| format!("Invalid record in {:?}", path))
}

pub fn parse_record(content: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(content).context("Record is not valid JSON")?;

    let record = match value {
        Value::Object(ref map) if map.get("success").is_some_and(Value::is_boolean) => {
            map.get("data").cloned().unwrap_or(Value::Null)
        }
        other => other,
    };

    if !record.is_object() {
        anyhow::bail!("Record must be a JSON object");
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_record() {
        let record = parse_record(r#"{"_id": "1", "name": "Acme"}"#).unwrap();
        assert_eq!(record["name"], "Acme");
    }

    #[test]
    fn test_parse_enveloped_record() {
        let record = parse_record(r#"{"success": true, "data": {"_id": "1"}}"#).unwrap();
        assert_eq!(record["_id"], "1");
    }

    #[test]
    fn test_reject_non_object() {
        assert!(parse_record("[1, 2]").is_err());
        assert!(parse_record(r#"{"success": false}"#).is_err());
        assert!(parse_record("not json").is_err());
    }
}
