use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope returned by every backend endpoint
///
/// `{ "success": bool, "data"?: record, "error"?: string, "details"?: field errors }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Machine-readable error code, when the backend provides one (string or number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
}

impl ApiEnvelope {
    /// Read an envelope from a raw body, one key at a time.
    ///
    /// A key with an unexpected type is dropped instead of failing the whole
    /// envelope, so `success`, `error` and `details` stay usable when the
    /// backend adds a `code` or any other field of a shape we don't expect.
    pub fn from_value(body: &Value) -> Self {
        let present = |key: &str| body.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(false),
            data: present("data"),
            error: body.get("error").and_then(detail_message),
            details: present("details"),
            code: present("code"),
        }
    }

    /// The error code as text, whether the backend sent it as a string or a number
    pub fn code_text(&self) -> Option<String> {
        match self.code.as_ref()? {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Flatten `details` into `(field, message)` pairs sorted by field.
    ///
    /// Accepts both shapes the backend emits: an object keyed by field
    /// (`{"phone": "Invalid phone"}`, values may also be arrays or
    /// `{message}` objects) and an array of `{field|path, message}` items.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();

        match &self.details {
            Some(Value::Object(map)) => {
                for (field, value) in map {
                    if let Some(message) = detail_message(value) {
                        errors.push((field.clone(), message));
                    }
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    let field = item
                        .get("field")
                        .or_else(|| item.get("path"))
                        .map(|v| match v {
                            Value::Array(parts) => parts
                                .iter()
                                .map(|p| p.as_str().map(str::to_string).unwrap_or_else(|| p.to_string()))
                                .collect::<Vec<_>>()
                                .join("."),
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        });
                    let message = item.get("message").and_then(detail_message);
                    if let (Some(field), Some(message)) = (field, message) {
                        errors.push((field, message));
                    }
                }
            }
            _ => {}
        }

        errors.sort_by(|a, b| a.0.cmp(&b.0));
        errors
    }
}

fn detail_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(detail_message).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Object(map) => map.get("message").and_then(detail_message),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
