use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status string carried by every successful receipt
pub const STATUS_OK: &str = "OK";

/// Return the field only when it was sent with a value.
///
/// `null` and `""` count as absent. Any other JSON value is present,
/// whatever its type; presence is the only check the mock performs.
pub fn required(field: &Value) -> Option<&Value> {
    match field {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

/// Text of a present field: strings as-is, anything else as compact JSON
pub fn field_text(field: &Value) -> String {
    match field {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        assert_eq!(required(&Value::Null), None);
        assert_eq!(required(&json!("")), None);
        assert_eq!(required(&json!(" ")), Some(&json!(" ")));
        assert_eq!(required(&json!("abc")), Some(&json!("abc")));
        assert_eq!(required(&json!(42)), Some(&json!(42)));
        assert_eq!(required(&json!({"k": 1})), Some(&json!({"k": 1})));
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("0977123456")), "0977123456");
        assert_eq!(field_text(&json!(12345678)), "12345678");
    }
}
