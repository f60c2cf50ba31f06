//! Raw log message payloads.
//!
//! A [`LogMessage`] is exactly what the transport hands to the log store:
//! either a plain status string or the structured protocol object that was
//! sent or received. Nothing about its shape is decided here; see
//! [`classify`](super::event::classify) for that.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of a [`LogRecord`](super::record::LogRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogMessage {
    /// Free-form status text (e.g. "setupComplete", "connected").
    Text(String),
    /// A protocol object as it appeared on the wire.
    Structured(Value),
}

impl LogMessage {
    pub fn text(text: impl Into<String>) -> Self {
        LogMessage::Text(text.into())
    }

    pub fn structured(value: Value) -> Self {
        LogMessage::Structured(value)
    }

    /// Returns `true` if the message is an object that carries `field`,
    /// regardless of the field's value.
    pub fn has_field(&self, field: &str) -> bool {
        self.field(field).is_some()
    }

    /// Look up a top-level field of a structured message.
    pub fn field(&self, field: &str) -> Option<&Value> {
        match self {
            LogMessage::Structured(Value::Object(map)) => map.get(field),
            _ => None,
        }
    }

    /// Pretty-printed JSON dump of the whole message.
    pub fn pretty(&self) -> String {
        match self {
            LogMessage::Text(s) => pretty_json(&Value::String(s.clone())),
            LogMessage::Structured(v) => pretty_json(v),
        }
    }
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage::Text(s.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage::Text(s)
    }
}

impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LogMessage::Text(s),
            other => LogMessage::Structured(other),
        }
    }
}

/// Two-space indented JSON, the layout used for every structured dump.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// JavaScript-style truthiness of an optional JSON value.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn has_field_ignores_value() {
        let msg = LogMessage::structured(json!({"turns": [], "turnComplete": null}));
        assert!(msg.has_field("turns"));
        assert!(msg.has_field("turnComplete"));
        assert!(!msg.has_field("toolCall"));
    }

    #[test]
    fn text_message_has_no_fields() {
        let msg = LogMessage::text("turns");
        assert!(!msg.has_field("turns"));
    }

    #[test]
    fn deserializes_untagged() {
        let text: LogMessage = serde_json::from_str("\"connected\"").unwrap();
        assert_eq!(text, LogMessage::text("connected"));

        let obj: LogMessage = serde_json::from_str(r#"{"toolCall":{}}"#).unwrap();
        assert!(obj.has_field("toolCall"));
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let msg = LogMessage::structured(json!({"a": 1}));
        assert_eq!(msg.pretty(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn truthiness_follows_js_rules() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!({}))));
        assert!(is_truthy(Some(&json!([]))));
    }
}
