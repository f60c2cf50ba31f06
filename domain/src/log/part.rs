//! Content parts of a turn.
//!
//! Parts arrive as loosely-shaped JSON objects; [`Part::from_value`] decides
//! once which kind a part is so that rendering can match exhaustively.

use serde_json::Value;

use super::message::is_truthy;

/// One fragment of a client or model turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Non-empty text.
    Text(String),
    /// Code the model wants executed.
    ExecutableCode { language: String, code: String },
    /// Result of a code execution; `output` is kept raw.
    CodeExecutionResult { outcome: String, output: String },
    /// Inline binary payload. Only the media type is kept; the bytes are
    /// never needed for display.
    InlineData { mime_type: String },
    /// A part with none of the known payloads.
    Unknown,
}

impl Part {
    /// Classify a JSON part. First match wins: text, executable code,
    /// execution result, inline data.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name);

        if let Some(text) = field("text").and_then(Value::as_str)
            && !text.is_empty()
        {
            return Part::Text(text.to_string());
        }

        if is_truthy(field("executableCode")) {
            let code = &value["executableCode"];
            return Part::ExecutableCode {
                language: str_field(code, "language"),
                code: str_field(code, "code"),
            };
        }

        if is_truthy(field("codeExecutionResult")) {
            let result = &value["codeExecutionResult"];
            return Part::CodeExecutionResult {
                outcome: str_field(result, "outcome"),
                output: str_field(result, "output"),
            };
        }

        if is_truthy(field("inlineData")) {
            return Part::InlineData {
                mime_type: str_field(&value["inlineData"], "mimeType"),
            };
        }

        Part::Unknown
    }

    /// Parse a JSON array of parts. Anything that is not an array yields no parts.
    pub fn list_from_value(value: Option<&Value>) -> Vec<Part> {
        value
            .and_then(Value::as_array)
            .map(|parts| parts.iter().map(Part::from_value).collect())
            .unwrap_or_default()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A part whose text is exactly one newline. These are noise in
    /// turn displays and get skipped.
    pub fn is_bare_newline(&self) -> bool {
        self.as_text() == Some("\n")
    }
}

fn str_field(value: &Value, name: &str) -> String {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
