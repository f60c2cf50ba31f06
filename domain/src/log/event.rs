//! Structural classification of log messages.
//!
//! The transport logs protocol objects without a discriminant field; which
//! kind of object a message is can only be told by the fields it carries.
//! [`classify`] applies those checks once, in a fixed priority order, and
//! produces a [`LogEvent`] that the rest of the crate matches exhaustively.
//!
//! # Priority
//!
//! Shapes overlap (a message may carry both `turns`/`turnComplete` and
//! `serverContent`), so the order below is part of the contract:
//!
//! 1. plain string
//! 2. `turns` + `turnComplete` (client content)
//! 3. `toolCall`
//! 4. `toolCallCancellation`
//! 5. `functionResponses`
//! 6. `serverContent` → interrupted / turnComplete / modelTurn
//! 7. anything else

use serde_json::Value;

use super::message::{LogMessage, is_truthy};
use super::part::Part;

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub id: Option<String>,
    pub name: String,
    /// The complete call object, shown as-is.
    pub raw: Value,
}

/// A function response sent back by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub id: String,
    pub response: Value,
}

/// A classified log message. One variant per presentation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    PlainText(String),
    ClientContent {
        parts: Vec<Part>,
        turn_complete: bool,
    },
    ToolCall {
        function_calls: Vec<FunctionCall>,
    },
    ToolCallCancellation {
        ids: Vec<String>,
    },
    ToolResponse {
        responses: Vec<FunctionResponse>,
    },
    Interrupted,
    TurnComplete,
    ModelTurn {
        parts: Vec<Part>,
    },
    /// Unrecognized shape, shown as a JSON dump.
    Unknown(Value),
}

/// Fieldless mirror of [`LogEvent`], used for styling and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationRule {
    PlainText,
    ClientContent,
    ToolCall,
    ToolCallCancellation,
    ToolResponse,
    Interrupted,
    TurnComplete,
    ModelTurn,
    Fallback,
}

impl PresentationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationRule::PlainText => "plain-text",
            PresentationRule::ClientContent => "client-content",
            PresentationRule::ToolCall => "tool-call",
            PresentationRule::ToolCallCancellation => "tool-call-cancellation",
            PresentationRule::ToolResponse => "tool-response",
            PresentationRule::Interrupted => "interrupted",
            PresentationRule::TurnComplete => "turn-complete",
            PresentationRule::ModelTurn => "model-turn",
            PresentationRule::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for PresentationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LogEvent {
    pub fn rule(&self) -> PresentationRule {
        match self {
            LogEvent::PlainText(_) => PresentationRule::PlainText,
            LogEvent::ClientContent { .. } => PresentationRule::ClientContent,
            LogEvent::ToolCall { .. } => PresentationRule::ToolCall,
            LogEvent::ToolCallCancellation { .. } => PresentationRule::ToolCallCancellation,
            LogEvent::ToolResponse { .. } => PresentationRule::ToolResponse,
            LogEvent::Interrupted => PresentationRule::Interrupted,
            LogEvent::TurnComplete => PresentationRule::TurnComplete,
            LogEvent::ModelTurn { .. } => PresentationRule::ModelTurn,
            LogEvent::Unknown(_) => PresentationRule::Fallback,
        }
    }
}

/// Classify a message by shape. Total: every message maps to exactly one event.
pub fn classify(message: &LogMessage) -> LogEvent {
    let value = match message {
        LogMessage::Text(text) => return LogEvent::PlainText(text.clone()),
        LogMessage::Structured(value) => value,
    };

    if message.has_field("turns") && message.has_field("turnComplete") {
        return LogEvent::ClientContent {
            parts: Part::list_from_value(message.field("turns")),
            turn_complete: is_truthy(message.field("turnComplete")),
        };
    }

    if let Some(tool_call) = message.field("toolCall") {
        return LogEvent::ToolCall {
            function_calls: function_calls(tool_call),
        };
    }

    if let Some(cancellation) = message.field("toolCallCancellation") {
        return LogEvent::ToolCallCancellation {
            ids: cancelled_ids(cancellation),
        };
    }

    if let Some(responses) = message.field("functionResponses") {
        return LogEvent::ToolResponse {
            responses: function_responses(responses),
        };
    }

    if let Some(server_content) = message.field("serverContent") {
        if is_truthy(server_content.get("interrupted")) {
            return LogEvent::Interrupted;
        }
        if is_truthy(server_content.get("turnComplete")) {
            return LogEvent::TurnComplete;
        }
        if let Some(model_turn) = server_content.get("modelTurn") {
            return LogEvent::ModelTurn {
                parts: Part::list_from_value(model_turn.get("parts")),
            };
        }
    }

    LogEvent::Unknown(value.clone())
}

fn function_calls(tool_call: &Value) -> Vec<FunctionCall> {
    tool_call
        .get("functionCalls")
        .and_then(Value::as_array)
        .map(|calls| {
            calls
                .iter()
                .map(|call| FunctionCall {
                    id: call.get("id").and_then(Value::as_str).map(str::to_string),
                    name: call
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    raw: call.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn cancelled_ids(cancellation: &Value) -> Vec<String> {
    cancellation
        .get("ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().map(id_string).collect())
        .unwrap_or_default()
}

fn function_responses(responses: &Value) -> Vec<FunctionResponse> {
    responses
        .as_array()
        .map(|list| {
            list.iter()
                .map(|r| FunctionResponse {
                    id: r.get("id").map(id_string).unwrap_or_default(),
                    response: r.get("response").cloned().unwrap_or(Value::Null),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify_json(value: Value) -> LogEvent {
        classify(&LogMessage::structured(value))
    }

    #[test]
    fn plain_string_is_plain_text() {
        assert_eq!(
            classify(&LogMessage::text("connected")),
            LogEvent::PlainText("connected".to_string())
        );
    }

    #[test]
    fn client_content_beats_server_content() {
        let event = classify_json(json!({
            "turns": [{"text": "hi"}],
            "turnComplete": true,
            "serverContent": {"interrupted": true}
        }));
        assert_eq!(event.rule(), PresentationRule::ClientContent);
    }

    #[test]
    fn client_content_needs_both_fields() {
        let event = classify_json(json!({"turns": [{"text": "hi"}]}));
        assert_eq!(event.rule(), PresentationRule::Fallback);
    }

    #[test]
    fn client_content_turn_complete_flag() {
        let event = classify_json(json!({"turns": [], "turnComplete": false}));
        assert_eq!(
            event,
            LogEvent::ClientContent {
                parts: vec![],
                turn_complete: false
            }
        );
    }

    #[test]
    fn tool_call_beats_cancellation_and_responses() {
        let event = classify_json(json!({
            "toolCall": {"functionCalls": [{"id": "c1", "name": "lookup", "args": {}}]},
            "toolCallCancellation": {"ids": ["c0"]},
            "functionResponses": []
        }));
        match event {
            LogEvent::ToolCall { function_calls } => {
                assert_eq!(function_calls.len(), 1);
                assert_eq!(function_calls[0].name, "lookup");
                assert_eq!(function_calls[0].id.as_deref(), Some("c1"));
                assert_eq!(function_calls[0].raw["args"], json!({}));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn cancellation_ids() {
        let event = classify_json(json!({"toolCallCancellation": {"ids": ["a", "b"]}}));
        assert_eq!(
            event,
            LogEvent::ToolCallCancellation {
                ids: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn tool_response_payloads() {
        let event = classify_json(json!({
            "functionResponses": [{"id": "c1", "response": {"ok": true}}]
        }));
        assert_eq!(
            event,
            LogEvent::ToolResponse {
                responses: vec![FunctionResponse {
                    id: "c1".to_string(),
                    response: json!({"ok": true})
                }]
            }
        );
    }

    #[test]
    fn server_content_refinements_in_order() {
        let interrupted = classify_json(json!({
            "serverContent": {"interrupted": true, "turnComplete": true, "modelTurn": {"parts": []}}
        }));
        assert_eq!(interrupted, LogEvent::Interrupted);

        let complete = classify_json(json!({
            "serverContent": {"turnComplete": true, "modelTurn": {"parts": []}}
        }));
        assert_eq!(complete, LogEvent::TurnComplete);

        let turn = classify_json(json!({
            "serverContent": {"modelTurn": {"parts": [{"text": "Hello"}]}}
        }));
        assert_eq!(
            turn,
            LogEvent::ModelTurn {
                parts: vec![Part::Text("Hello".to_string())]
            }
        );
    }

    #[test]
    fn empty_server_content_falls_back() {
        let event = classify_json(json!({"serverContent": {"turnComplete": false}}));
        assert_eq!(event.rule(), PresentationRule::Fallback);

        let event = classify_json(json!({"serverContent": null}));
        assert_eq!(event.rule(), PresentationRule::Fallback);
    }

    #[test]
    fn unknown_shape_keeps_message() {
        let value = json!({"setupComplete": {}});
        assert_eq!(classify_json(value.clone()), LogEvent::Unknown(value));
    }

    #[test]
    fn classification_is_stateless() {
        let msg = LogMessage::structured(json!({"toolCallCancellation": {"ids": ["x"]}}));
        let first = classify(&msg);
        let _ = classify(&LogMessage::text("noise"));
        assert_eq!(classify(&msg), first);
    }
}
