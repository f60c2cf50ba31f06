//! Presentation of classified log events.
//!
//! Rendering is a pure projection from a [`LogEvent`] to a list of
//! [`Block`]s. Views (console, TUI) decide how a block looks; this module
//! only decides what is shown.

use serde_json::Value;

use super::event::{LogEvent, PresentationRule};
use super::message::pretty_json;
use super::part::Part;

/// One visual element of a rendered message.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Speaker heading of a turn ("User", "Model").
    Role(String),
    /// Section heading inside a message.
    Heading(String),
    /// Plain text.
    Text(String),
    /// Syntax-highlighted code; `language` is lower-case.
    Code { language: String, body: String },
    /// Monospace dump without highlighting.
    Preformatted(String),
    /// Secondary annotation such as an incomplete-turn marker.
    Note(String),
    /// Inline list of identifiers.
    Ids(Vec<String>),
    /// Reserved slot for a part that has nothing displayable.
    Placeholder,
}

/// A rendered log message.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub rule: PresentationRule,
    pub blocks: Vec<Block>,
}

impl RenderedMessage {
    /// Flatten to plain text lines, one or more per block.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Role(s) | Block::Heading(s) | Block::Note(s) => lines.push(s.clone()),
                Block::Text(s) | Block::Preformatted(s) => {
                    lines.extend(s.lines().map(str::to_string))
                }
                Block::Code { body, .. } => lines.extend(body.lines().map(str::to_string)),
                Block::Ids(ids) => lines.push(format_ids(ids)),
                Block::Placeholder => lines.push(String::new()),
            }
        }
        lines
    }
}

/// `ids: "a" "b"`, the cancellation line format.
pub fn format_ids(ids: &[String]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("\"{}\"", id)).collect();
    format!("ids: {}", quoted.join(" "))
}

/// Render a classified event.
pub fn render(event: &LogEvent) -> RenderedMessage {
    let mut blocks = Vec::new();

    match event {
        LogEvent::PlainText(text) => blocks.push(Block::Text(text.clone())),
        LogEvent::ClientContent {
            parts,
            turn_complete,
        } => {
            blocks.push(Block::Role("User".to_string()));
            render_turn_parts(parts, &mut blocks);
            if !turn_complete {
                blocks.push(Block::Note("turnComplete: false".to_string()));
            }
        }
        LogEvent::ToolCall { function_calls } => {
            for call in function_calls {
                blocks.push(Block::Heading(format!("Function call: {}", call.name)));
                blocks.push(json_block(&call.raw));
            }
        }
        LogEvent::ToolCallCancellation { ids } => blocks.push(Block::Ids(ids.clone())),
        LogEvent::ToolResponse { responses } => {
            for response in responses {
                blocks.push(Block::Heading(format!("Function Response: {}", response.id)));
                blocks.push(json_block(&response.response));
            }
        }
        LogEvent::Interrupted => blocks.push(Block::Text("interrupted".to_string())),
        LogEvent::TurnComplete => blocks.push(Block::Text("turnComplete".to_string())),
        LogEvent::ModelTurn { parts } => {
            blocks.push(Block::Role("Model".to_string()));
            render_turn_parts(parts, &mut blocks);
        }
        LogEvent::Unknown(value) => blocks.push(Block::Preformatted(pretty_json(value))),
    }

    RenderedMessage {
        rule: event.rule(),
        blocks,
    }
}

fn render_turn_parts(parts: &[Part], blocks: &mut Vec<Block>) {
    for part in parts.iter().filter(|p| !p.is_bare_newline()) {
        render_part(part, blocks);
    }
}

/// Render a single part. Never fails; unknown parts keep their slot.
pub fn render_part(part: &Part, blocks: &mut Vec<Block>) {
    match part {
        Part::Text(text) => blocks.push(Block::Text(text.clone())),
        Part::ExecutableCode { language, code } => {
            blocks.push(Block::Heading(format!("executableCode: {}", language)));
            blocks.push(Block::Code {
                language: language.to_lowercase(),
                body: code.clone(),
            });
        }
        Part::CodeExecutionResult { outcome, output } => {
            blocks.push(Block::Heading(format!("codeExecutionResult: {}", outcome)));
            blocks.push(Block::Code {
                language: "json".to_string(),
                body: format_execution_output(output),
            });
        }
        Part::InlineData { mime_type } => {
            blocks.push(Block::Heading(format!("Inline Data: {}", mime_type)))
        }
        Part::Unknown => blocks.push(Block::Placeholder),
    }
}

/// Pretty-print execution output when it is JSON, otherwise return it verbatim.
pub fn format_execution_output(output: &str) -> String {
    match serde_json::from_str::<Value>(output) {
        Ok(value) => pretty_json(&value),
        Err(_) => output.to_string(),
    }
}

fn json_block(value: &Value) -> Block {
    Block::Code {
        language: "json".to_string(),
        body: pretty_json(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::event::{FunctionCall, FunctionResponse};
    use serde_json::json;

    #[test]
    fn execution_output_json_is_pretty_printed() {
        assert_eq!(format_execution_output("{\"a\":1}"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn execution_output_non_json_is_verbatim() {
        assert_eq!(format_execution_output("not json"), "not json");
    }

    #[test]
    fn bare_newline_parts_are_skipped() {
        let rendered = render(&LogEvent::ModelTurn {
            parts: vec![
                Part::Text("\n".to_string()),
                Part::Text("Hello".to_string()),
            ],
        });
        assert_eq!(
            rendered.blocks,
            vec![
                Block::Role("Model".to_string()),
                Block::Text("Hello".to_string())
            ]
        );
    }

    #[test]
    fn bare_newline_parts_are_skipped_in_client_content() {
        let rendered = render(&LogEvent::ClientContent {
            parts: vec![
                Part::Text("Hi there".to_string()),
                Part::Text("\n".to_string()),
            ],
            turn_complete: true,
        });
        assert_eq!(
            rendered.blocks,
            vec![
                Block::Role("User".to_string()),
                Block::Text("Hi there".to_string())
            ]
        );
    }

    #[test]
    fn inline_data_shows_only_media_type() {
        let rendered = render(&LogEvent::ClientContent {
            parts: vec![Part::InlineData {
                mime_type: "image/png".to_string(),
            }],
            turn_complete: true,
        });
        assert_eq!(
            rendered.blocks,
            vec![
                Block::Role("User".to_string()),
                Block::Heading("Inline Data: image/png".to_string())
            ]
        );
    }

    #[test]
    fn incomplete_client_turn_gets_marker() {
        let rendered = render(&LogEvent::ClientContent {
            parts: vec![Part::Text("hi".to_string())],
            turn_complete: false,
        });
        assert_eq!(
            rendered.blocks.last(),
            Some(&Block::Note("turnComplete: false".to_string()))
        );
    }

    #[test]
    fn executable_code_lowercases_language() {
        let mut blocks = Vec::new();
        render_part(
            &Part::ExecutableCode {
                language: "PYTHON".to_string(),
                code: "print(1)".to_string(),
            },
            &mut blocks,
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading("executableCode: PYTHON".to_string()),
                Block::Code {
                    language: "python".to_string(),
                    body: "print(1)".to_string()
                }
            ]
        );
    }

    #[test]
    fn unknown_part_keeps_placeholder_slot() {
        let rendered = render(&LogEvent::ModelTurn {
            parts: vec![Part::Unknown, Part::Text("x".to_string())],
        });
        assert_eq!(rendered.blocks[1], Block::Placeholder);
        assert_eq!(rendered.blocks.len(), 3);
    }

    #[test]
    fn tool_call_dumps_each_call() {
        let rendered = render(&LogEvent::ToolCall {
            function_calls: vec![FunctionCall {
                id: Some("c1".to_string()),
                name: "lookup".to_string(),
                raw: json!({"id": "c1", "name": "lookup"}),
            }],
        });
        assert_eq!(
            rendered.blocks[0],
            Block::Heading("Function call: lookup".to_string())
        );
        match &rendered.blocks[1] {
            Block::Code { language, body } => {
                assert_eq!(language, "json");
                assert!(body.contains("\"name\": \"lookup\""));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn tool_response_dumps_payload_only() {
        let rendered = render(&LogEvent::ToolResponse {
            responses: vec![FunctionResponse {
                id: "c1".to_string(),
                response: json!({"ok": true}),
            }],
        });
        assert_eq!(
            rendered.lines(),
            vec!["Function Response: c1", "{", "  \"ok\": true", "}"]
        );
    }

    #[test]
    fn cancellation_line() {
        let rendered = render(&LogEvent::ToolCallCancellation {
            ids: vec!["a".to_string(), "b".to_string()],
        });
        assert_eq!(rendered.lines(), vec!["ids: \"a\" \"b\""]);
    }

    #[test]
    fn fixed_texts() {
        assert_eq!(render(&LogEvent::Interrupted).lines(), vec!["interrupted"]);
        assert_eq!(render(&LogEvent::TurnComplete).lines(), vec!["turnComplete"]);
    }
}
