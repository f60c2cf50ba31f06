//! Scripted prompts driving the conversation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a friendly companion for casual conversation. \
Start by greeting the user and asking for their name before continuing the chat. \
When asked to end, provide a short evaluation of the conversation.";

pub const DEFAULT_GREETING_PROMPT: &str =
    "Please greet the user and ask for their name to start the conversation.";

pub const DEFAULT_EVALUATION_PROMPT: &str =
    "Please provide a brief evaluation of this conversation and conclude.";

/// The fixed texts the session sends on its own behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedPrompts {
    /// Sent once the transport reports the session is ready.
    pub greeting: String,
    /// Sent when the user ends the conversation.
    pub evaluation: String,
}

impl Default for ScriptedPrompts {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING_PROMPT.to_string(),
            evaluation: DEFAULT_EVALUATION_PROMPT.to_string(),
        }
    }
}

pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash-exp";

/// Parameters sent to the transport when the session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSetup {
    pub model: String,
    pub system_instruction: String,
}

impl Default for SessionSetup {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl SessionSetup {
    /// The setup message in the live API's JSON shape.
    pub fn to_message(&self) -> serde_json::Value {
        serde_json::json!({
            "setup": {
                "model": self.model,
                "systemInstruction": {
                    "parts": [{ "text": self.system_instruction }]
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_message_shape() {
        let setup = SessionSetup::default();
        let msg = setup.to_message();
        assert_eq!(msg["setup"]["model"], DEFAULT_MODEL);
        assert_eq!(
            msg["setup"]["systemInstruction"]["parts"][0]["text"],
            DEFAULT_SYSTEM_INSTRUCTION
        );
    }
}
