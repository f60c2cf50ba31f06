//! Scripted live transport.
//!
//! Plays back server messages from a JSONL script instead of talking to a
//! live endpoint. Line *n* of the script holds the server message (an object,
//! or an array of objects) sent in reply to the *n*-th outbound text:
//!
//! ```text
//! {"serverContent":{"modelTurn":{"parts":[{"text":"Hi! What's your name?"}]}}}
//! [{"serverContent":{"modelTurn":{"parts":[{"text":"Nice to meet you"}]}}},{"serverContent":{"turnComplete":true}}]
//! ```
//!
//! `setupComplete` is emitted as soon as the session is connected, and a
//! `serverContent.turnComplete` marker ends the turn of the request it
//! answers.
//!
//! A background task plays the server side. It owns the script and the
//! event sender, so `send_text` never blocks on the event channel:
//!
//! ```text
//! send_text ──(unbounded)──▶ server task ──(mpsc)──▶ TransportEvents
//!     │                          │
//!     └──── client.* records ────┴──── server.* records ────▶ LogWriter
//! ```

use async_trait::async_trait;
use livechat_application::ports::live_transport::{
    LiveTransport, TransportError, TransportEvent, TransportEvents,
};
use livechat_application::ports::log_store::LogWriter;
use livechat_domain::{LogRecord, ModelReply, Part, RequestId, SessionSetup};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const EVENT_BUFFER: usize = 64;

/// Errors when loading a replay script
#[derive(Error, Debug)]
pub enum ReplayScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {0} must hold an object or an array of objects")]
    NotAMessage(usize),
}

/// Server messages sent in reply to one outbound text.
pub type ReplayStep = Vec<Value>;

/// Parse a replay script. Blank lines are skipped.
pub fn parse_script(script: &str) -> Result<Vec<ReplayStep>, ReplayScriptError> {
    let mut steps = Vec::new();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| ReplayScriptError::Parse {
            line: line_no,
            source,
        })?;
        let step = match value {
            Value::Object(_) => vec![value],
            Value::Array(items) if items.iter().all(Value::is_object) => items,
            _ => return Err(ReplayScriptError::NotAMessage(line_no)),
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Log tag of a server message: `server.<first field>`, with
/// `serverContent` shortened to `server.content`.
fn server_tag(message: &Value) -> String {
    let field = message
        .as_object()
        .and_then(|map| map.keys().next())
        .map(String::as_str)
        .unwrap_or("message");
    match field {
        "serverContent" => "server.content".to_string(),
        other => format!("server.{}", other),
    }
}

/// Turn a server message into the events the controller cares about.
/// Tool traffic and audio only reach the log. A `serverContent` message may
/// carry a model turn, the end of the turn, or both.
fn to_events(message: &Value, id: RequestId) -> Vec<TransportEvent> {
    if message.get("setupComplete").is_some() {
        return vec![TransportEvent::SetupComplete];
    }
    let Some(content) = message.get("serverContent") else {
        return Vec::new();
    };

    let mut events = Vec::new();
    if let Some(model_turn) = content.get("modelTurn") {
        let parts = Part::list_from_value(model_turn.get("parts"));
        events.push(TransportEvent::Content(ModelReply::new(parts).in_reply_to(id)));
    }
    if content.get("turnComplete").and_then(Value::as_bool) == Some(true) {
        events.push(TransportEvent::TurnComplete(id));
    }
    events
}

struct Connection {
    outbound: mpsc::UnboundedSender<(RequestId, String)>,
    server: JoinHandle<()>,
}

/// [`LiveTransport`] that replays a script.
pub struct ReplayTransport {
    script: Vec<ReplayStep>,
    log: Arc<dyn LogWriter>,
    connection: Mutex<Option<Connection>>,
}

impl ReplayTransport {
    pub fn new(script: Vec<ReplayStep>, log: Arc<dyn LogWriter>) -> Self {
        Self {
            script,
            log,
            connection: Mutex::new(None),
        }
    }

    /// Load the script from a JSONL file.
    pub fn from_file(
        path: impl AsRef<Path>,
        log: Arc<dyn LogWriter>,
    ) -> Result<Self, ReplayScriptError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(parse_script(&content)?, log))
    }

    /// Number of scripted replies.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    fn take_connection(&self) -> Option<Connection> {
        self.connection.lock().ok().and_then(|mut c| c.take())
    }
}

#[async_trait]
impl LiveTransport for ReplayTransport {
    async fn connect(&self, setup: &SessionSetup) -> Result<TransportEvents, TransportError> {
        if let Some(previous) = self.take_connection() {
            debug!("Replacing existing replay connection");
            previous.server.abort();
        }

        self.log.append(LogRecord::new("client.open", "connected"));
        self.log.append(LogRecord::new("client.setup", setup.to_message()));

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let server = tokio::spawn(play_server(
            VecDeque::from(self.script.clone()),
            outbound_rx,
            event_tx,
            Arc::clone(&self.log),
        ));

        let mut connection = self
            .connection
            .lock()
            .map_err(|_| TransportError::ConnectionError("connection state poisoned".into()))?;
        *connection = Some(Connection {
            outbound: outbound_tx,
            server,
        });

        info!("Replay session connected ({} scripted replies)", self.script.len());
        Ok(TransportEvents::new(event_rx))
    }

    async fn send_text(&self, id: RequestId, text: &str) -> Result<(), TransportError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| TransportError::SendFailed("connection state poisoned".into()))?;
        let connection = connection.as_ref().ok_or(TransportError::NotConnected)?;

        self.log.append(LogRecord::new(
            "client.send",
            json!({"turns": [{"text": text}], "turnComplete": true}),
        ));

        connection
            .outbound
            .send((id, text.to_string()))
            .map_err(|_| TransportError::TransportClosed)
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        let connection = self.take_connection().ok_or(TransportError::NotConnected)?;
        // Closing the outbound side lets the server task finish on its own
        drop(connection.outbound);
        let _ = connection.server.await;
        self.log.append(LogRecord::new("client.close", "disconnected"));
        Ok(())
    }
}

async fn play_server(
    mut script: VecDeque<ReplayStep>,
    mut outbound: mpsc::UnboundedReceiver<(RequestId, String)>,
    events: mpsc::Sender<TransportEvent>,
    log: Arc<dyn LogWriter>,
) {
    log.append(LogRecord::new("server.setupComplete", json!({"setupComplete": {}})));
    if events.send(TransportEvent::SetupComplete).await.is_err() {
        return;
    }

    while let Some((id, _text)) = outbound.recv().await {
        let Some(step) = script.pop_front() else {
            debug!("Replay script exhausted, no reply to {}", id);
            continue;
        };

        for message in step {
            let replies = to_events(&message, id);
            log.append(LogRecord::new(server_tag(&message), message));
            for event in replies {
                if events.send(event).await.is_err() {
                    debug!("Event receiver dropped, stopping replay");
                    return;
                }
            }
        }
    }

    let _ = events
        .send(TransportEvent::Closed(Some("client disconnected".into())))
        .await;
}
