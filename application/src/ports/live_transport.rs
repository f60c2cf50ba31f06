//! Live transport port
//!
//! Defines the interface to the real-time conversational API. The transport
//! owns the connection and the protocol log; the application only sends
//! text and consumes the events it cares about.

use async_trait::async_trait;
use livechat_domain::{ModelReply, RequestId, SessionSetup};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Not connected")]
    NotConnected,

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// Inbound events the conversation reacts to.
///
/// Other protocol traffic (tool calls, audio) only goes to the protocol log.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The remote session accepted the setup and is ready.
    SetupComplete,
    /// The model produced content. A turn may arrive as several chunks.
    Content(ModelReply),
    /// The model finished its turn for a request; no more content follows.
    TurnComplete(RequestId),
    /// The connection ended, with an optional reason.
    Closed(Option<String>),
}

/// Handle for receiving transport events.
///
/// Wraps an `mpsc::Receiver<TransportEvent>`.
pub struct TransportEvents {
    pub receiver: mpsc::Receiver<TransportEvent>,
}

impl TransportEvents {
    pub fn new(receiver: mpsc::Receiver<TransportEvent>) -> Self {
        Self { receiver }
    }

    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.receiver.recv().await
    }
}

/// Connection to the live API.
///
/// Sends are fire-and-forget: an `Ok` means the message left the client,
/// not that the model answered.
#[async_trait]
pub trait LiveTransport: Send + Sync {
    /// Open the session and return the inbound event stream.
    async fn connect(&self, setup: &SessionSetup) -> Result<TransportEvents, TransportError>;

    /// Send one text turn. `id` lets the transport tag replies with
    /// [`ModelReply::in_reply_to`] when it can correlate them.
    async fn send_text(&self, id: RequestId, text: &str) -> Result<(), TransportError>;

    /// Close the session.
    async fn disconnect(&self) -> Result<(), TransportError>;
}
