//! Conversation use case.
//!
//! Connects a [`ConversationSession`] to a [`LiveTransport`]: transport
//! events and user actions are applied to the session one at a time, and
//! whatever the session wants sent is handed to the transport.
//!
//! ```text
//! TransportEvents ──┐
//!                   ├─▶ ConversationController ──▶ LiveTransport::send_text
//! UserAction chan ──┘            │
//!                                └─▶ ConversationObserver (presentation)
//! ```

use crate::config::ConversationConfig;
use crate::ports::conversation_observer::{ConversationObserver, NoConversationObserver};
use crate::ports::live_transport::{LiveTransport, TransportError, TransportEvent, TransportEvents};
use crate::ports::transcript_exporter::{ExportError, ExportReceipt, TranscriptExporter};
use livechat_domain::{
    ConversationPhase, ConversationSession, DomainError, Outbound, ReplyOutcome, RequestId,
    SessionSetup,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors that can occur while running a conversation.
#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Actions originating from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(String),
    End,
    Export,
    Quit,
}

/// Drives one conversation from setup to export.
pub struct ConversationController {
    transport: Arc<dyn LiveTransport>,
    exporter: Arc<dyn TranscriptExporter>,
    observer: Arc<dyn ConversationObserver>,
    setup: SessionSetup,
    session: ConversationSession,
}

impl ConversationController {
    pub fn new(
        transport: Arc<dyn LiveTransport>,
        exporter: Arc<dyn TranscriptExporter>,
        config: ConversationConfig,
    ) -> Self {
        Self {
            transport,
            exporter,
            observer: Arc::new(NoConversationObserver),
            setup: config.setup,
            session: ConversationSession::new(config.prompts),
        }
    }

    /// Create with an observer.
    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn phase(&self) -> ConversationPhase {
        self.session.phase()
    }

    /// Open the transport session.
    pub async fn connect(&self) -> Result<TransportEvents, ConversationError> {
        info!("Connecting live session (model: {})", self.setup.model);
        Ok(self.transport.connect(&self.setup).await?)
    }

    /// Apply one transport event.
    pub async fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::SetupComplete => match self.session.on_setup_complete() {
                Ok(outbound) => {
                    self.observer.on_phase_changed(self.session.phase());
                    self.dispatch(outbound).await;
                }
                Err(e) => debug!("Ignoring setup signal: {}", e),
            },
            TransportEvent::Content(reply) => match self.session.on_reply(&reply) {
                ReplyOutcome::Appended(entry) => self.observer.on_transcript_entry(&entry),
                ReplyOutcome::Evaluated(evaluation) => {
                    info!("Conversation concluded");
                    self.observer.on_evaluation(&evaluation);
                    self.observer.on_phase_changed(self.session.phase());
                }
                ReplyOutcome::Dropped(reason) => debug!(?reason, "Reply dropped"),
            },
            TransportEvent::TurnComplete(id) => {
                if !self.session.on_turn_complete(id) {
                    debug!(%id, "Turn complete for a request that is not pending");
                }
            }
            TransportEvent::Closed(reason) => {
                info!(
                    "Transport closed: {}",
                    reason.as_deref().unwrap_or("no reason given")
                );
            }
        }
    }

    /// Submit user text. Blank input is ignored silently.
    pub async fn submit(&mut self, input: &str) -> Result<RequestId, DomainError> {
        match self.session.submit(input) {
            Ok(outbound) => {
                if let Some(entry) = self.session.transcript().last() {
                    self.observer.on_transcript_entry(entry);
                }
                let id = outbound.id;
                self.dispatch(outbound).await;
                Ok(id)
            }
            Err(e) => {
                if !e.is_ignorable() {
                    self.observer.on_rejected(&e);
                }
                Err(e)
            }
        }
    }

    /// End the conversation and request the evaluation.
    pub async fn end(&mut self) -> Result<RequestId, DomainError> {
        match self.session.end() {
            Ok(outbound) => {
                self.observer.on_phase_changed(self.session.phase());
                let id = outbound.id;
                self.dispatch(outbound).await;
                Ok(id)
            }
            Err(e) => {
                self.observer.on_rejected(&e);
                Err(e)
            }
        }
    }

    /// Hand the concluded transcript to the exporter.
    pub fn export(&self) -> Result<ExportReceipt, ConversationError> {
        let document = self.session.document().inspect_err(|e| {
            self.observer.on_rejected(e);
        })?;
        match self.exporter.export(&document) {
            Ok(receipt) => {
                info!("Transcript exported to {}", receipt.location);
                self.observer.on_exported(&receipt);
                Ok(receipt)
            }
            Err(e) => {
                warn!("Transcript export failed: {}", e);
                self.observer.on_export_failed(&e);
                Err(e.into())
            }
        }
    }

    /// Process events and actions until the user quits or the action
    /// channel closes. Each event or action is applied completely before the
    /// next one is taken.
    pub async fn run(
        mut self,
        mut events: TransportEvents,
        mut actions: mpsc::Receiver<UserAction>,
    ) -> ConversationSession {
        let mut events_open = true;

        loop {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        debug!("Transport event stream ended");
                        events_open = false;
                    }
                },
                action = actions.recv() => match action {
                    Some(UserAction::Submit(text)) => {
                        let _ = self.submit(&text).await;
                    }
                    Some(UserAction::End) => {
                        let _ = self.end().await;
                    }
                    Some(UserAction::Export) => {
                        let _ = self.export();
                    }
                    Some(UserAction::Quit) | None => break,
                },
            }
        }

        drop(events);
        if let Err(e) = self.transport.disconnect().await {
            debug!("Disconnect failed: {}", e);
        }
        self.session
    }

    async fn dispatch(&self, outbound: Outbound) {
        debug!(id = %outbound.id, kind = ?outbound.kind, "Sending prompt");
        if let Err(e) = self.transport.send_text(outbound.id, &outbound.text).await {
            warn!("Send of {} failed: {}", outbound.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use livechat_domain::{
        ConversationDocument, ModelReply, Speaker, TranscriptEntry,
        conversation::prompts::{DEFAULT_EVALUATION_PROMPT, DEFAULT_GREETING_PROMPT},
    };
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockTransport {
        sent: Mutex<Vec<(RequestId, String)>>,
        fail_sends: bool,
        events: Mutex<Option<mpsc::Receiver<TransportEvent>>>,
    }

    impl MockTransport {
        fn failing() -> Self {
            Self {
                fail_sends: true,
                ..Self::default()
            }
        }

        fn with_events(receiver: mpsc::Receiver<TransportEvent>) -> Self {
            Self {
                events: Mutex::new(Some(receiver)),
                ..Self::default()
            }
        }

        fn sent_texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, t)| t.clone())
                .collect()
        }
    }

    #[async_trait]
    impl LiveTransport for MockTransport {
        async fn connect(&self, _setup: &SessionSetup) -> Result<TransportEvents, TransportError> {
            self.events
                .lock()
                .unwrap()
                .take()
                .map(TransportEvents::new)
                .ok_or(TransportError::ConnectionError("no events".to_string()))
        }

        async fn send_text(&self, id: RequestId, text: &str) -> Result<(), TransportError> {
            if self.fail_sends {
                return Err(TransportError::SendFailed("offline".to_string()));
            }
            self.sent.lock().unwrap().push((id, text.to_string()));
            Ok(())
        }

        async fn disconnect(&self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockExporter {
        exported: Mutex<Vec<ConversationDocument>>,
    }

    impl TranscriptExporter for MockExporter {
        fn export(&self, document: &ConversationDocument) -> Result<ExportReceipt, ExportError> {
            self.exported.lock().unwrap().push(document.clone());
            Ok(ExportReceipt {
                location: "memory".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        entries: Mutex<Vec<TranscriptEntry>>,
        evaluation: Mutex<Option<String>>,
        rejected: Mutex<usize>,
    }

    impl ConversationObserver for RecordingObserver {
        fn on_transcript_entry(&self, entry: &TranscriptEntry) {
            self.entries.lock().unwrap().push(entry.clone());
        }

        fn on_evaluation(&self, evaluation: &str) {
            *self.evaluation.lock().unwrap() = Some(evaluation.to_string());
        }

        fn on_rejected(&self, _error: &DomainError) {
            *self.rejected.lock().unwrap() += 1;
        }
    }

    fn controller(
        transport: Arc<MockTransport>,
        exporter: Arc<MockExporter>,
    ) -> ConversationController {
        ConversationController::new(transport, exporter, ConversationConfig::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn end_to_end_scenario() {
        let transport = Arc::new(MockTransport::default());
        let exporter = Arc::new(MockExporter::default());
        let observer = Arc::new(RecordingObserver::default());
        let mut ctl = controller(transport.clone(), exporter.clone()).with_observer(observer.clone());

        ctl.handle_event(TransportEvent::SetupComplete).await;
        assert_eq!(transport.sent_texts(), vec![DEFAULT_GREETING_PROMPT]);
        assert!(ctl.session().transcript().is_empty());

        ctl.submit("Hi, I'm Sam").await.unwrap();
        assert_eq!(
            ctl.session().transcript(),
            &[TranscriptEntry::user("Hi, I'm Sam")]
        );

        ctl.handle_event(TransportEvent::Content(ModelReply::from_text("Hello Sam!")))
            .await;
        assert_eq!(
            ctl.session().transcript(),
            &[
                TranscriptEntry::user("Hi, I'm Sam"),
                TranscriptEntry::assistant("Hello Sam!")
            ]
        );

        ctl.end().await.unwrap();
        assert_eq!(transport.sent_texts().len(), 3);
        assert_eq!(transport.sent_texts()[2], DEFAULT_EVALUATION_PROMPT);

        ctl.handle_event(TransportEvent::Content(ModelReply::from_text("Great chat!")))
            .await;
        assert_eq!(ctl.session().evaluation(), Some("Great chat!"));
        assert_eq!(ctl.session().transcript().len(), 2);
        assert_eq!(ctl.phase(), ConversationPhase::Concluded);

        // Input is disabled and nothing more is sent.
        assert!(ctl.submit("one more thing").await.is_err());
        assert_eq!(transport.sent_texts().len(), 3);

        let receipt = ctl.export().unwrap();
        assert_eq!(receipt.location, "memory");
        let exported = exporter.exported.lock().unwrap();
        assert_eq!(exported[0].entries.len(), 2);
        assert_eq!(exported[0].evaluation, "Great chat!");

        assert_eq!(observer.entries.lock().unwrap().len(), 2);
        assert_eq!(
            observer.evaluation.lock().unwrap().as_deref(),
            Some("Great chat!")
        );
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let transport = Arc::new(MockTransport::default());
        let observer = Arc::new(RecordingObserver::default());
        let mut ctl = controller(transport.clone(), Arc::new(MockExporter::default()))
            .with_observer(observer.clone());
        ctl.handle_event(TransportEvent::SetupComplete).await;

        assert_eq!(ctl.submit("   ").await, Err(DomainError::BlankInput));
        assert_eq!(transport.sent_texts().len(), 1);
        assert!(ctl.session().transcript().is_empty());
        assert_eq!(*observer.rejected.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_setup_signal_sends_one_greeting() {
        let transport = Arc::new(MockTransport::default());
        let mut ctl = controller(transport.clone(), Arc::new(MockExporter::default()));
        ctl.handle_event(TransportEvent::SetupComplete).await;
        ctl.handle_event(TransportEvent::SetupComplete).await;
        assert_eq!(transport.sent_texts().len(), 1);
    }

    #[tokio::test]
    async fn send_failure_does_not_roll_back() {
        let transport = Arc::new(MockTransport::failing());
        let mut ctl = controller(transport.clone(), Arc::new(MockExporter::default()));
        ctl.handle_event(TransportEvent::SetupComplete).await;
        assert_eq!(ctl.phase(), ConversationPhase::Active);

        ctl.submit("hello").await.unwrap();
        assert_eq!(ctl.session().transcript().len(), 1);
    }

    #[tokio::test]
    async fn export_before_conclusion_is_rejected() {
        let exporter = Arc::new(MockExporter::default());
        let ctl = controller(Arc::new(MockTransport::default()), exporter.clone());
        assert!(matches!(
            ctl.export(),
            Err(ConversationError::Domain(DomainError::NotConcluded))
        ));
        assert!(exporter.exported.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn correlated_replies_use_request_ids() {
        let transport = Arc::new(MockTransport::default());
        let mut ctl = controller(transport.clone(), Arc::new(MockExporter::default()));
        ctl.handle_event(TransportEvent::SetupComplete).await;
        let turn = ctl.submit("question").await.unwrap();
        let eval = ctl.end().await.unwrap();

        ctl.handle_event(TransportEvent::Content(
            ModelReply::from_text("late answer").in_reply_to(turn),
        ))
        .await;
        assert_eq!(ctl.phase(), ConversationPhase::AwaitingEvaluation);
        assert_eq!(ctl.session().transcript()[1].speaker, Speaker::Assistant);

        ctl.handle_event(TransportEvent::Content(
            ModelReply::from_text("verdict").in_reply_to(eval),
        ))
        .await;
        assert_eq!(ctl.session().evaluation(), Some("verdict"));

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[1].0, turn);
        assert_eq!(sent[2].0, eval);
    }

    #[tokio::test]
    async fn turn_complete_closes_the_request() {
        let transport = Arc::new(MockTransport::default());
        let mut ctl = controller(transport.clone(), Arc::new(MockExporter::default()));
        ctl.handle_event(TransportEvent::SetupComplete).await;
        let turn = ctl.submit("Hi").await.unwrap();

        for chunk in ["Hello", "there"] {
            ctl.handle_event(TransportEvent::Content(
                ModelReply::from_text(chunk).in_reply_to(turn),
            ))
            .await;
        }
        ctl.handle_event(TransportEvent::TurnComplete(turn)).await;
        assert!(!ctl.session().is_pending(turn));

        ctl.handle_event(TransportEvent::Content(
            ModelReply::from_text("Hello").in_reply_to(turn),
        ))
        .await;
        assert_eq!(ctl.session().transcript().len(), 3);
        assert_eq!(ctl.phase(), ConversationPhase::Active);
    }

    #[tokio::test]
    async fn run_loop_processes_events_and_actions() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (action_tx, action_rx) = mpsc::channel(8);
        let transport = Arc::new(MockTransport::with_events(event_rx));
        let exporter = Arc::new(MockExporter::default());
        let ctl = controller(transport.clone(), exporter.clone());

        let events = ctl.connect().await.unwrap();
        let handle = tokio::spawn(ctl.run(events, action_rx));

        event_tx.send(TransportEvent::SetupComplete).await.unwrap();
        // Give the loop a chance to apply setup before the user types.
        while transport.sent_texts().is_empty() {
            tokio::task::yield_now().await;
        }
        action_tx
            .send(UserAction::Submit("Hi".to_string()))
            .await
            .unwrap();
        action_tx.send(UserAction::End).await.unwrap();
        while transport.sent_texts().len() < 3 {
            tokio::task::yield_now().await;
        }
        event_tx
            .send(TransportEvent::Content(ModelReply::from_text("Nice.")))
            .await
            .unwrap();
        drop(event_tx);

        // Wait until the evaluation has been applied, then export and quit.
        loop {
            tokio::task::yield_now().await;
            action_tx.send(UserAction::Export).await.unwrap();
            tokio::task::yield_now().await;
            if !exporter.exported.lock().unwrap().is_empty() {
                break;
            }
        }
        action_tx.send(UserAction::Quit).await.unwrap();

        let session = handle.await.unwrap();
        assert_eq!(session.phase(), ConversationPhase::Concluded);
        assert_eq!(session.evaluation(), Some("Nice."));
        assert_eq!(session.transcript(), &[TranscriptEntry::user("Hi")]);
    }
}
