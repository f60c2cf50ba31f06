//! Chat TUI: transcript, live protocol log and input on one screen
//!
//! Architecture:
//! ```text
//! ChatTui (select! loop)                conversation task (tokio::spawn)
//!   ├─ crossterm EventStream              └─ ConversationController::run
//!   ├─ ui_rx (UiEvent from observer)           ├─ TransportEvents
//!   └─ log watch (LogReader changes)           └─ action_rx
//!        └── action_tx ────────────────>───────┘
//! ```

use super::event::ChannelObserver;
use super::keys::{ChatKey, KeyHandler};
use super::state::{ChatState, next_filter};
use super::terminal;
use super::widgets::{
    ChatLayout, input::InputWidget, log_list::LogListWidget, status_bar::StatusBarWidget,
    transcript::TranscriptWidget,
};
use crate::chat::command::{ReplInput, parse_line};
use chrono::Local;
use crossterm::event::{Event, EventStream};
use futures::stream::StreamExt;
use livechat_application::{ConversationController, ConversationError, LogViewUseCase, UserAction};
use livechat_domain::ConversationSession;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

const ACTION_BUFFER: usize = 32;
const LOG_SCROLL_STEP: usize = 5;
const SHORT_HELP: &str = "/end  /export  /logs [tools|conversations|none]  /quit";

/// Errors that end the TUI
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error("Conversation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Full-screen chat
pub struct ChatTui {
    controller: ConversationController,
    log_view: LogViewUseCase,
}

impl ChatTui {
    pub fn new(controller: ConversationController, log_view: LogViewUseCase) -> Self {
        Self {
            controller,
            log_view,
        }
    }

    /// Run until the user quits. Returns the final conversation state.
    pub async fn run(self) -> Result<ConversationSession, TuiError> {
        let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
        let controller = self
            .controller
            .with_observer(Arc::new(ChannelObserver::new(ui_tx)));
        let mut log_view = self.log_view;

        let events = controller.connect().await?;
        let (action_tx, action_rx) = mpsc::channel(ACTION_BUFFER);
        let conversation = tokio::spawn(controller.run(events, action_rx));

        let mut state = ChatState::new();
        state.log.filter = log_view.filter();
        state.log.coalesce = log_view.coalesce();
        state.log.entries = log_view.entries(&Local);
        let mut log_changes = log_view.subscribe();

        let mut term = terminal::setup()?;
        let mut event_stream = EventStream::new();

        let result = loop {
            if let Err(e) = term.draw(|frame| Self::render(frame, &state)) {
                break Err(e);
            }

            if state.should_quit {
                break Ok(());
            }

            tokio::select! {
                Some(Ok(term_event)) = event_stream.next() => {
                    if let Event::Key(key) = term_event {
                        let action = Self::handle_key(&mut state, &mut log_view, KeyHandler::chat(key));
                        if let Some(action) = action
                            && action_tx.send(action).await.is_err()
                        {
                            debug!("Conversation task is gone");
                            state.should_quit = true;
                        }
                    }
                }

                Some(ui_event) = ui_rx.recv() => state.apply(ui_event),

                Ok(()) = log_changes.changed() => {
                    state.log.entries = log_view.entries(&Local);
                }

                else => break Ok(()),
            }
        };

        terminal::restore(&mut term)?;
        result?;

        let _ = action_tx.send(UserAction::Quit).await;
        drop(action_tx);
        Ok(conversation.await?)
    }

    fn render(frame: &mut ratatui::Frame, state: &ChatState) {
        let layout = ChatLayout::compute(frame.area());
        frame.render_widget(TranscriptWidget::new(state), layout.transcript);
        frame.render_widget(LogListWidget::new(&state.log), layout.log);
        frame.render_widget(InputWidget::new(state), layout.input);
        frame.render_widget(
            StatusBarWidget::for_phase(state.phase, state.flash.as_deref()),
            layout.status_bar,
        );
    }

    /// Apply a key to the screen state; returns the action for the
    /// conversation, if any.
    fn handle_key(
        state: &mut ChatState,
        log_view: &mut LogViewUseCase,
        key: ChatKey,
    ) -> Option<UserAction> {
        match key {
            ChatKey::InsertChar(c) => state.input.push(c),
            ChatKey::DeleteChar => {
                state.input.pop();
            }
            ChatKey::CycleFilter => {
                log_view.set_filter(next_filter(log_view.filter()));
                Self::refresh_log(state, log_view);
            }
            ChatKey::LogUp => state.log.scroll_up(LOG_SCROLL_STEP),
            ChatKey::LogDown => state.log.scroll_down(LOG_SCROLL_STEP),
            ChatKey::Quit => {
                state.should_quit = true;
            }
            ChatKey::Submit => {
                let line = state.take_input();
                state.flash = None;
                match parse_line(&line) {
                    ReplInput::Action(UserAction::Quit) => state.should_quit = true,
                    ReplInput::Action(action) => return Some(action),
                    ReplInput::Logs(filter) => {
                        if let Some(filter) = filter {
                            log_view.set_filter(filter);
                        }
                        Self::refresh_log(state, log_view);
                    }
                    ReplInput::Help => state.flash = Some(SHORT_HELP.to_string()),
                    ReplInput::Unknown(command) => {
                        state.flash = Some(format!("Unknown command: {}", command));
                    }
                }
            }
            ChatKey::None => {}
        }
        None
    }

    fn refresh_log(state: &mut ChatState, log_view: &LogViewUseCase) {
        state.log.filter = log_view.filter();
        state.log.scroll = 0;
        state.log.entries = log_view.entries(&Local);
    }
}
