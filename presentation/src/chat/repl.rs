//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! ```text
//! input thread (reedline, blocking)        conversation task
//!   ├─ chat text / commands ── actions ──▶ ConversationController::run
//!   └─ /logs ──▶ LogViewUseCase                 └─▶ ConsoleObserver (stdout)
//! ```

use super::command::{HELP, ReplInput, parse_line};
use super::observer::ConsoleObserver;
use crate::output::console::ConsoleLogFormatter;
use chrono::Local;
use colored::Colorize;
use livechat_application::{ConversationController, ConversationError, LogViewUseCase, UserAction};
use livechat_domain::ConversationSession;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const ACTION_BUFFER: usize = 32;
const HISTORY_SIZE: usize = 500;

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ConversationController,
    log_view: LogViewUseCase,
    model: String,
}

impl ChatRepl {
    /// Create a new ChatRepl. The controller gets a console observer.
    pub fn new(
        controller: ConversationController,
        log_view: LogViewUseCase,
        model: impl Into<String>,
    ) -> Self {
        Self {
            controller: controller.with_observer(Arc::new(ConsoleObserver)),
            log_view,
            model: model.into(),
        }
    }

    /// Run the interactive REPL until the user quits.
    pub async fn run(self) -> Result<ConversationSession, ConversationError> {
        let events = self.controller.connect().await?;
        Self::print_welcome(&self.model);

        let (tx, rx) = mpsc::channel(ACTION_BUFFER);
        let log_view = self.log_view;
        let input = tokio::task::spawn_blocking(move || input_loop(tx, log_view));

        let session = self.controller.run(events, rx).await;
        if let Err(e) = input.await {
            warn!("Input thread ended abnormally: {}", e);
        }
        Ok(session)
    }

    fn print_welcome(model: &str) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              livechat - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", model);
        println!();
        println!("{}", HELP);
        println!();
    }
}

fn history_path() -> Option<std::path::PathBuf> {
    let path = dirs::data_dir()?.join("livechat").join("history.txt");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn editor() -> Reedline {
    let editor = Reedline::create();
    match history_path().map(|path| FileBackedHistory::with_file(HISTORY_SIZE, path)) {
        Some(Ok(history)) => editor.with_history(Box::new(history)),
        Some(Err(e)) => {
            debug!("History unavailable: {}", e);
            editor
        }
        None => editor,
    }
}

/// Blocking read loop. Ends when the user quits or the conversation task is
/// gone.
fn input_loop(tx: mpsc::Sender<UserAction>, mut log_view: LogViewUseCase) {
    let mut editor = editor();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("livechat".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => match parse_line(&line) {
                ReplInput::Action(action) => {
                    let quit = action == UserAction::Quit;
                    if tx.blocking_send(action).is_err() || quit {
                        break;
                    }
                }
                ReplInput::Logs(filter) => {
                    if let Some(filter) = filter {
                        log_view.set_filter(filter);
                    }
                    println!(
                        "{} {}",
                        "Log filter:".cyan().bold(),
                        log_view.filter()
                    );
                    print!(
                        "{}",
                        ConsoleLogFormatter::format_entries(&log_view.entries(&Local))
                    );
                }
                ReplInput::Help => println!("{}", HELP),
                ReplInput::Unknown(command) => {
                    println!("Unknown command: {}", command);
                    println!("Type /help for available commands");
                }
            },
            Ok(Signal::CtrlC) => {
                println!("^C");
            }
            Ok(Signal::CtrlD) => {
                println!("Bye!");
                let _ = tx.blocking_send(UserAction::Quit);
                break;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                let _ = tx.blocking_send(UserAction::Quit);
                break;
            }
        }
    }
}
