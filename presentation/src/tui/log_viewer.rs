//! Full-screen log viewer
//!
//! Shows a [`LogViewUseCase`] projection and redraws when the log changes.
//! Filter and coalescing can be switched while browsing.

use super::keys::{KeyHandler, ViewerKey};
use super::state::{LogPane, next_filter};
use super::terminal;
use super::widgets::{LogLayout, log_list::LogListWidget, status_bar::StatusBarWidget};
use chrono::Local;
use crossterm::event::{Event, EventStream};
use futures::stream::StreamExt;
use livechat_application::LogViewUseCase;
use ratatui::style::Color;
use std::io;

const PAGE: usize = 20;
const HINTS: &str = "j/k:scroll  PgUp/PgDn:page  f:filter  c:coalesce  q:quit";

pub struct LogViewer {
    view: LogViewUseCase,
    pane: LogPane,
}

impl LogViewer {
    pub fn new(view: LogViewUseCase) -> Self {
        let mut viewer = Self {
            view,
            pane: LogPane::default(),
        };
        viewer.refresh();
        viewer
    }

    pub fn pane(&self) -> &LogPane {
        &self.pane
    }

    pub async fn run(mut self) -> io::Result<()> {
        let mut log_changes = self.view.subscribe();
        let mut term = terminal::setup()?;
        let mut event_stream = EventStream::new();

        let result = loop {
            if let Err(e) = term.draw(|frame| {
                let layout = LogLayout::compute(frame.area());
                frame.render_widget(LogListWidget::new(&self.pane), layout.log);
                frame.render_widget(
                    StatusBarWidget::new("LOG", Color::Cyan, HINTS),
                    layout.status_bar,
                );
            }) {
                break Err(e);
            }

            tokio::select! {
                Some(Ok(term_event)) = event_stream.next() => {
                    if let Event::Key(key) = term_event
                        && !self.handle_key(KeyHandler::viewer(key))
                    {
                        break Ok(());
                    }
                }

                Ok(()) = log_changes.changed() => self.refresh(),

                else => break Ok(()),
            }
        };

        terminal::restore(&mut term)?;
        result
    }

    /// Apply a key. Returns false when the viewer should close.
    fn handle_key(&mut self, key: ViewerKey) -> bool {
        match key {
            ViewerKey::Quit => return false,
            ViewerKey::ScrollUp => self.pane.scroll_up(1),
            ViewerKey::ScrollDown => self.pane.scroll_down(1),
            ViewerKey::PageUp => self.pane.scroll_up(PAGE),
            ViewerKey::PageDown => self.pane.scroll_down(PAGE),
            ViewerKey::CycleFilter => {
                self.view.set_filter(next_filter(self.view.filter()));
                self.pane.scroll = 0;
                self.refresh();
            }
            ViewerKey::ToggleCoalesce => {
                self.view.set_coalesce(!self.view.coalesce());
                self.refresh();
            }
            ViewerKey::None => {}
        }
        true
    }

    fn refresh(&mut self) {
        self.pane.filter = self.view.filter();
        self.pane.coalesce = self.view.coalesce();
        self.pane.entries = self.view.entries(&Local);
    }
}
