//! # Program Driver
//!
//! A single-threaded loop that processes one [`Msg`] at a time from a FIFO
//! queue. Terminal events are read only when the queue is empty, so
//! everything a message enqueues is handled before the next key press.
//!
//! ## The edit sequence
//!
//! ```text
//! Key(Enter) ─► BrowseView::handle_key ─► Command::Edit(bundle)
//!                                              │
//!                     EditSession::edit  ◄─────┘   (blocks while the editor runs)
//!                          │
//!          Changed ──► HostApp::restart
//!                          │
//!    enqueue: [Notice | Error]  Redraw  HideCursor
//!                                  │
//!                     Redraw ─► Resize(last size) ─► full repaint
//! ```
//!
//! The editor leaves the terminal in its normal scroll-buffer state and the
//! UI's back buffer no longer matches the screen. Re-injecting the last
//! known size forces a layout pass and a complete repaint.
//!
//! ## Errors
//!
//! Errors from an edit or a restart become a transient status line and the
//! loop carries on. Only terminal I/O failures end the loop.

pub mod browse;
pub mod render;
pub mod terminal;
pub mod theme;

use crate::editor::Editor;
use crate::error::{EdistError, Result};
use crate::host::HostApp;
use crate::model::NoteBundle;
use crate::session::EditSession;
use browse::{BrowseView, Command};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use terminal::{Console, Tui};
use theme::Theme;

const STATUS_LIFETIME: Duration = Duration::from_secs(3);
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Repaint everything from scratch
    Redraw,
    HideCursor,
    Error(String),
    Notice(String),
    Tick,
}

impl Msg {
    /// Maps a terminal event to a message. Key releases and events the
    /// browser doesn't use are dropped.
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
            Event::Resize(width, height) => Some(Msg::Resize { width, height }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
    pub shown_at: Instant,
}

impl Status {
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Notice,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= STATUS_LIFETIME
    }
}

/// Everything the UI shows. Only [`App::update`] changes it.
pub struct ProgramState {
    /// Owns the catalog, the filter and the selection
    pub view: BrowseView,
    pub size: Option<(u16, u16)>,
    pub status: Option<Status>,
}

impl ProgramState {
    pub fn new(catalog: Vec<NoteBundle>) -> Self {
        Self {
            view: BrowseView::new(catalog),
            size: None,
            status: None,
        }
    }
}

pub struct App<E, H> {
    state: ProgramState,
    session: EditSession<E>,
    host: H,
    queue: VecDeque<Msg>,
    should_quit: bool,
}

impl<E: Editor, H: HostApp> App<E, H> {
    pub fn new(catalog: Vec<NoteBundle>, session: EditSession<E>, host: H) -> Self {
        Self {
            state: ProgramState::new(catalog),
            session,
            host,
            queue: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn push(&mut self, msg: Msg) {
        self.queue.push_back(msg);
    }

    pub fn next_message(&mut self) -> Option<Msg> {
        self.queue.pop_front()
    }

    /// Runs the browser until the user quits.
    pub fn run(&mut self, tui: &mut Tui, theme: &Theme) -> Result<()> {
        let (width, height) = tui.size()?;
        self.push(Msg::Resize { width, height });

        loop {
            while let Some(msg) = self.next_message() {
                self.update(msg, tui)?;
                if self.should_quit {
                    return Ok(());
                }
            }

            tui.draw(|frame| render::draw(frame, &self.state, theme))?;

            let msg = if event::poll(TICK_RATE).map_err(EdistError::Terminal)? {
                Msg::from_event(event::read().map_err(EdistError::Terminal)?)
            } else {
                Some(Msg::Tick)
            };
            if let Some(msg) = msg {
                self.push(msg);
            }
        }
    }

    /// Handles one message. Follow-up messages go to the back of the queue.
    pub fn update<C>(&mut self, msg: Msg, console: &mut C) -> Result<()>
    where
        C: Console + ?Sized,
    {
        match msg {
            Msg::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.should_quit = true;
                    return Ok(());
                }
                match self.state.view.handle_key(key) {
                    Command::None => {}
                    Command::Quit => self.should_quit = true,
                    Command::Edit(bundle) => self.edit(&bundle, console)?,
                }
            }
            Msg::Resize { width, height } => {
                self.state.size = Some((width, height));
                self.state
                    .view
                    .set_viewport(render::entries_for(width, height));
                console.resize(width, height)?;
            }
            Msg::Redraw => {
                let (width, height) = match self.state.size {
                    Some(size) => size,
                    None => console.size()?,
                };
                self.push(Msg::Resize { width, height });
            }
            Msg::HideCursor => console.hide_cursor()?,
            Msg::Error(text) => self.state.status = Some(Status::error(text)),
            Msg::Notice(text) => self.state.status = Some(Status::notice(text)),
            Msg::Tick => {
                if self
                    .state
                    .status
                    .as_ref()
                    .is_some_and(|s| s.expired(Instant::now()))
                {
                    self.state.status = None;
                }
            }
        }
        Ok(())
    }

    fn edit<C>(&mut self, bundle: &NoteBundle, console: &mut C) -> Result<()>
    where
        C: Console + ?Sized,
    {
        let name = bundle.display_name();
        match self.session.edit(bundle, console) {
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(note = name, error = %e, "edit failed");
                self.push(Msg::Error(e.to_string()));
            }
            Ok(outcome) if !outcome.is_changed() => {
                self.push(Msg::Notice(format!("No changes to {}", name)));
            }
            Ok(_) => match self.host.restart() {
                Ok(()) => self.push(Msg::Notice(format!(
                    "Saved {}, restarted {}",
                    name,
                    self.host.name()
                ))),
                Err(e) => {
                    tracing::warn!(host = self.host.name(), error = %e, "restart failed");
                    self.push(Msg::Error(e.to_string()));
                }
            },
        }
        self.push(Msg::Redraw);
        self.push(Msg::HideCursor);
        Ok(())
    }
}
