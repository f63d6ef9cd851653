//! Chat view state machine.
//!
//! Pure state machine: consumes [`AppEvent`] inputs and produces
//! [`AppAction`] instructions for the runtime to execute. No I/O
//! dependencies, fully testable without a terminal or a socket.
//!
//! # Responsibilities
//!
//! - Owns the input buffer (Enter submits, Shift+Enter inserts a newline).
//! - Gates the confirmation-required conversation reset.
//! - Tracks the pending/loading indicator and connection state for the
//!   render surface.
//! - Holds a snapshot of the message log for rendering; the session owns
//!   the authoritative log.

use tableside_client::ConnectionState;
use tableside_core::ChatMessage;

use crate::{AppAction, AppEvent, KeyInput, LogSource};

/// Chat view state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Transport connection state, for the status bar and the send gate.
    connection: ConnectionState,
    /// Snapshot of the session's message log.
    messages: Vec<ChatMessage>,
    /// A user message is in flight and no reply has arrived yet.
    loading: bool,
    /// Text input buffer (may span multiple lines via Shift+Enter).
    buffer: String,
    /// Byte offset of the cursor within the buffer.
    cursor: usize,
    /// A reset was requested and awaits confirmation.
    pending_reset: bool,
    /// Current session id for the status bar.
    session_id: String,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an App in its initial (disconnected, empty) state.
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            messages: Vec::new(),
            loading: false,
            buffer: String::new(),
            cursor: 0,
            pending_reset: false,
            session_id: String::new(),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connection(state) => {
                self.connection = state;
                vec![AppAction::Render]
            },
            AppEvent::LogUpdated { messages, source } => {
                self.messages = messages;
                if source == LogSource::Remote {
                    self.loading = false;
                }
                vec![AppAction::Render]
            },
            AppEvent::SessionStarted { session_id } => {
                self.session_id = session_id;
                self.loading = false;
                self.pending_reset = false;
                self.status_message = Some("Started a new conversation".to_string());
                vec![AppAction::Render]
            },
            AppEvent::SendRejected => {
                self.loading = false;
                self.status_message = Some("Message not sent (disconnected)".to_string());
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Handle one key press.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        // A pending reset consumes the next key: Reset confirms, anything
        // else cancels (and is swallowed).
        if self.pending_reset {
            self.pending_reset = false;
            if key == KeyInput::Reset {
                self.status_message = None;
                return vec![AppAction::ResetSession, AppAction::Render];
            }
            self.status_message = Some("Reset cancelled".to_string());
            return vec![AppAction::Render];
        }

        match key {
            KeyInput::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                vec![AppAction::Render]
            },
            KeyInput::Enter { shift: true } => {
                self.buffer.insert(self.cursor, '\n');
                self.cursor += 1;
                vec![AppAction::Render]
            },
            KeyInput::Enter { shift: false } => self.submit(),
            KeyInput::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.buffer.remove(prev);
                    self.cursor = prev;
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.buffer.len();
                vec![AppAction::Render]
            },
            KeyInput::Reset => {
                self.pending_reset = true;
                self.status_message =
                    Some("Reset conversation? Press Ctrl+R again to confirm".to_string());
                vec![AppAction::Render]
            },
            KeyInput::Esc => vec![AppAction::Quit],
        }
    }

    /// Enter without Shift: submit the buffer.
    ///
    /// Blank-after-trim submits nothing. The send control is unusable
    /// while disconnected; the buffer is kept so nothing is lost.
    fn submit(&mut self) -> Vec<AppAction> {
        if self.buffer.trim().is_empty() {
            return vec![];
        }

        if self.connection != ConnectionState::Connected {
            self.status_message = Some("Not connected".to_string());
            return vec![AppAction::Render];
        }

        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.loading = true;
        self.status_message = None;
        vec![AppAction::Send { text }, AppAction::Render]
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..].chars().next().map(|c| self.cursor + c.len_utf8())
    }

    /// Current message snapshot in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Transport connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Whether a reply is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current input buffer text.
    pub fn input_buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor byte offset within the input buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a reset awaits confirmation.
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Current session id (empty until the first `SessionStarted`).
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
