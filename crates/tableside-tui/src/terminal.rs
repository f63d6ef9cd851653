//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Network uses the WebSocket
//! chat transport.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tableside_app::{App, AppEvent, Driver, KeyInput};
use tableside_client::{ChatTransport, TransportConfig, TransportError, TransportEvent};
use tableside_core::SessionId;
use tableside_proto::OutboundFrame;
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the chat
/// connection (tokio-tungstenite WebSocket). Each session reset replaces
/// the transport with a fresh one keyed by the new session id.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    transport: Option<ChatTransport>,
    base_url: String,
    config: TransportConfig,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot enter raw mode or the
    /// alternate screen.
    pub fn new(base_url: String, config: TransportConfig) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, transport: None, base_url, config })
    }

    /// Convert a crossterm key event to a `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => Some(KeyInput::Reset),
                KeyCode::Char('c') => Some(KeyInput::Esc),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => {
                Some(KeyInput::Enter { shift: key.modifiers.contains(KeyModifiers::SHIFT) })
            },
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(Some(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    async fn connect(&mut self, session_id: &SessionId) -> Result<(), Self::Error> {
        // Closing the old transport first: frames for a dead session are
        // dropped by its closed socket, never delivered to the new one.
        if let Some(mut old) = self.transport.take() {
            old.close();
        }
        let transport = ChatTransport::connect(&self.base_url, session_id, self.config)?;
        self.transport = Some(transport);
        Ok(())
    }

    async fn send_frame(&mut self, frame: OutboundFrame) -> Result<(), Self::Error> {
        match &self.transport {
            Some(transport) => {
                if !transport.send_frame(frame) {
                    tracing::warn!("frame not sent, transport rejected it");
                }
            },
            None => tracing::warn!("frame not sent, no transport"),
        }
        Ok(())
    }

    fn poll_transport(&mut self) -> Option<TransportEvent> {
        self.transport.as_mut().and_then(ChatTransport::poll_event)
    }

    fn is_connected(&self) -> bool {
        self.transport.as_ref().is_some_and(ChatTransport::is_connected)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
