//! Application input events.
//!
//! Events originate from two sources: user interactions (keyboard, resize,
//! ticks) translated by the driver, and session/transport notifications
//! translated by the runtime.

use tableside_client::ConnectionState;
use tableside_core::ChatMessage;

use crate::KeyInput;

/// What caused a log update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// A locally authored message was appended.
    Local,
    /// A remote frame (single message or history) merged into the log.
    /// Clears the pending indicator.
    Remote,
}

/// Events processed by the [`crate::App`] state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Transport connection state changed.
    Connection(ConnectionState),

    /// The session's message log changed.
    LogUpdated {
        /// Snapshot of the full log in display order.
        messages: Vec<ChatMessage>,
        /// Local append or remote merge.
        source: LogSource,
    },

    /// A session started (initial mount or post-reset).
    SessionStarted {
        /// The new session's id.
        session_id: String,
    },

    /// A staged send was rejected by the session gate (e.g. the connection
    /// dropped between keypress and dispatch).
    SendRejected,
}
