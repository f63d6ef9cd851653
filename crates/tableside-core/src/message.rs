//! Chat messages and the sentinel welcome message.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tableside_proto::Role;

/// Reserved id of the sentinel welcome message.
pub const WELCOME_MESSAGE_ID: &str = "1";

/// Content of the sentinel welcome message (markdown).
pub const WELCOME_MESSAGE: &str =
    "**Hello!** I'm your *Tableside* assistant. How can I help you today?";

/// One message in a session's log.
///
/// `timestamp` is a display-formatted local time string generated at
/// creation, never derived from server time. Serialized field names match
/// the log format the dashboard persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique within a session: the sentinel id or a value derived from
    /// submission time.
    pub id: String,
    /// Who authored the message.
    pub role: Role,
    /// Message text; markdown-formatted when `role` is `System`.
    pub content: String,
    /// Display time string, e.g. `10:29 AM`.
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a message with a freshly generated timestamp.
    pub fn new(id: String, role: Role, content: impl Into<String>) -> Self {
        Self { id, role, content: content.into(), timestamp: display_timestamp() }
    }

    /// The sentinel welcome message.
    pub fn welcome() -> Self {
        Self::new(WELCOME_MESSAGE_ID.to_string(), Role::System, WELCOME_MESSAGE)
    }

    /// Whether this is the sentinel welcome message (id and role both
    /// match; the sentinel is always system-authored).
    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID && self.role == Role::System
    }

    /// Whether this message carries the reserved welcome id, regardless of
    /// role. History merges strip on id alone.
    pub fn has_welcome_id(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }
}

/// Current local time formatted for display (`H:MM AM/PM`).
pub fn display_timestamp() -> String {
    Local::now().format("%-I:%M %p").to_string()
}
