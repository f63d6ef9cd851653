//! Typed transport events.

use tableside_proto::HistoryEntry;

use crate::ConnectionState;

/// Events surfaced by the transport to the caller.
///
/// Malformed frames never reach this enum: the transport logs and drops
/// them (silent at the UI, explicit in the type system).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection state changed.
    State(ConnectionState),

    /// A single new assistant message (append semantics).
    Message(String),

    /// Full history replacement (supersedes client-held state except the
    /// pinned welcome message).
    History(Vec<HistoryEntry>),
}
