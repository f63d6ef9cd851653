//! Frame types and boundary classification.
//!
//! Inbound classification never fails: anything that is not a well-formed
//! chat payload becomes [`InboundFrame::Malformed`] with a reason, and the
//! caller decides how loudly to drop it.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Outbound chat frame: `{"message": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundFrame {
    /// Message text as typed by the operator.
    pub message: String,
}

impl OutboundFrame {
    /// Wrap message text in the outbound envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Serialize to the JSON text sent on the socket.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One entry of an inbound history payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    /// Remote role vocabulary (`assistant`, `customer`, ...).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl HistoryEntry {
    /// Translated role for this entry.
    pub fn role(&self) -> Role {
        Role::from_wire(&self.role)
    }
}

/// Classified inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// A single assistant message (append semantics).
    Message(String),
    /// Full history replacement (supersedes client state except the
    /// pinned welcome message).
    History(Vec<HistoryEntry>),
    /// Anything that is not a well-formed chat payload.
    Malformed(String),
}

/// Raw shape of the `message` field before classification.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Text(String),
    History(Vec<HistoryEntry>),
}

#[derive(Deserialize)]
struct RawInbound {
    #[serde(default)]
    message: Option<RawMessage>,
}

impl InboundFrame {
    /// Classify one inbound text frame.
    ///
    /// Total: not-JSON, a missing or `null` `message` field, an empty
    /// message string, and history entries of the wrong shape all classify
    /// as [`InboundFrame::Malformed`]. An empty history array is valid.
    pub fn classify(raw: &str) -> Self {
        match serde_json::from_str::<RawInbound>(raw) {
            Ok(RawInbound { message: Some(RawMessage::Text(text)) }) => {
                if text.is_empty() {
                    Self::Malformed("empty message text".to_string())
                } else {
                    Self::Message(text)
                }
            },
            Ok(RawInbound { message: Some(RawMessage::History(entries)) }) => {
                Self::History(entries)
            },
            Ok(RawInbound { message: None }) => {
                Self::Malformed("missing `message` field".to_string())
            },
            Err(e) => Self::Malformed(format!("invalid frame: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_encodes_exact_envelope() {
        let frame = OutboundFrame::new("x");
        assert_eq!(frame.encode().ok().as_deref(), Some(r#"{"message":"x"}"#));
    }

    #[test]
    fn single_message_classifies_as_message() {
        let frame = InboundFrame::classify(r#"{"message": "hello"}"#);
        assert_eq!(frame, InboundFrame::Message("hello".to_string()));
    }

    #[test]
    fn array_classifies_as_history() {
        let raw = r#"{"message": [
            {"role": "assistant", "content": "hi"},
            {"role": "customer", "content": "yo"}
        ]}"#;

        let InboundFrame::History(entries) = InboundFrame::classify(raw) else {
            unreachable!("expected history frame");
        };

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role(), Role::System);
        assert_eq!(entries[0].content, "hi");
        assert_eq!(entries[1].role(), Role::User);
        assert_eq!(entries[1].content, "yo");
    }

    #[test]
    fn empty_history_is_still_history() {
        let frame = InboundFrame::classify(r#"{"message": []}"#);
        assert_eq!(frame, InboundFrame::History(vec![]));
    }

    #[test]
    fn not_json_is_malformed() {
        assert!(matches!(InboundFrame::classify("not json"), InboundFrame::Malformed(_)));
    }

    #[test]
    fn missing_message_field_is_malformed() {
        assert!(matches!(InboundFrame::classify(r#"{"type": "ping"}"#), InboundFrame::Malformed(_)));
    }

    #[test]
    fn empty_message_text_is_dropped_as_malformed() {
        // The backend never sends an empty reply; an empty string is
        // treated like any other unusable payload.
        assert!(matches!(InboundFrame::classify(r#"{"message": ""}"#), InboundFrame::Malformed(_)));
    }

    #[test]
    fn null_message_field_is_malformed() {
        assert!(matches!(
            InboundFrame::classify(r#"{"message": null}"#),
            InboundFrame::Malformed(_)
        ));
    }

    #[test]
    fn wrong_shaped_history_entries_are_malformed() {
        // Numbers are neither text nor {role, content} objects.
        assert!(matches!(
            InboundFrame::classify(r#"{"message": [1, 2, 3]}"#),
            InboundFrame::Malformed(_)
        ));
        assert!(matches!(
            InboundFrame::classify(r#"{"message": [{"role": "assistant"}]}"#),
            InboundFrame::Malformed(_)
        ));
    }

    #[test]
    fn numeric_message_is_malformed() {
        assert!(matches!(InboundFrame::classify(r#"{"message": 42}"#), InboundFrame::Malformed(_)));
    }
}
