//! The per-session message log state machine.
//!
//! Maintains the authoritative, deduplicated, ordered message log, merged
//! from three sources: the synthetic welcome message, live inbound frames,
//! and locally authored outbound messages.
//!
//! # Invariant
//!
//! The welcome-id message, if present, is always at index 0, and duplicates
//! of it are never retained across merges.

use std::time::{SystemTime, UNIX_EPOCH};

use tableside_proto::Role;

use crate::message::ChatMessage;

/// A merge payload: one new message, or a full history replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogUpdate {
    /// Append (or welcome-insert) a single message.
    Single(ChatMessage),
    /// Replace the log with a server-held history.
    History(Vec<ChatMessage>),
}

/// Ordered, deduplicated log of chat messages for one session.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
    /// Welcome seeding already happened for this session (either seeded
    /// here or present in a restored log).
    welcome_seeded: bool,
    /// Disambiguates ids minted within the same millisecond.
    id_seq: u64,
}

impl MessageLog {
    /// Empty log for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the sentinel welcome message is present.
    pub fn has_welcome(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_welcome)
    }

    /// Adopt a previously persisted log as the initial log.
    ///
    /// The restored log is normalized the same way history merges are: a
    /// proper welcome message is pinned to the front and every other entry
    /// carrying the reserved id is stripped, so a tampered store cannot
    /// smuggle in duplicate or mispinned sentinels. Records whether the
    /// result contains the welcome message so
    /// [`MessageLog::ensure_welcome`] does not reseed it.
    pub fn restore(&mut self, messages: Vec<ChatMessage>) {
        let welcome = messages.iter().find(|m| m.is_welcome()).cloned();

        let mut log = Vec::with_capacity(messages.len());
        if let Some(welcome) = welcome {
            log.push(welcome);
        }
        log.extend(messages.into_iter().filter(|m| !m.has_welcome_id()));

        self.messages = log;
        self.welcome_seeded = self.has_welcome();
    }

    /// Guarantee exactly one welcome message, pinned first.
    ///
    /// Runs once per session unless the restored log already had one.
    /// Returns `true` if the log changed.
    pub fn ensure_welcome(&mut self) -> bool {
        if self.welcome_seeded {
            return false;
        }
        self.welcome_seeded = true;

        if self.has_welcome() {
            return false;
        }
        self.messages.insert(0, ChatMessage::welcome());
        true
    }

    /// Merge a received payload into the log. Returns `true` if the log
    /// changed.
    pub fn merge(&mut self, update: LogUpdate) -> bool {
        match update {
            LogUpdate::Single(message) => self.merge_single(message),
            LogUpdate::History(messages) => self.merge_history(messages),
        }
    }

    /// Single-message merge.
    ///
    /// A welcome-id message is pinned to the front, or dropped if one is
    /// already present. Everything else appends.
    fn merge_single(&mut self, message: ChatMessage) -> bool {
        if message.is_welcome() {
            if self.messages.is_empty() {
                self.messages.push(message);
                return true;
            }
            if self.has_welcome() {
                return false;
            }
            self.messages.insert(0, message);
            return true;
        }

        self.messages.push(message);
        true
    }

    /// History-replace merge.
    ///
    /// If the current log already has a welcome message it stays pinned:
    /// welcome-id entries are stripped from the incoming array and the
    /// existing welcome is spliced back to the front. Otherwise the
    /// incoming array is adopted verbatim.
    fn merge_history(&mut self, incoming: Vec<ChatMessage>) -> bool {
        let existing_welcome = self.messages.iter().find(|m| m.is_welcome()).cloned();

        self.messages = match existing_welcome {
            Some(welcome) => {
                let mut log = vec![welcome];
                log.extend(incoming.into_iter().filter(|m| !m.has_welcome_id()));
                log
            },
            None => incoming,
        };

        true
    }

    /// Build a system message from a live inbound frame, with fresh id and
    /// timestamp.
    pub fn import_message(&mut self, content: String) -> LogUpdate {
        let id = self.issue_id();
        LogUpdate::Single(ChatMessage::new(id, Role::System, content))
    }

    /// Build a history replacement from inbound `(role, content)` entries,
    /// with a fresh id and timestamp per entry.
    pub fn import_history(
        &mut self,
        entries: impl IntoIterator<Item = (Role, String)>,
    ) -> LogUpdate {
        let messages = entries
            .into_iter()
            .map(|(role, content)| {
                let id = self.issue_id();
                ChatMessage::new(id, role, content)
            })
            .collect();
        LogUpdate::History(messages)
    }

    /// Append a locally authored message and return it.
    pub fn add_user_message(&mut self, content: &str) -> ChatMessage {
        let id = self.issue_id();
        let message = ChatMessage::new(id, Role::User, content);
        self.messages.push(message.clone());
        message
    }

    /// Clear the log and mark the welcome message not yet seeded.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.welcome_seeded = false;
    }

    /// Mint a message id: millisecond clock plus a per-log counter.
    ///
    /// The counter keeps ids unique within a session even when several
    /// messages land in the same millisecond.
    fn issue_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = self.id_seq;
        self.id_seq += 1;
        format!("{millis}{seq}")
    }
}

#[cfg(test)]
mod tests {
    use tableside_proto::Role;

    use super::*;
    use crate::message::{WELCOME_MESSAGE_ID, WELCOME_MESSAGE};

    fn msg(id: &str, role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            role,
            content: content.to_string(),
            timestamp: "10:29 AM".to_string(),
        }
    }

    fn welcome_with(content: &str) -> ChatMessage {
        msg(WELCOME_MESSAGE_ID, Role::System, content)
    }

    #[test]
    fn ensure_welcome_pins_to_front() {
        let mut log = MessageLog::new();
        log.restore(vec![msg("2", Role::User, "hi")]);

        assert!(log.ensure_welcome());
        assert_eq!(log.len(), 2);
        assert!(log.messages()[0].is_welcome());
        assert_eq!(log.messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn ensure_welcome_runs_once() {
        let mut log = MessageLog::new();
        assert!(log.ensure_welcome());
        assert!(!log.ensure_welcome());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn restored_welcome_is_not_reseeded() {
        let mut log = MessageLog::new();
        log.restore(vec![welcome_with("restored"), msg("2", Role::User, "hi")]);

        assert!(!log.ensure_welcome());
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].content, "restored");
    }

    #[test]
    fn restored_spoofed_welcome_id_is_stripped_before_seeding() {
        // A user-role entry squatting on the reserved id does not survive
        // restore, and seeding yields exactly one sentinel entry.
        let mut log = MessageLog::new();
        log.restore(vec![msg(WELCOME_MESSAGE_ID, Role::User, "spoof"), msg("2", Role::User, "hi")]);

        assert!(log.ensure_welcome());

        let sentinel_count =
            log.messages().iter().filter(|m| m.id == WELCOME_MESSAGE_ID).count();
        assert_eq!(sentinel_count, 1);
        assert!(log.messages()[0].is_welcome());
        assert_eq!(log.messages()[1].content, "hi");
    }

    #[test]
    fn restored_duplicate_welcome_ids_collapse_to_the_proper_one() {
        let mut log = MessageLog::new();
        log.restore(vec![
            msg("2", Role::User, "hi"),
            welcome_with("real"),
            msg(WELCOME_MESSAGE_ID, Role::User, "spoof"),
        ]);

        // Proper welcome pinned first, spoof gone, no reseed.
        assert!(!log.ensure_welcome());
        let contents: Vec<_> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["real", "hi"]);
        assert!(log.messages()[0].is_welcome());
    }

    #[test]
    fn incoming_welcome_becomes_sole_message_when_empty() {
        let mut log = MessageLog::new();
        assert!(log.merge(LogUpdate::Single(welcome_with("w"))));
        assert_eq!(log.len(), 1);
        assert!(log.messages()[0].is_welcome());
    }

    #[test]
    fn incoming_welcome_prepends_when_absent() {
        let mut log = MessageLog::new();
        log.restore(vec![msg("2", Role::User, "hi")]);

        assert!(log.merge(LogUpdate::Single(welcome_with("w"))));
        assert_eq!(log.len(), 2);
        assert!(log.messages()[0].is_welcome());
        assert_eq!(log.messages()[1].content, "hi");
    }

    #[test]
    fn duplicate_welcome_is_dropped() {
        let mut log = MessageLog::new();
        log.ensure_welcome();
        let before = log.len();

        assert!(!log.merge(LogUpdate::Single(welcome_with("dup"))));
        assert_eq!(log.len(), before);
        assert_eq!(log.messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn plain_single_messages_append_in_order() {
        let mut log = MessageLog::new();
        log.ensure_welcome();

        log.merge(LogUpdate::Single(msg("10", Role::System, "a")));
        log.merge(LogUpdate::Single(msg("11", Role::User, "b")));

        let contents: Vec<_> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![WELCOME_MESSAGE, "a", "b"]);
    }

    #[test]
    fn history_replace_preserves_pinned_welcome() {
        // Log [W, A, B] merged with [W', C, D] yields [W, C, D].
        let mut log = MessageLog::new();
        log.restore(vec![
            welcome_with("original"),
            msg("2", Role::User, "A"),
            msg("3", Role::System, "B"),
        ]);

        let incoming = vec![
            welcome_with("impostor"),
            msg("4", Role::User, "C"),
            msg("5", Role::System, "D"),
        ];
        assert!(log.merge(LogUpdate::History(incoming)));

        let contents: Vec<_> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["original", "C", "D"]);
    }

    #[test]
    fn history_replace_adopts_verbatim_without_welcome() {
        let mut log = MessageLog::new();
        log.restore(vec![msg("2", Role::User, "old")]);

        let incoming = vec![msg("4", Role::User, "C"), msg("5", Role::System, "D")];
        log.merge(LogUpdate::History(incoming.clone()));

        assert_eq!(log.messages(), incoming.as_slice());
    }

    #[test]
    fn history_strip_matches_on_id_alone() {
        // A user-role entry carrying the reserved id is still stripped.
        let mut log = MessageLog::new();
        log.ensure_welcome();

        let incoming = vec![msg(WELCOME_MESSAGE_ID, Role::User, "spoof"), msg("4", Role::User, "C")];
        log.merge(LogUpdate::History(incoming));

        let contents: Vec<_> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![WELCOME_MESSAGE, "C"]);
    }

    #[test]
    fn add_user_message_appends_with_fresh_id() {
        let mut log = MessageLog::new();
        log.ensure_welcome();

        let created = log.add_user_message("hello");
        assert_eq!(created.role, Role::User);
        assert_eq!(log.messages().last(), Some(&created));
        assert_ne!(created.id, WELCOME_MESSAGE_ID);
    }

    #[test]
    fn issued_ids_are_unique_within_a_burst() {
        let mut log = MessageLog::new();
        let a = log.add_user_message("a");
        let b = log.add_user_message("b");
        let c = log.add_user_message("c");
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
    }

    #[test]
    fn import_history_translates_roles() {
        let mut log = MessageLog::new();
        let update = log.import_history(vec![
            (Role::System, "hi".to_string()),
            (Role::User, "yo".to_string()),
        ]);

        let LogUpdate::History(messages) = update else {
            unreachable!("import_history builds a history update");
        };
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn reset_clears_and_allows_reseed() {
        let mut log = MessageLog::new();
        log.ensure_welcome();
        log.add_user_message("hello");

        log.reset();
        assert!(log.is_empty());

        assert!(log.ensure_welcome());
        assert_eq!(log.len(), 1);
        assert!(log.messages()[0].is_welcome());
    }
}
