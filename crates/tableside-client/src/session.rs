//! The chat session coordinator.
//!
//! A [`ChatSession`] owns exactly what one conversation needs: its id, its
//! message log, and a store handle. The dashboard kept these as ambient
//! module globals; here they are explicit state so independent sessions
//! (and tests) run in isolation.

use tableside_core::{
    ChatMessage, MessageLog, SessionId,
    store::{LogStore, StoreError},
};
use tableside_proto::OutboundFrame;

use crate::TransportEvent;

/// One chat conversation: session id, message log, persistence handle.
///
/// The caller owns one `ChatSession` at a time and the live transport
/// keyed by [`ChatSession::session_id`]; on [`ChatSession::reset`] the
/// caller closes and reopens the transport for the new id.
pub struct ChatSession<S: LogStore> {
    id: SessionId,
    log: MessageLog,
    store: S,
}

impl<S: LogStore> ChatSession<S> {
    /// Start a fresh session with a generated id.
    pub fn new(store: S) -> Self {
        Self::with_id(store, SessionId::generate())
    }

    /// Start a session under a caller-chosen id.
    ///
    /// Restores a previously persisted log for that id if one exists; a
    /// malformed stored log is logged and treated as no prior history.
    /// Seeds the welcome message unless the restored log already had one,
    /// persists, and records the id under the legacy last-session key.
    pub fn with_id(store: S, id: SessionId) -> Self {
        let mut log = MessageLog::new();

        match store.load(&id) {
            Ok(Some(messages)) => log.restore(messages),
            Ok(None) => {},
            Err(StoreError::Malformed(reason)) => {
                tracing::warn!(session_id = %id, %reason, "malformed stored log, starting fresh");
            },
            Err(StoreError::Io(reason)) => {
                tracing::warn!(session_id = %id, %reason, "failed to load stored log, starting fresh");
            },
        }

        let mut session = Self { id, log, store };
        session.log.ensure_welcome();
        session.persist();
        session.record_last_session();
        session
    }

    /// The session's id (connection routing key and storage namespace).
    pub fn session_id(&self) -> &SessionId {
        &self.id
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        self.log.messages()
    }

    /// Apply an inbound transport event to the log.
    ///
    /// Returns `true` if the log changed (and was persisted). State
    /// changes carry no log content and never change it.
    pub fn apply_inbound(&mut self, event: TransportEvent) -> bool {
        let changed = match event {
            TransportEvent::Message(content) => {
                let update = self.log.import_message(content);
                self.log.merge(update)
            },
            TransportEvent::History(entries) => {
                let update = self
                    .log
                    .import_history(entries.into_iter().map(|e| (e.role(), e.content)));
                self.log.merge(update)
            },
            TransportEvent::State(_) => false,
        };

        if changed {
            self.persist();
        }
        changed
    }

    /// Gate and stage an outbound message.
    ///
    /// Rejects blank-after-trim text and sends while disconnected before
    /// any network activity, returning `None`. Otherwise appends a user
    /// message with fresh id and timestamp, persists, and returns the
    /// frame for the caller to transmit along with the created message.
    pub fn prepare_send(
        &mut self,
        text: &str,
        connected: bool,
    ) -> Option<(OutboundFrame, ChatMessage)> {
        if !connected || text.trim().is_empty() {
            return None;
        }

        let message = self.log.add_user_message(text);
        self.persist();
        Some((OutboundFrame::new(text), message))
    }

    /// Reset the conversation.
    ///
    /// Clears the old session's persisted log, issues a new id, reseeds
    /// the welcome message, persists under the new key, and records the
    /// new id. Returns the new id so the caller can reconnect the
    /// transport.
    pub fn reset(&mut self) -> SessionId {
        if let Err(e) = self.store.clear(&self.id) {
            tracing::warn!(session_id = %self.id, "failed to clear persisted log: {e}");
        }

        self.id = SessionId::generate();
        self.log.reset();
        self.log.ensure_welcome();
        self.persist();
        self.record_last_session();

        tracing::info!(session_id = %self.id, "session reset");
        self.id.clone()
    }

    /// Best-effort persistence: every change is written while the log is
    /// non-empty; failures are logged, never propagated upward.
    fn persist(&self) {
        if self.log.is_empty() {
            return;
        }
        if let Err(e) = self.store.save(&self.id, self.log.messages()) {
            tracing::warn!(session_id = %self.id, "failed to persist log: {e}");
        }
    }

    fn record_last_session(&self) {
        if let Err(e) = self.store.record_last_session(&self.id) {
            tracing::warn!(session_id = %self.id, "failed to record last session: {e}");
        }
    }
}
