#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{LogStore, StoreError};
use crate::{ChatMessage, SessionId};

/// In-memory store for tests and the `--memory` flag.
///
/// Logs are kept as serialized JSON, matching what [`super::RedbStore`]
/// writes to disk, so malformed-data handling can be exercised by injecting
/// raw bytes. All state is behind `Arc<Mutex<>>`; clones share storage.
/// Uses `lock().expect()` which panics if the mutex is poisoned -
/// acceptable for test/simulation code.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Serialized log per session id.
    logs: HashMap<String, Vec<u8>>,
    /// Legacy write-only key.
    last_session: Option<String>,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with a persisted log.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn log_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").logs.len()
    }

    /// Last recorded session id, if any.
    ///
    /// Exists for tests only; the production flow never reads this back.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn last_session(&self) -> Option<String> {
        self.inner.lock().expect("Mutex poisoned").last_session.clone()
    }

    /// Inject raw bytes under a session key, bypassing serialization.
    ///
    /// Lets tests simulate a corrupted persisted log.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn insert_raw(&self, session_id: &SessionId, raw: &[u8]) {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .logs
            .insert(session_id.as_str().to_string(), raw.to_vec());
    }
}

impl LogStore for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn save(&self, session_id: &SessionId, messages: &[ChatMessage]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(messages).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .logs
            .insert(session_id.as_str().to_string(), bytes);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn load(&self, session_id: &SessionId) -> Result<Option<Vec<ChatMessage>>, StoreError> {
        let inner = self.inner.lock().expect("Mutex poisoned");

        match inner.logs.get(session_id.as_str()) {
            Some(bytes) => {
                let messages = serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::Malformed(e.to_string()))?;
                Ok(Some(messages))
            },
            None => Ok(None),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn clear(&self, session_id: &SessionId) -> Result<(), StoreError> {
        self.inner.lock().expect("Mutex poisoned").logs.remove(session_id.as_str());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn record_last_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        self.inner.lock().expect("Mutex poisoned").last_session =
            Some(session_id.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tableside_proto::Role;

    use super::*;

    fn sample_log() -> Vec<ChatMessage> {
        vec![
            ChatMessage::welcome(),
            ChatMessage::new("100".to_string(), Role::User, "hi"),
            ChatMessage::new("101".to_string(), Role::System, "hello"),
        ]
    }

    #[test]
    fn roundtrip_under_same_key() {
        let store = MemoryStore::new();
        let session = SessionId::generate();
        let log = sample_log();

        store.save(&session, &log).unwrap();
        assert_eq!(store.load(&session).unwrap(), Some(log));
    }

    #[test]
    fn load_under_different_key_is_absent() {
        let store = MemoryStore::new();
        let session = SessionId::generate();
        let other = SessionId::generate();

        store.save(&session, &sample_log()).unwrap();
        assert_eq!(store.load(&other).unwrap(), None);
    }

    #[test]
    fn clear_removes_the_log() {
        let store = MemoryStore::new();
        let session = SessionId::generate();

        store.save(&session, &sample_log()).unwrap();
        store.clear(&session).unwrap();
        assert_eq!(store.load(&session).unwrap(), None);

        // Idempotent.
        store.clear(&session).unwrap();
    }

    #[test]
    fn malformed_stored_log_is_an_error() {
        let store = MemoryStore::new();
        let session = SessionId::generate();

        store.insert_raw(&session, b"{not json");
        assert!(matches!(store.load(&session), Err(StoreError::Malformed(_))));

        // Well-formed JSON of the wrong shape is also malformed.
        store.insert_raw(&session, br#"{"hello": "world"}"#);
        assert!(matches!(store.load(&session), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn record_last_session_overwrites() {
        let store = MemoryStore::new();
        let a = SessionId::generate();
        let b = SessionId::generate();

        store.record_last_session(&a).unwrap();
        store.record_last_session(&b).unwrap();
        assert_eq!(store.last_session().as_deref(), Some(b.as_str()));
    }
}
