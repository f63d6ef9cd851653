//! Redb-backed durable store.
//!
//! Uses redb's ACID transactions so persisted logs survive restarts. Values
//! are the same JSON array format the dashboard kept in browser local
//! storage.

use std::{path::Path, sync::Arc};

use redb::{Database, TableDefinition};

use super::{LogStore, StoreError};
use crate::{ChatMessage, SessionId};

/// Table: chat_logs
/// Key: session id string
/// Value: JSON-encoded message array
const LOGS: TableDefinition<&str, &[u8]> = TableDefinition::new("chat_logs");

/// Table: meta
/// Key: meta key string
/// Value: string value
const META: TableDefinition<&str, &str> = TableDefinition::new("meta");

const LAST_SESSION_KEY: &str = "last_session";

/// Durable store backed by redb.
///
/// Thread-safe through redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    ///
    /// Creates the LOGS and META tables if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(LOGS).map_err(|e| StoreError::Io(e.to_string()))?;
            let _ = txn.open_table(META).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl LogStore for RedbStore {
    fn save(&self, session_id: &SessionId, messages: &[ChatMessage]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(messages).map_err(|e| StoreError::Malformed(e.to_string()))?;

        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(LOGS).map_err(|e| StoreError::Io(e.to_string()))?;
            table
                .insert(session_id.as_str(), bytes.as_slice())
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }

    fn load(&self, session_id: &SessionId) -> Result<Option<Vec<ChatMessage>>, StoreError> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Io(e.to_string()))?;
        let table = txn.open_table(LOGS).map_err(|e| StoreError::Io(e.to_string()))?;

        match table.get(session_id.as_str()).map_err(|e| StoreError::Io(e.to_string()))? {
            Some(value) => {
                let messages = serde_json::from_slice(value.value())
                    .map_err(|e| StoreError::Malformed(e.to_string()))?;
                Ok(Some(messages))
            },
            None => Ok(None),
        }
    }

    fn clear(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(LOGS).map_err(|e| StoreError::Io(e.to_string()))?;
            table.remove(session_id.as_str()).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }

    fn record_last_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(META).map_err(|e| StoreError::Io(e.to_string()))?;
            table
                .insert(LAST_SESSION_KEY, session_id.as_str())
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}
