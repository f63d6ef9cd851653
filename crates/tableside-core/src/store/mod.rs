//! Persistence for session message logs.
//!
//! Trait-based abstraction for the per-session persisted log. The trait is
//! synchronous (no async): writes are small, local, and best-effort, and the
//! session layer never awaits them.

mod error;
mod memory;
mod redb;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::{ChatMessage, SessionId};

pub use self::redb::RedbStore;

/// Storage abstraction for persisted session logs.
///
/// Must be Clone (handles are shared between the session layer and tests),
/// Send + Sync, and synchronous. Implementations typically share internal
/// state via Arc, so clones access the same underlying storage.
///
/// Keys are scoped per session id: concurrent sessions never collide. Two
/// handles on the same session id are last-write-wins (not a supported
/// flow).
pub trait LogStore: Clone + Send + Sync + 'static {
    /// Persist the full log under the session's key.
    ///
    /// Called on every change while the log is non-empty. Best-effort: the
    /// session layer logs failures and moves on.
    fn save(&self, session_id: &SessionId, messages: &[ChatMessage]) -> Result<(), StoreError>;

    /// Load the persisted log for a session. `None` if nothing was stored.
    ///
    /// A malformed stored value yields [`StoreError::Malformed`], which the
    /// session layer treats as "no prior history".
    fn load(&self, session_id: &SessionId) -> Result<Option<Vec<ChatMessage>>, StoreError>;

    /// Remove the persisted log for a session. A no-op if absent.
    fn clear(&self, session_id: &SessionId) -> Result<(), StoreError>;

    /// Record the most recent session id.
    ///
    /// Legacy write-only key kept for compatibility with the dashboard's
    /// storage layout; never read back.
    fn record_last_session(&self, session_id: &SessionId) -> Result<(), StoreError>;
}
