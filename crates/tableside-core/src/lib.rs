//! Core chat-session state for Tableside.
//!
//! Pure state with no I/O dependencies:
//!
//! - [`SessionId`]: opaque per-conversation identity.
//! - [`MessageLog`]: ordered, deduplicated message log with welcome-message
//!   pinning and history-replace merge semantics.
//! - [`store`]: the [`store::LogStore`] persistence trait with in-memory and
//!   redb backends.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod log;
mod message;
mod session;
pub mod store;

pub use log::{LogUpdate, MessageLog};
pub use message::{ChatMessage, WELCOME_MESSAGE, WELCOME_MESSAGE_ID, display_timestamp};
pub use session::SessionId;
