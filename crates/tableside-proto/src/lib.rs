//! Wire contract for the Tableside assistant chat channel.
//!
//! The chat backend speaks JSON text frames over a per-session WebSocket:
//!
//! - Outbound: `{"message": "<text>"}`
//! - Inbound: `{"message": "<text>"}` or
//!   `{"message": [{"role": "...", "content": "..."}, ...]}`
//!
//! Inbound frames are classified into a tagged union ([`InboundFrame`]) at
//! the boundary so downstream code never inspects payload shape ad hoc.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod endpoint;
mod frame;
mod role;

pub use endpoint::chat_endpoint;
pub use frame::{HistoryEntry, InboundFrame, OutboundFrame};
pub use role::Role;
