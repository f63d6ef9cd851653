//! Transport adapter and session coordinator for Tableside.
//!
//! # Components
//!
//! - [`ChatTransport`]: one live WebSocket keyed by the session id, with a
//!   `Disconnected -> Connecting -> Connected -> Disconnected` state machine
//!   published on a watch channel and typed inbound events on an mpsc
//!   channel.
//! - [`ChatSession`]: explicit session-scoped state (id, log, store handle)
//!   replacing the dashboard's ambient module globals, so independent
//!   sessions can run in isolation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod session;
mod state;
pub mod transport;

pub use event::TransportEvent;
pub use session::ChatSession;
pub use state::ConnectionState;
pub use transport::{ChatTransport, ReconnectPolicy, TransportConfig, TransportError};
