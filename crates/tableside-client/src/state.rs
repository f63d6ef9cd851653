//! Observable connection state.

use std::fmt;

/// Transport connection state.
///
/// `connect` moves `Disconnected -> Connecting -> Connected`; any transport
/// error or remote close moves any state to `Disconnected`. There is no
/// `Reconnecting` state: a fresh connect (session id change, or a
/// policy-driven redial, which reruns the connect step) is the only path
/// back to `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Socket open; sends are possible.
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connecting => f.write_str("connecting"),
            Self::Connected => f.write_str("connected"),
        }
    }
}
