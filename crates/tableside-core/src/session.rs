//! Session identity.

use std::fmt;

use rand::Rng;

/// Length of a generated session id.
const SESSION_ID_LEN: usize = 26;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque per-conversation identifier.
///
/// Used as the connection routing key and as the storage namespace for the
/// persisted log. Generated client-side at session construction and again on
/// explicit reset; never persisted by this type itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id (26 lowercase alphanumeric chars).
    ///
    /// Collision-resistant enough for routing and storage namespacing; this
    /// is not a cryptographic token.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..SESSION_ID_LEN)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect();
        Self(id)
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
