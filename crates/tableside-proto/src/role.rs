//! Message author roles.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
///
/// The remote vocabulary is wider than ours (`assistant`, `customer`, ...);
/// [`Role::from_wire`] collapses it at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Locally authored by the operator.
    User,
    /// Remote/assistant authored. Content is markdown-formatted.
    System,
}

impl Role {
    /// Translate a remote role string into our vocabulary.
    ///
    /// `"assistant"` maps to [`Role::System`]; everything else is treated
    /// as [`Role::User`].
    pub fn from_wire(role: &str) -> Self {
        if role == "assistant" { Self::System } else { Self::User }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_maps_to_system() {
        assert_eq!(Role::from_wire("assistant"), Role::System);
    }

    #[test]
    fn unknown_roles_map_to_user() {
        assert_eq!(Role::from_wire("customer"), Role::User);
        assert_eq!(Role::from_wire("user"), Role::User);
        assert_eq!(Role::from_wire(""), Role::User);
        assert_eq!(Role::from_wire("ASSISTANT"), Role::User);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).ok().as_deref(), Some("\"system\""));
        assert_eq!(serde_json::to_string(&Role::User).ok().as_deref(), Some("\"user\""));
    }
}
