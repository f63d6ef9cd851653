//! Application side-effects and intents.

/// Actions produced by the [`crate::App`] state machine for the runtime to
/// execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send message text over the transport.
    Send {
        /// Text as typed (the session gate trims for the blank check but
        /// sends it verbatim).
        text: String,
    },

    /// Reset the conversation: new session id, cleared persisted log,
    /// transport reconnect.
    ResetSession,
}
