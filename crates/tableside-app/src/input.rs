//! Key input events.

/// Key input events from the terminal, already normalized by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return. `shift` distinguishes newline insertion
    /// (Shift+Enter) from submission (plain Enter).
    Enter {
        /// Shift was held.
        shift: bool,
    },
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Reset request (Ctrl+R); confirmation-gated in the App.
    Reset,
    /// Escape key.
    Esc,
}
