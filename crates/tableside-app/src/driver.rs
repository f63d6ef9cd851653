//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use tableside_client::TransportEvent;
use tableside_core::SessionId;
use tableside_proto::OutboundFrame;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal front end and under
/// test drivers.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, a WebSocket chat transport
/// - **Test**: scripted events and an in-memory frame sink
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no event is ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the event source fails.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Open the chat connection for a session, replacing any previous
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be set up.
    fn connect(
        &mut self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Send a frame to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is closed or send fails.
    fn send_frame(&mut self, frame: OutboundFrame)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Drain one pending transport event, if any.
    fn poll_transport(&mut self) -> Option<TransportEvent>;

    /// Check if connected to the server.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
