//! Application layer for the Tableside chat view.
//!
//! Pure state machine and generic runtime, enabling the same orchestration
//! code to run in the terminal front end and under test drivers.
//!
//! # Components
//!
//! - [`App`]: chat view state machine (input buffer, reset confirmation,
//!   loading indicator, message snapshot for rendering)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop wiring App, the chat session,
//!   and the Driver together on one task

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::{AppEvent, LogSource};
pub use input::KeyInput;
pub use runtime::Runtime;
