//! Terminal UI for Tableside
//!
//! A thin shell over [`tableside_app::Driver`] that provides
//! terminal-specific I/O. All orchestration logic lives in the generic
//! [`tableside_app::Runtime`].
//!
//! This crate only handles terminal rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use tableside_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
