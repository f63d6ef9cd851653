//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`ChatSession`]: message log and persistence for one conversation
//! - [`Driver`]: platform-specific I/O

use tableside_client::{ChatSession, TransportEvent};
use tableside_core::store::LogStore;

use crate::{App, AppAction, AppEvent, Driver, LogSource};

/// Generic runtime that orchestrates App, ChatSession, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Log persistence backend
pub struct Runtime<D, S>
where
    D: Driver,
    S: LogStore,
{
    driver: D,
    app: App,
    session: ChatSession<S>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: LogStore,
{
    /// Create a new runtime over a fresh session.
    pub fn new(driver: D, store: S) -> Self {
        Self::with_session(driver, ChatSession::new(store))
    }

    /// Create a new runtime over an existing session.
    pub fn with_session(driver: D, session: ChatSession<S>) -> Self {
        Self { driver, app: App::new(), session }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Polls for input events from the driver
    /// 2. Drains transport events into the session log
    /// 3. Processes actions between App and session
    /// 4. Renders through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        tracing::debug!(session_id = %self.session.session_id(), "runtime starting");
        self.driver.connect(self.session.session_id()).await?;
        self.seed_app().await?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Push the session's identity and restored log into the App.
    async fn seed_app(&mut self) -> Result<(), D::Error> {
        let started = AppEvent::SessionStarted {
            session_id: self.session.session_id().as_str().to_string(),
        };
        let actions = self.app.handle(started);
        if self.process_actions(actions).await? {
            return Ok(());
        }

        let update = AppEvent::LogUpdated {
            messages: self.session.messages().to_vec(),
            source: LogSource::Local,
        };
        let actions = self.app.handle(update);
        self.process_actions(actions).await?;
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        while let Some(event) = self.driver.poll_transport() {
            if self.process_transport_event(event).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Route one transport event through session and App.
    ///
    /// Returns `true` if should quit.
    async fn process_transport_event(&mut self, event: TransportEvent) -> Result<bool, D::Error> {
        let actions = match event {
            TransportEvent::State(state) => self.app.handle(AppEvent::Connection(state)),
            inbound @ (TransportEvent::Message(_) | TransportEvent::History(_)) => {
                if !self.session.apply_inbound(inbound) {
                    return Ok(false);
                }
                self.app.handle(AppEvent::LogUpdated {
                    messages: self.session.messages().to_vec(),
                    source: LogSource::Remote,
                })
            },
        };
        self.process_actions(actions).await
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Send { text } => {
                        let event = self.dispatch_send(&text).await?;
                        pending_actions.extend(self.app.handle(event));
                    },
                    AppAction::ResetSession => {
                        let events = self.reset_session().await?;
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Stage a user message and transmit it.
    ///
    /// The session re-gates the send. A staged message that subsequently
    /// fails to transmit stays in the log; the server sees it on redelivery
    /// of history, not from us.
    async fn dispatch_send(&mut self, text: &str) -> Result<AppEvent, D::Error> {
        let Some((frame, _message)) = self.session.prepare_send(text, self.driver.is_connected())
        else {
            return Ok(AppEvent::SendRejected);
        };

        self.driver.send_frame(frame).await?;
        Ok(AppEvent::LogUpdated {
            messages: self.session.messages().to_vec(),
            source: LogSource::Local,
        })
    }

    /// Reset the conversation and reconnect under the new id.
    async fn reset_session(&mut self) -> Result<Vec<AppEvent>, D::Error> {
        let new_id = self.session.reset();
        self.driver.connect(&new_id).await?;

        Ok(vec![
            AppEvent::SessionStarted { session_id: new_id.as_str().to_string() },
            AppEvent::LogUpdated {
                messages: self.session.messages().to_vec(),
                source: LogSource::Local,
            },
        ])
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &ChatSession<S> {
        &self.session
    }
}
