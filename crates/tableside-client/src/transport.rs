//! WebSocket transport for the chat channel.
//!
//! Maintains a single live connection associated with the current session
//! id. An internal task handles the socket I/O; the [`ChatTransport`]
//! handle exposes send/close plus two observer channels (no polling of
//! shared state):
//!
//! - connection state on a `watch` channel,
//! - typed inbound events on an `mpsc` channel.
//!
//! Reconnecting to a new session id means closing this transport and
//! connecting a fresh one.

use std::{sync::Arc, time::Duration};

use futures::{SinkExt, StreamExt};
use tableside_core::SessionId;
use tableside_proto::{InboundFrame, OutboundFrame, chat_endpoint};
use thiserror::Error;
use tokio::{
    net::TcpStream,
    sync::{mpsc, watch},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};

use crate::{ConnectionState, TransportEvent};

const CHANNEL_CAPACITY: usize = 32;

/// Transport errors.
///
/// Deliberately small: runtime failures (open errors, abrupt closure) are
/// reported through the connection state flag, not as error values.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `connect` requires a non-empty session id.
    #[error("session id must be non-empty")]
    EmptySessionId,
}

/// Redial behavior after a connection drops.
///
/// The dashboard's observed behavior is fire-and-forget (no retry), so the
/// default is [`ReconnectPolicy::Disabled`]; backoff is an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Never redial. A dropped connection requires a fresh connect (e.g.
    /// via session reset).
    Disabled,
    /// Redial with exponential delay, doubling from `initial` up to `max`,
    /// until the transport is closed.
    Backoff {
        /// First delay after a drop.
        initial: Duration,
        /// Delay ceiling.
        max: Duration,
    },
}

/// Transport configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Bounds the handshake so state cannot sit in `Connecting` forever.
    pub connect_timeout: Duration,
    /// Redial policy after a drop.
    pub reconnect: ReconnectPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { connect_timeout: Duration::from_secs(10), reconnect: ReconnectPolicy::Disabled }
    }
}

/// Handle to the live chat connection.
///
/// Dropping the handle (or calling [`ChatTransport::close`]) stops the I/O
/// task.
pub struct ChatTransport {
    outbound: mpsc::Sender<OutboundFrame>,
    events: mpsc::Receiver<TransportEvent>,
    state_rx: watch::Receiver<ConnectionState>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    abort_handle: tokio::task::AbortHandle,
    closed: bool,
}

impl ChatTransport {
    /// Open the transport for a session.
    ///
    /// Spawns the I/O task and returns immediately; the handshake proceeds
    /// in the background and is observable on the state channel
    /// (`Connecting`, then `Connected` or `Disconnected`). Must be called
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::EmptySessionId`] if the session id is
    /// empty. Connection failures are not errors here; they flip the state
    /// flag.
    pub fn connect(
        base_url: &str,
        session_id: &SessionId,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        if session_id.as_str().is_empty() {
            return Err(TransportError::EmptySessionId);
        }

        let url = chat_endpoint(base_url, session_id.as_str());
        let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let state_tx = Arc::new(state_tx);

        let task_state = Arc::clone(&state_tx);
        let handle = tokio::spawn(run_connection(url, config, outbound_rx, events_tx, task_state));

        Ok(Self {
            outbound: outbound_tx,
            events: events_rx,
            state_rx,
            state_tx,
            abort_handle: handle.abort_handle(),
            closed: false,
        })
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Whether the socket is currently open.
    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// A watch receiver for connection state changes.
    ///
    /// Cross-component state sync is publish/subscribe, never interval
    /// polling of shared state.
    pub fn state_watch(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Attempt to send message text.
    ///
    /// Returns `true` if the send was attempted: the connection must be
    /// `Connected` and `text` non-blank after trimming. The bool does not
    /// mean the remote acknowledged anything; this transport has no
    /// acknowledgement protocol.
    pub fn send(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.send_frame(OutboundFrame::new(text))
    }

    /// Queue a pre-built outbound frame. Returns `true` if attempted.
    pub fn send_frame(&self, frame: OutboundFrame) -> bool {
        if !self.is_connected() {
            return false;
        }
        match self.outbound.try_send(frame) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("outbound queue rejected frame: {e}");
                false
            },
        }
    }

    /// Non-blocking poll for the next transport event.
    ///
    /// State changes are reported before queued inbound payloads.
    pub fn poll_event(&mut self) -> Option<TransportEvent> {
        if self.state_rx.has_changed().unwrap_or(false) {
            return Some(TransportEvent::State(*self.state_rx.borrow_and_update()));
        }
        self.events.try_recv().ok()
    }

    /// Await the next transport event. `None` once the transport has
    /// stopped and all events are drained.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        tokio::select! {
            changed = self.state_rx.changed() => match changed {
                Ok(()) => Some(TransportEvent::State(*self.state_rx.borrow_and_update())),
                Err(_) => None,
            },
            event = self.events.recv() => event,
        }
    }

    /// Close the connection. Idempotent; safe to call when not connected.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.abort_handle.abort();
        self.state_tx.send_replace(ConnectionState::Disconnected);
    }
}

impl Drop for ChatTransport {
    fn drop(&mut self) {
        self.close();
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection task: dial, pump the socket, and redial per policy.
async fn run_connection(
    url: String,
    config: TransportConfig,
    mut outbound: mpsc::Receiver<OutboundFrame>,
    events: mpsc::Sender<TransportEvent>,
    state: Arc<watch::Sender<ConnectionState>>,
) {
    let mut delay = match config.reconnect {
        ReconnectPolicy::Backoff { initial, .. } => initial,
        ReconnectPolicy::Disabled => Duration::ZERO,
    };

    loop {
        state.send_replace(ConnectionState::Connecting);

        match tokio::time::timeout(config.connect_timeout, connect_async(&url)).await {
            Ok(Ok((socket, _response))) => {
                tracing::debug!(%url, "websocket connection established");
                state.send_replace(ConnectionState::Connected);
                if let ReconnectPolicy::Backoff { initial, .. } = config.reconnect {
                    delay = initial;
                }

                run_socket(socket, &mut outbound, &events).await;
                tracing::debug!(%url, "websocket connection closed");
            },
            Ok(Err(e)) => {
                tracing::warn!(%url, "websocket connect failed: {e}");
            },
            Err(_) => {
                tracing::warn!(%url, timeout = ?config.connect_timeout, "websocket connect timed out");
            },
        }

        state.send_replace(ConnectionState::Disconnected);

        match config.reconnect {
            ReconnectPolicy::Disabled => return,
            ReconnectPolicy::Backoff { max, .. } => {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(max);
            },
        }
    }
}

/// Pump one open socket until it drops or the handle goes away.
async fn run_socket(
    socket: WsStream,
    outbound: &mut mpsc::Receiver<OutboundFrame>,
    events: &mpsc::Sender<TransportEvent>,
) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = outbound.recv() => match frame {
                Some(frame) => {
                    let text = match frame.encode() {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("failed to encode outbound frame: {e}");
                            continue;
                        },
                    };
                    if let Err(e) = sink.send(WsMessage::text(text)).await {
                        tracing::warn!("websocket send failed: {e}");
                        return;
                    }
                },
                // Handle dropped; close politely.
                None => {
                    let _ = sink.close().await;
                    return;
                },
            },
            message = stream.next() => match message {
                Some(Ok(WsMessage::Text(text))) => {
                    if !deliver_frame(text.as_str(), events).await {
                        return;
                    }
                },
                Some(Ok(WsMessage::Close(_))) => {
                    tracing::debug!("websocket closed by remote");
                    return;
                },
                // Pings are answered by tungstenite; binary frames are not
                // part of this wire contract.
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    tracing::warn!("websocket receive failed: {e}");
                    return;
                },
                None => return,
            },
        }
    }
}

/// Classify a text frame and forward it. Returns `false` if the event
/// channel is gone.
async fn deliver_frame(raw: &str, events: &mpsc::Sender<TransportEvent>) -> bool {
    let event = match InboundFrame::classify(raw) {
        InboundFrame::Message(content) => TransportEvent::Message(content),
        InboundFrame::History(entries) => TransportEvent::History(entries),
        InboundFrame::Malformed(reason) => {
            tracing::warn!(%reason, "dropping malformed inbound frame");
            return true;
        },
    };
    events.send(event).await.is_ok()
}
