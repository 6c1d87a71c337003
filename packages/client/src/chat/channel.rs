//! Room-scoped WebSocket channel session.
//!
//! One [`ChannelSession`] owns one socket connection bound to one room.
//! Connection establishment is asynchronous: the session starts out
//! `Connecting` and reports progress through a typed event stream consumed in
//! a single dispatch loop. There is no outbound queue and no automatic
//! reconnection; a frame sent while the transport is not open is dropped with
//! a warning, and a lost connection stays lost until a fresh session is
//! opened.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{envelope::ChatFrame, error::ChatError};

/// Lifecycle states of a channel session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Connecting,
    Open,
    Closed,
}

/// Events delivered by a channel session, in transport order
#[derive(Debug)]
pub enum ChannelEvent {
    /// The transport reported itself open
    Opened,
    /// A well-formed inbound frame arrived
    MessageReceived(ChatFrame),
    /// The transport is gone; no further events follow
    Closed,
    /// A transport-level failure occurred (always followed by `Closed`)
    Errored(ChatError),
}

/// One live socket connection bound to a room
pub struct ChannelSession {
    state: Arc<Mutex<ChannelState>>,
    outbound: Option<mpsc::UnboundedSender<String>>,
}

impl ChannelSession {
    /// Open a session against a room-scoped endpoint URL.
    ///
    /// Returns immediately with the session handle and its event receiver;
    /// the connection attempt proceeds in the background and its outcome
    /// arrives as [`ChannelEvent`]s. There is no connect timeout; the only
    /// way out of a hanging attempt is [`ChannelSession::close`].
    pub fn connect(url: String) -> (Self, mpsc::UnboundedReceiver<ChannelEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(ChannelState::Connecting));

        tokio::spawn(run_session(url, state.clone(), outbound_rx, event_tx));

        (
            Self {
                state,
                outbound: Some(outbound_tx),
            },
            event_rx,
        )
    }

    /// Current lifecycle state
    pub fn state(&self) -> ChannelState {
        load_state(&self.state)
    }

    /// Whether the transport is currently open
    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    /// Serialize and transmit a frame.
    ///
    /// Outside the `Open` state the frame is dropped with a logged warning;
    /// the call itself always succeeds (no queueing, no error to the caller).
    pub fn send_frame(&self, frame: &ChatFrame) {
        if self.state() != ChannelState::Open {
            tracing::warn!("Channel is not connected; outbound frame dropped");
            return;
        }

        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize frame: {}", e);
                return;
            }
        };

        if let Some(outbound) = &self.outbound
            && outbound.send(json).is_err()
        {
            tracing::warn!("Channel task is gone; outbound frame dropped");
        }
    }

    /// Request transport shutdown.
    ///
    /// Closing an already-closed or never-opened session is a safe no-op;
    /// `send_frame` after `close` behaves like the not-connected case.
    pub fn close(&mut self) {
        store_state(&self.state, ChannelState::Closed);
        // Dropping the outbound sender makes the session task shut the
        // socket down and emit its final Closed event.
        self.outbound = None;
    }

    /// Session wired to a recording transport instead of a socket, for tests.
    #[cfg(test)]
    pub(crate) fn with_recording_transport(
        initial: ChannelState,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        (
            Self {
                state: Arc::new(Mutex::new(initial)),
                outbound: Some(outbound_tx),
            },
            outbound_rx,
        )
    }
}

/// Decode one inbound text payload.
///
/// A payload that fails to parse is dropped with a warning; it never crashes
/// the session or reaches the log.
fn decode_frame(text: &str) -> Option<ChatFrame> {
    match ChatFrame::parse(text) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::warn!("Dropping malformed frame: {}", e);
            None
        }
    }
}

fn load_state(state: &Mutex<ChannelState>) -> ChannelState {
    *state.lock().unwrap_or_else(|e| e.into_inner())
}

fn store_state(state: &Mutex<ChannelState>, next: ChannelState) {
    *state.lock().unwrap_or_else(|e| e.into_inner()) = next;
}

/// Background task owning the socket for one session.
async fn run_session(
    url: String,
    state: Arc<Mutex<ChannelState>>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ChannelEvent>,
) {
    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", url, e);
            store_state(&state, ChannelState::Closed);
            let _ = events.send(ChannelEvent::Errored(ChatError::Transport(e.to_string())));
            let _ = events.send(ChannelEvent::Closed);
            return;
        }
    };

    // close() may have raced the connection attempt
    if load_state(&state) == ChannelState::Closed {
        tracing::debug!("Session closed while connecting; discarding transport");
        let _ = events.send(ChannelEvent::Closed);
        return;
    }

    store_state(&state, ChannelState::Open);
    let _ = events.send(ChannelEvent::Opened);
    tracing::info!("Connected to {}", url);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            outgoing = outbound_rx.recv() => {
                match outgoing {
                    Some(json) => {
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            tracing::warn!("Failed to send frame: {}", e);
                            let _ = events.send(ChannelEvent::Errored(ChatError::Transport(
                                e.to_string(),
                            )));
                            break;
                        }
                    }
                    None => {
                        // close() dropped the sender; shut the transport down
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(frame) = decode_frame(&text) {
                            let _ = events.send(ChannelEvent::MessageReceived(frame));
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong is handled by the protocol; binary is not
                        // part of the chat contract
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        let _ = events.send(ChannelEvent::Errored(ChatError::Transport(
                            e.to_string(),
                        )));
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    store_state(&state, ChannelState::Closed);
    let _ = events.send(ChannelEvent::Closed);
}
