//! A single duplex client connection and its delivery state.

use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::mpsc::{self, error::TrySendError};

use super::{ConnectionId, SendError, Timestamp};

/// Sending half of a connection's bounded outbound queue.
pub type OutboundSender = mpsc::Sender<String>;
/// Receiving half, drained by the connection's writer task.
pub type OutboundReceiver = mpsc::Receiver<String>;

const STATE_OPEN: u8 = 0;
const STATE_CLOSING: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// Lifecycle of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closing,
    Closed,
}

impl ConnectionState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            STATE_OPEN => Self::Open,
            STATE_CLOSING => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// One client connection.
///
/// The accepting task owns the `Arc<Connection>`; room membership only keeps
/// weak references. Delivery goes through a bounded queue so `send` never
/// blocks the caller, and it fails cleanly once the connection starts closing.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    connected_at: Timestamp,
    state: AtomicU8,
    outbound: OutboundSender,
}

impl Connection {
    /// Create an open connection that delivers into `outbound`.
    pub fn new(id: ConnectionId, connected_at: Timestamp, outbound: OutboundSender) -> Self {
        Self {
            id,
            connected_at,
            state: AtomicU8::new(STATE_OPEN),
            outbound,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_raw(self.state.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Queue `payload` for delivery to the peer.
    ///
    /// # Errors
    ///
    /// * `SendError::Closed` - the connection is not open or its writer is gone
    /// * `SendError::QueueFull` - the outbound queue is saturated
    pub fn send(&self, payload: &str) -> Result<(), SendError> {
        if !self.is_open() {
            return Err(SendError::Closed(self.id));
        }

        self.outbound
            .try_send(payload.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => SendError::QueueFull(self.id),
                TrySendError::Closed(_) => SendError::Closed(self.id),
            })
    }

    /// Mark the connection as closing. Returns `true` only for the caller that
    /// moved it out of `Open`.
    pub fn begin_close(&self) -> bool {
        self.state
            .compare_exchange(
                STATE_OPEN,
                STATE_CLOSING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Finalize the connection. Idempotent; returns `true` on the first call.
    pub fn close(&self) -> bool {
        self.state.swap(STATE_CLOSED, Ordering::AcqRel) != STATE_CLOSED
    }
}
