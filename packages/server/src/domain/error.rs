//! Domain errors.

use thiserror::Error;

use super::ConnectionId;

/// Failure to hand a payload to a connection's outbound queue.
///
/// Both variants mean "peer unreachable": callers fanning out to a room log
/// them and move on to the next member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The connection is closing or closed, or its writer has gone away
    #[error("connection '{0}' is closed")]
    Closed(ConnectionId),

    /// The bounded outbound queue is full (slow or unresponsive peer)
    #[error("outbound queue of connection '{0}' is full")]
    QueueFull(ConnectionId),
}
