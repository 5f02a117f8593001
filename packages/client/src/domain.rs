//! Domain logic for client-side operations.
//!
//! Pure state and decisions, kept free of I/O so they are easy to test.

use crate::error::ClientError;

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that ended the session
/// * `current_attempt` - Number of consecutive failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if matches!(error, ClientError::InvalidUrl(_)) {
        return false;
    }

    current_attempt < max_attempts
}

/// Rooms this client has joined, in join order.
///
/// The most recently joined room is the current room, which receives typed
/// messages. The set is kept across reconnects so membership can be restored.
#[derive(Debug, Clone, Default)]
pub struct JoinedRooms {
    rooms: Vec<String>,
}

impl JoinedRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join. Joining an already-held room makes it current again.
    pub fn join(&mut self, room: impl Into<String>) {
        let room = room.into();
        self.rooms.retain(|r| *r != room);
        self.rooms.push(room);
    }

    /// Record a leave. Returns `false` if the room was not held.
    pub fn leave(&mut self, room: &str) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r != room);
        self.rooms.len() != before
    }

    pub fn current(&self) -> Option<&str> {
        self.rooms.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(String::as_str)
    }
}
