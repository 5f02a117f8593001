//! Room registry trait.
//!
//! The use case layer depends on this trait only; the concrete store lives in
//! the infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connection, ConnectionId, RoomKey};

/// Room key with its current member count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomKey,
    pub member_count: usize,
}

/// Shared mapping from room key to member connections.
///
/// Invariant: a connection is a member of a room iff its most recent action
/// for that room was a join and it has not been purged since. A connection
/// may be in any number of rooms. Implementations hold no strong references
/// to connections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add `connection` to `room`, creating the room if needed.
    ///
    /// Returns `false` when it was already a member or is no longer open.
    async fn join(&self, room: RoomKey, connection: &Arc<Connection>) -> bool;

    /// Remove a connection from `room`. Unknown rooms and non-members are a
    /// no-op returning `false`.
    async fn leave(&self, room: &RoomKey, connection_id: &ConnectionId) -> bool;

    /// Live members of `room`. Unknown rooms yield an empty list.
    async fn members(&self, room: &RoomKey) -> Vec<Arc<Connection>>;

    /// Remove a connection from every room; returns the rooms it was in.
    async fn purge(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// All non-empty rooms, ordered by key.
    async fn rooms(&self) -> Vec<RoomSummary>;
}
