//! Domain layer: connections, rooms and the envelopes that move between them.

pub mod connection;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod value_object;

pub use connection::{Connection, ConnectionState, OutboundReceiver, OutboundSender};
pub use envelope::Envelope;
pub use error::SendError;
pub use registry::{RoomRegistry, RoomSummary};
pub use value_object::{ConnectionId, RoomKey, Timestamp};

#[cfg(test)]
pub use registry::MockRoomRegistry;
