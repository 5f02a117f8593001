//! Routing view of an inbound envelope.

use super::RoomKey;

/// What the relay does with one inbound envelope.
///
/// Only the routing directive and room are interpreted. For `Broadcast` the
/// complete original envelope text is kept as the payload and forwarded
/// unchanged, so drawing fields such as `type`, `strokeId` or `point` pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Join { room: RoomKey },
    Leave { room: RoomKey },
    Broadcast { room: RoomKey, payload: String },
}

impl Envelope {
    pub fn room(&self) -> &RoomKey {
        match self {
            Self::Join { room } | Self::Leave { room } | Self::Broadcast { room, .. } => room,
        }
    }

    /// Short action name for logs.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Broadcast { .. } => "broadcast",
        }
    }
}
