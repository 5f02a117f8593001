//! Message router: dispatches decoded envelopes to the room use cases.
//!
//! The router keeps no state between envelopes; everything lives in the
//! registry and the connections.

use std::sync::Arc;

use crate::domain::{Connection, Envelope};

use super::{BroadcastMessageUseCase, BroadcastReport, JoinRoomUseCase, LeaveRoomUseCase};

/// What routing one envelope did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Joined { inserted: bool },
    Left { removed: bool },
    Broadcast(BroadcastReport),
}

/// Routes envelopes from one connection against the shared registry.
pub struct MessageRouter {
    join_room_usecase: Arc<JoinRoomUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
}

impl MessageRouter {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            broadcast_message_usecase,
        }
    }

    /// Route one envelope sent by `connection`.
    ///
    /// Join and leave never reply. Broadcast goes to every member of the room
    /// at the time of the call, the sender included.
    pub async fn route(&self, connection: &Arc<Connection>, envelope: Envelope) -> RouteOutcome {
        tracing::debug!(
            connection_id = %connection.id(),
            action = envelope.action(),
            room = %envelope.room(),
            "Routing envelope"
        );

        match envelope {
            Envelope::Join { room } => RouteOutcome::Joined {
                inserted: self.join_room_usecase.execute(room, connection).await,
            },
            Envelope::Leave { room } => RouteOutcome::Left {
                removed: self
                    .leave_room_usecase
                    .execute(&room, &connection.id())
                    .await,
            },
            Envelope::Broadcast { room, payload } => RouteOutcome::Broadcast(
                self.broadcast_message_usecase
                    .execute(&room, &payload)
                    .await,
            ),
        }
    }
}
