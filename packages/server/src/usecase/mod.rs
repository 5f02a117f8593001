//! UseCase layer: the relay's operations over the room registry.

pub mod broadcast_message;
pub mod disconnect_connection;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod leave_room;
pub mod router;

pub use broadcast_message::{BroadcastMessageUseCase, BroadcastReport};
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::RoomQueryError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use router::{MessageRouter, RouteOutcome};
