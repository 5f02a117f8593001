//! Shared application state.

use std::sync::Arc;

use kokuban_shared::time::Clock;

use crate::usecase::{
    DisconnectConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, MessageRouter,
};

/// State shared by every handler.
///
/// Holds no per-connection data; room membership lives in the registry
/// behind the use cases.
pub struct AppState {
    /// MessageRouter（エンベロープの振り分け）
    pub message_router: Arc<MessageRouter>,
    /// DisconnectConnectionUseCase（接続切断のユースケース）
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Outbound queue capacity for new connections
    pub outbound_capacity: usize,
    /// Clock used to stamp new connections
    pub clock: Arc<dyn Clock>,
}
