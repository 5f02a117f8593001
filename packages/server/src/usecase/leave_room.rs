//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（ルーム所属の共有状態）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行
    ///
    /// 未参加のルームや存在しないルームからの退出は何もしません（エラーにしない）。
    ///
    /// # Returns
    ///
    /// 実際にメンバーから外れた場合は `true`
    pub async fn execute(&self, room: &RoomKey, connection_id: &ConnectionId) -> bool {
        let removed = self.registry.leave(room, connection_id).await;
        if removed {
            tracing::info!(%connection_id, %room, "Connection left room");
        } else {
            tracing::debug!(%connection_id, %room, "Leave for a room the connection is not in");
        }
        removed
    }
}
