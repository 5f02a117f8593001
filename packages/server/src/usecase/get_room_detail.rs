//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Connection, RoomKey, RoomRegistry};

use super::error::RoomQueryError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルームの現在のメンバーを接続時刻順に返す
    ///
    /// # Errors
    ///
    /// メンバーがいない（空のルームは保持しないため存在しない）場合は
    /// `RoomQueryError::RoomNotFound`
    pub async fn execute(&self, room: String) -> Result<Vec<Arc<Connection>>, RoomQueryError> {
        let key = RoomKey::from(room);
        let mut members = self.registry.members(&key).await;
        if members.is_empty() {
            return Err(RoomQueryError::RoomNotFound(key.into_string()));
        }

        members.sort_by_key(|c| (c.connected_at(), c.id()));
        Ok(members)
    }
}
