//! UseCase: ルーム参加処理

use std::sync::Arc;

use crate::domain::{Connection, RoomKey, RoomRegistry};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルーム所属の共有状態）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// ルームが存在しなければ暗黙的に作成されます。返信は行いません。
    ///
    /// # Returns
    ///
    /// 新たに参加した場合は `true`、既に参加済みの場合は `false`
    pub async fn execute(&self, room: RoomKey, connection: &Arc<Connection>) -> bool {
        let connection_id = connection.id();
        let inserted = self.registry.join(room.clone(), connection).await;
        if inserted {
            tracing::info!(%connection_id, %room, "Connection joined room");
        } else {
            tracing::debug!(%connection_id, %room, "Connection already in room");
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MockRoomRegistry, Timestamp},
        infrastructure::repository::InMemoryRoomRegistry,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_join_room_delegates_to_registry() {
        // テスト項目: Registry の join が部屋名と接続を渡して 1 回だけ呼ばれる
        // given (前提条件):
        let (tx, _rx) = mpsc::channel(1);
        let connection = Arc::new(Connection::new(
            ConnectionId::generate(),
            Timestamp::new(0),
            tx,
        ));
        let expected_id = connection.id();
        let mut registry = MockRoomRegistry::new();
        registry
            .expect_join()
            .withf(move |room, c| room.as_str() == "alpha" && c.id() == expected_id)
            .times(1)
            .returning(|_, _| true);
        let usecase = JoinRoomUseCase::new(Arc::new(registry));

        // when (操作):
        let result = usecase.execute(RoomKey::from("alpha"), &connection).await;

        // then (期待する結果):
        assert!(result);
    }

    #[tokio::test]
    async fn test_join_room_twice_reports_existing_member() {
        // テスト項目: 2 回目の参加は false を返し、メンバーは 1 件のまま
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (tx, _rx) = mpsc::channel(1);
        let connection = Arc::new(Connection::new(
            ConnectionId::generate(),
            Timestamp::new(0),
            tx,
        ));
        usecase.execute(RoomKey::from("alpha"), &connection).await;

        // when (操作):
        let result = usecase.execute(RoomKey::from("alpha"), &connection).await;

        // then (期待する結果):
        assert!(!result);
        assert_eq!(registry.members(&RoomKey::from("alpha")).await.len(), 1);
    }
}
