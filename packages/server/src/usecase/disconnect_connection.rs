//! UseCase: 接続切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - 切断時の状態遷移（Open → Closing → Closed）と全ルームからの purge
//!
//! ### なぜこのテストが必要か
//! - 切断した接続への配信（古いファンアウト先）が残らないことを保証
//! - 明示的な leave なしの切断でも、全ての所属ルームから外れることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに所属した接続の切断
//! - エッジケース：どのルームにも所属していない接続、二重の切断

use std::sync::Arc;

use crate::domain::{Connection, RoomKey, RoomRegistry};

/// 接続切断のユースケース
pub struct DisconnectConnectionUseCase {
    /// Registry（ルーム所属の共有状態）
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 接続切断を実行
    ///
    /// 1. Closing に遷移（以降の送信は失敗する）
    /// 2. 全ルームから purge
    /// 3. Closed に遷移
    ///
    /// 何度呼んでも安全です。
    ///
    /// # Returns
    ///
    /// 切断によって退出したルームの一覧
    pub async fn execute(&self, connection: &Arc<Connection>) -> Vec<RoomKey> {
        let connection_id = connection.id();

        connection.begin_close();
        let left = self.registry.purge(&connection_id).await;
        connection.close();

        tracing::info!(
            %connection_id,
            rooms = left.len(),
            "Client disconnected and purged from registry"
        );
        left
    }
}
