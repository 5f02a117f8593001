//! UseCase: ルーム内ブロードキャスト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//! - ルームのメンバー全員（送信者自身を含む）への配信
//!
//! ### なぜこのテストが必要か
//! - 同じルームのメンバーにだけ届き、他のルームには漏れないことを保証
//! - 一部のメンバーへの送信失敗が他のメンバーへの配信を止めないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーへの配信
//! - 異常系：切断済み・キュー満杯のメンバーが混在
//! - エッジケース：空のルーム、存在しないルーム

use std::sync::Arc;

use crate::domain::{RoomKey, RoomRegistry};

/// Fan-out result for one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members whose outbound queue accepted the payload
    pub delivered: usize,
    /// Members that were closed or saturated and got skipped
    pub failed: usize,
}

/// ルーム内ブロードキャストのユースケース
pub struct BroadcastMessageUseCase {
    /// Registry（ルーム所属の共有状態）
    registry: Arc<dyn RoomRegistry>,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ブロードキャストを実行
    ///
    /// 呼び出し時点のメンバー全員（送信者を含む）に `payload` をそのまま送ります。
    /// 個々のメンバーへの送信失敗はログに残してスキップし、呼び出し元には伝播しません。
    ///
    /// # Arguments
    ///
    /// * `room` - 配信先のルーム
    /// * `payload` - 受信したエンベロープの元テキスト
    pub async fn execute(&self, room: &RoomKey, payload: &str) -> BroadcastReport {
        let members = self.registry.members(room).await;

        let mut report = BroadcastReport::default();
        for member in members {
            match member.send(payload) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    tracing::warn!(%room, error = %e, "Skipping unreachable member");
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            %room,
            delivered = report.delivered,
            failed = report.failed,
            "Broadcast finished"
        );
        report
    }
}
