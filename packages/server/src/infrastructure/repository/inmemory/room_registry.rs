//! InMemory RoomRegistry 実装
//!
//! ドメイン層が定義する `RoomRegistry` trait の具体的な実装。
//! ルームごとのメンバー集合と、接続ごとの所属ルーム（逆引きインデックス）を
//! 1 つの `RwLock` で保護します。
//!
//! - join / leave / purge は書き込みロックで直列化
//! - members は読み込みロックで一貫したスナップショットを返す
//! - メンバーは `Weak<Connection>` で保持し、接続の所有権は持たない

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Weak},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Connection, ConnectionId, RoomKey, RoomRegistry, RoomSummary};

#[derive(Default)]
struct RegistryState {
    /// room key -> members
    rooms: HashMap<RoomKey, HashMap<ConnectionId, Weak<Connection>>>,
    /// connection -> rooms it has joined
    memberships: HashMap<ConnectionId, HashSet<RoomKey>>,
}

impl RegistryState {
    fn remove_member(&mut self, room: &RoomKey, connection_id: &ConnectionId) -> bool {
        let Some(members) = self.rooms.get_mut(room) else {
            return false;
        };
        let removed = members.remove(connection_id).is_some();
        if members.is_empty() {
            self.rooms.remove(room);
        }
        removed
    }
}

/// インメモリ RoomRegistry 実装
///
/// 空になったルームはエントリごと削除します。
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room: RoomKey, connection: &Arc<Connection>) -> bool {
        let connection_id = connection.id();
        let mut state = self.state.write().await;

        // Checked under the lock: purge runs after begin_close, so a closing
        // connection can never be re-added behind it.
        if !connection.is_open() {
            return false;
        }

        let inserted = state
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id, Arc::downgrade(connection))
            .is_none();
        state
            .memberships
            .entry(connection_id)
            .or_default()
            .insert(room);

        inserted
    }

    async fn leave(&self, room: &RoomKey, connection_id: &ConnectionId) -> bool {
        let mut state = self.state.write().await;

        let removed = state.remove_member(room, connection_id);
        if let Some(joined) = state.memberships.get_mut(connection_id) {
            joined.remove(room);
            if joined.is_empty() {
                state.memberships.remove(connection_id);
            }
        }

        removed
    }

    async fn members(&self, room: &RoomKey) -> Vec<Arc<Connection>> {
        let state = self.state.read().await;

        state
            .rooms
            .get(room)
            .map(|members| members.values().filter_map(Weak::upgrade).collect())
            .unwrap_or_default()
    }

    async fn purge(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        let mut state = self.state.write().await;

        let Some(joined) = state.memberships.remove(connection_id) else {
            return Vec::new();
        };

        let mut left: Vec<RoomKey> = joined
            .into_iter()
            .filter(|room| state.remove_member(room, connection_id))
            .collect();
        left.sort();
        left
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.read().await;

        let mut summaries: Vec<RoomSummary> = state
            .rooms
            .iter()
            .map(|(room, members)| RoomSummary {
                room: room.clone(),
                member_count: members.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.room.cmp(&b.room));
        summaries
    }
}
