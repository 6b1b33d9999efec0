//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! プロセスの再起動で全てのルームは失われます。ルームは短命な待ち合わせ場所で
//! あり、永続化は行いません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MemberRemoval, RepositoryError, Room, RoomId, RoomRepository};

/// インメモリ Room Repository 実装
///
/// ルーム ID からルームへのマップを保持し、ドメイン層の RoomRepository trait を
/// 実装します（依存性の逆転）。各メソッドは 1 回のロック取得の中で検索と更新を
/// 行うため、他の接続からの操作と混ざりません。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: ルーム ID, Value: ルーム
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.id) {
            return Err(RepositoryError::RoomAlreadyExists(room.id));
        }
        rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        member: ConnectionId,
    ) -> Result<Vec<ConnectionId>, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.clone()))?;
        room.add_member(member)?;
        Ok(room.members_except(&member))
    }

    async fn get_members(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.members.iter().copied().collect())
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.clone()))
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        member: &ConnectionId,
    ) -> Result<MemberRemoval, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.clone()))?;

        if !room.remove_member(member) {
            return Ok(MemberRemoval::NotMember);
        }

        if room.is_empty() {
            // 空のルームは保持しない
            let removed = rooms
                .remove(room_id)
                .ok_or_else(|| RepositoryError::RoomNotFound(room_id.clone()))?;
            return Ok(MemberRemoval::RoomDeleted(removed));
        }

        Ok(MemberRemoval::Remaining(
            room.members.iter().copied().collect(),
        ))
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
