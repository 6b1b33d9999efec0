//! Entity 定義
//!
//! ID によって識別されるドメインオブジェクト群。

use std::collections::HashSet;

use super::{
    error::RoomError,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// ルーム
///
/// 同じルームに参加している接続同士でのみメッセージが中継される。
/// ルームは必ず作成者を含む状態で生成されるため、空のルームは存在しない。
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub members: HashSet<ConnectionId>,
    /// 参加者数の上限（`None` の場合は無制限）
    pub capacity: Option<usize>,
    pub created_at: Timestamp,
}

impl Room {
    /// 作成者のみが参加した状態のルームを作成
    pub fn new(
        id: RoomId,
        creator: ConnectionId,
        capacity: Option<usize>,
        created_at: Timestamp,
    ) -> Self {
        let mut members = HashSet::new();
        members.insert(creator);
        Self {
            id,
            members,
            capacity,
            created_at,
        }
    }

    /// 参加者を追加
    ///
    /// 既に参加している場合は何もせず `Ok(false)` を返す。
    pub fn add_member(&mut self, member: ConnectionId) -> Result<bool, RoomError> {
        if self.members.contains(&member) {
            return Ok(false);
        }
        if let Some(capacity) = self.capacity
            && self.members.len() >= capacity
        {
            return Err(RoomError::CapacityExceeded(capacity));
        }
        Ok(self.members.insert(member))
    }

    /// 参加者を削除。参加していた場合は `true` を返す。
    pub fn remove_member(&mut self, member: &ConnectionId) -> bool {
        self.members.remove(member)
    }

    pub fn contains(&self, member: &ConnectionId) -> bool {
        self.members.contains(member)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// 指定した接続以外の参加者一覧
    pub fn members_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|id| *id != exclude)
            .copied()
            .collect()
    }
}

/// 参加者削除の結果
#[derive(Debug, Clone, PartialEq)]
pub enum MemberRemoval {
    /// 最後の参加者が抜けたためルームが削除された
    RoomDeleted(Room),
    /// ルームは残っている（残りの参加者一覧）
    Remaining(Vec<ConnectionId>),
    /// 指定した接続はルームに参加していなかった
    NotMember,
}

/// 接続ごとのセッション
///
/// 接続が現在どのルームに属しているかを保持する。Registry はルーム単位で
/// インデックスしているため、この対応は接続側が持つ。
/// `room_id` は create / join でのみ設定され、切断時にクリアされる。
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    connection_id: ConnectionId,
    room_id: Option<RoomId>,
}

impl Session {
    /// ルーム未所属のセッションを作成
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            room_id: None,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    /// ルームに紐付ける。以前の紐付けは上書きされる。
    pub fn associate(&mut self, room_id: RoomId) {
        self.room_id = Some(room_id);
    }

    /// 紐付けを解除し、以前のルーム ID を返す
    pub fn take_room(&mut self) -> Option<RoomId> {
        self.room_id.take()
    }
}
