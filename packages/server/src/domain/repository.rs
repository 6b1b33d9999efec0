//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, MemberRemoval, RepositoryError, Room, RoomId};

/// Room Repository trait
///
/// ルーム ID からルームへの対応を管理する Registry。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 不変条件
///
/// - 参加者が 0 人のルームは保持しない（最後の参加者の削除と同時にルームを削除する）
/// - 各メソッドは検索と更新をまとめて 1 つの操作として行う
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを登録。同じ ID のルームが既に存在する場合はエラー。
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// 参加者を追加し、追加した接続以外の参加者一覧を返す
    async fn add_member(
        &self,
        room_id: &RoomId,
        member: ConnectionId,
    ) -> Result<Vec<ConnectionId>, RepositoryError>;

    /// ルームの参加者一覧を取得
    async fn get_members(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RepositoryError>;

    /// 参加者を削除。空になったルームはその場で削除する。
    async fn remove_member(
        &self,
        room_id: &RoomId,
        member: &ConnectionId,
    ) -> Result<MemberRemoval, RepositoryError>;

    /// 存在するルーム数を取得
    async fn count_rooms(&self) -> usize;
}
