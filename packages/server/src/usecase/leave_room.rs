//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 参加者の削除と、残りの参加者への client-left 通知
//!
//! ### なぜこのテストが必要か
//! - 最後の参加者が抜けたルームは即座に削除されなければならない
//! - 残りの参加者はネゴシエーション状態をリセットするために通知を必要とする
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者が残る退出（通知あり）
//! - エッジケース：最後の参加者の退出（ルーム削除、通知なし）
//! - エッジケース：存在しないルーム・参加していないルームからの退出（何もしない）

use std::sync::Arc;

use genkan_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{
        ConnectionId, MemberRemoval, MessagePusher, RepositoryError, RoomId, RoomRepository,
        Timestamp,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::error::LeaveRoomError;

/// 退出処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveOutcome {
    /// 最後の参加者だったためルームを削除した
    RoomDeleted(RoomId),
    /// 残りの参加者に通知した
    Notified {
        room_id: RoomId,
        remaining: Vec<ConnectionId>,
    },
    /// ルームに参加していなかった（何もしていない）
    NotInRoom,
}

/// ルーム退出のユースケース
///
/// 切断時と、別のルームへ移るときの両方から使われる。
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム退出を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退出する接続の ID
    /// * `room_id` - 退出するルームの ID
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: &RoomId,
    ) -> Result<LeaveOutcome, LeaveRoomError> {
        let removal = match self.repository.remove_member(room_id, &connection_id).await {
            Ok(removal) => removal,
            Err(RepositoryError::RoomNotFound(_)) => {
                tracing::debug!(
                    "Room '{}' no longer exists, nothing to leave for '{}'",
                    room_id,
                    connection_id
                );
                return Ok(LeaveOutcome::NotInRoom);
            }
            Err(e) => return Err(e.into()),
        };

        match removal {
            MemberRemoval::RoomDeleted(room) => {
                tracing::info!(
                    "Room '{}' is empty and was removed (created at {}, lived {} ms)",
                    room.id,
                    timestamp_to_rfc3339(room.created_at.value()),
                    Timestamp::now().millis_since(room.created_at)
                );
                Ok(LeaveOutcome::RoomDeleted(room.id))
            }
            MemberRemoval::Remaining(remaining) => {
                let message = ServerMessage::ClientLeft.to_json()?;
                self.message_pusher
                    .broadcast(remaining.clone(), &message)
                    .await?;
                tracing::info!(
                    "Connection '{}' left room '{}' ({} remaining)",
                    connection_id,
                    room_id,
                    remaining.len()
                );
                Ok(LeaveOutcome::Notified {
                    room_id: room_id.clone(),
                    remaining,
                })
            }
            MemberRemoval::NotMember => Ok(LeaveOutcome::NotInRoom),
        }
    }
}
