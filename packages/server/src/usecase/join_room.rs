//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム ID の正規化、参加者の追加、room-joined の返信、client-joined の通知
//!
//! ### なぜこのテストが必要か
//! - 既存の参加者（通常はホスト）は client-joined を受けてネゴシエーションを開始する
//! - 存在しないルームへの参加は Registry を変更してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：小文字の ID でのルーム参加
//! - 異常系：存在しないルーム、上限に達したルーム
//! - エッジケース：閉じた接続への通知のスキップ、別ルームからの移動、同じルームへの再参加

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RepositoryError, RoomError, RoomId, RoomRepository, Session},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{
    error::JoinRoomError, event_serializer::EventSerializer, leave_room::LeaveRoomUseCase,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 以前のルームから抜けるためのユースケース
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// イベントを 1 つずつ処理するためのロック（他のユースケースと共有）
    events: Arc<EventSerializer>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        events: Arc<EventSerializer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            leave_room_usecase,
            events,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 参加を要求した接続のセッション
    /// * `raw_room_id` - クライアントが指定したルーム ID（大文字小文字を区別しない）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 参加したルームの ID（正規化済み）
    /// * `Err(JoinRoomError)` - 参加失敗。この場合 Registry とセッションは変更されない。
    pub async fn execute(
        &self,
        session: &mut Session,
        raw_room_id: &str,
    ) -> Result<RoomId, JoinRoomError> {
        let _event = self.events.acquire().await;
        let room_id = RoomId::normalized(raw_room_id);
        let member = session.connection_id();

        // 1. ルームに参加者を追加
        let others = match self.repository.add_member(&room_id, member).await {
            Ok(others) => others,
            Err(RepositoryError::RoomNotFound(id)) => {
                return Err(JoinRoomError::RoomNotFound(id));
            }
            Err(RepositoryError::Room(RoomError::CapacityExceeded(capacity))) => {
                return Err(JoinRoomError::RoomFull { room_id, capacity });
            }
            Err(e) => return Err(e.into()),
        };

        // 2. 別のルームに参加していた場合はそこから抜ける
        if let Some(previous) = session.room_id().filter(|id| **id != room_id).cloned()
            && let Err(e) = self.leave_room_usecase.execute(member, &previous).await
        {
            tracing::warn!("Failed to leave room '{}' for '{}': {}", previous, member, e);
        }

        // 3. セッションに紐付けて、参加者本人に通知
        session.associate(room_id.clone());
        let joined = ServerMessage::RoomJoined {
            room_id: room_id.to_string(),
        }
        .to_json()?;
        if let Err(e) = self.message_pusher.push_to(&member, &joined).await {
            tracing::warn!("Failed to send room-joined to '{}': {}", member, e);
        }

        // 4. 他の参加者に client-joined を通知（閉じた接続はスキップ）
        let notification = ServerMessage::ClientJoined.to_json()?;
        if let Err(e) = self.message_pusher.broadcast(others, &notification).await {
            tracing::warn!("Failed to broadcast client-joined for '{}': {}", member, e);
        }

        tracing::info!("Connection '{}' joined room '{}'", member, room_id);
        Ok(room_id)
    }
}
