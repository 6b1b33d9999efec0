//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - ルーム ID の生成、作成者のみを含むルームの登録、room-created の返信
//!
//! ### なぜこのテストが必要か
//! - 作成者は返された ID を相手に伝えて待ち合わせる
//! - 既存のルーム ID と衝突した場合に既存ルームを上書きしてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム作成
//! - エッジケース：ID の衝突（再生成）、衝突が続く場合（エラー）
//! - エッジケース：既に別のルームに参加している接続によるルーム作成

use std::sync::Arc;

use crate::{
    domain::{
        ConnectionId, MessagePusher, RandomRoomIdFactory, RepositoryError, Room, RoomId,
        RoomIdFactory, RoomRepository, Session, Timestamp,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::{
    error::CreateRoomError, event_serializer::EventSerializer, leave_room::LeaveRoomUseCase,
};

/// 空いているルーム ID が見つかるまでに試行する回数の上限
pub const MAX_ROOM_ID_ATTEMPTS: usize = 32;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 以前のルームから抜けるためのユースケース
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// ルーム ID の生成器
    room_id_factory: Arc<dyn RoomIdFactory>,
    /// 作成するルームの参加者数上限（`None` の場合は無制限）
    capacity: Option<usize>,
    /// イベントを 1 つずつ処理するためのロック（他のユースケースと共有）
    events: Arc<EventSerializer>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    ///
    /// ルーム ID はランダムに生成され、参加者数は無制限になる。
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
            room_id_factory: Arc::new(RandomRoomIdFactory),
            capacity: None,
            events,
        }
    }

    /// ルーム ID の生成器を差し替える
    pub fn with_room_id_factory(mut self, room_id_factory: Arc<dyn RoomIdFactory>) -> Self {
        self.room_id_factory = room_id_factory;
        self
    }

    /// 作成するルームの参加者数上限を設定する
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 作成を要求した接続のセッション。作成したルームに紐付けられる。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 作成したルームの ID
    /// * `Err(CreateRoomError)` - 作成失敗
    pub async fn execute(&self, session: &mut Session) -> Result<RoomId, CreateRoomError> {
        let _event = self.events.acquire().await;
        let creator = session.connection_id();

        // 1. 空いている ID でルームを登録
        let room_id = self.insert_new_room(creator).await?;

        // 2. 以前のルームから抜ける
        if let Some(previous) = session.room_id().cloned()
            && let Err(e) = self.leave_room_usecase.execute(creator, &previous).await
        {
            tracing::warn!("Failed to leave room '{}' for '{}': {}", previous, creator, e);
        }

        // 3. セッションに紐付けて、作成者にのみ通知
        session.associate(room_id.clone());
        let message = ServerMessage::RoomCreated {
            room_id: room_id.to_string(),
        }
        .to_json()?;
        if let Err(e) = self.message_pusher.push_to(&creator, &message).await {
            tracing::warn!("Failed to send room-created to '{}': {}", creator, e);
        }

        tracing::info!("Room '{}' created by '{}'", room_id, creator);
        Ok(room_id)
    }

    /// 既存のルームと衝突しない ID でルームを登録する
    async fn insert_new_room(&self, creator: ConnectionId) -> Result<RoomId, CreateRoomError> {
        for attempt in 1..=MAX_ROOM_ID_ATTEMPTS {
            let room_id = self.room_id_factory.generate();
            let room = Room::new(room_id.clone(), creator, self.capacity, Timestamp::now());
            match self.repository.insert_room(room).await {
                Ok(()) => return Ok(room_id),
                Err(RepositoryError::RoomAlreadyExists(id)) => {
                    tracing::debug!(
                        "Room id '{}' is already in use (attempt {}), regenerating",
                        id,
                        attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CreateRoomError::RoomIdExhausted(MAX_ROOM_ID_ATTEMPTS))
    }
}
