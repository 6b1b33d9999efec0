//! ユースケースのテスト用ヘルパー

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{ConnectionId, MemberRemoval, RepositoryError, Room, RoomId, RoomRepository, Session},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
};

use super::{
    ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, EventSerializer,
    JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase,
};

/// 接続済みのピア（セッションと受信側チャンネル）
pub struct TestPeer {
    pub session: Session,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestPeer {
    /// これまでに届いたメッセージを全て取り出す
    pub fn drain(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// これまでに届いたメッセージを JSON として全て取り出す
    pub fn drain_json(&mut self) -> Vec<serde_json::Value> {
        self.drain()
            .iter()
            .map(|message| serde_json::from_str(message).unwrap())
            .collect()
    }
}

/// インメモリ実装で組み立てたユースケース一式
pub struct TestContext {
    pub repository: Arc<InMemoryRoomRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub events: Arc<EventSerializer>,
    pub connect_peer: ConnectPeerUseCase,
    pub create_room: CreateRoomUseCase,
    pub join_room: JoinRoomUseCase,
    pub relay_message: RelayMessageUseCase,
    pub disconnect_peer: DisconnectPeerUseCase,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let events = Arc::new(EventSerializer::new());
        let leave_room = Arc::new(LeaveRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        Self {
            connect_peer: ConnectPeerUseCase::new(message_pusher.clone()),
            create_room: CreateRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                leave_room.clone(),
                events.clone(),
            )
            .with_capacity(capacity),
            join_room: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                leave_room.clone(),
                events.clone(),
            ),
            relay_message: RelayMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                events.clone(),
            ),
            disconnect_peer: DisconnectPeerUseCase::new(
                message_pusher.clone(),
                leave_room,
                events.clone(),
            ),
            repository,
            message_pusher,
            events,
        }
    }

    /// 新しいピアを接続する
    pub async fn connect(&self) -> TestPeer {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = self.connect_peer.execute(tx).await;
        TestPeer { session, rx }
    }
}

/// `add_member` の直後で一時停止する Repository
///
/// 参加処理の途中に他の接続のイベントを割り込ませるために使う。
pub struct PausingRoomRepository {
    inner: Arc<dyn RoomRepository>,
    paused: Notify,
    resume: Notify,
}

impl PausingRoomRepository {
    pub fn new(inner: Arc<dyn RoomRepository>) -> Self {
        Self {
            inner,
            paused: Notify::new(),
            resume: Notify::new(),
        }
    }

    /// `add_member` が一時停止するまで待つ
    pub async fn wait_until_paused(&self) {
        self.paused.notified().await;
    }

    /// 一時停止中の `add_member` を再開させる
    pub fn resume(&self) {
        self.resume.notify_one();
    }
}

#[async_trait]
impl RoomRepository for PausingRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        self.inner.insert_room(room).await
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        member: ConnectionId,
    ) -> Result<Vec<ConnectionId>, RepositoryError> {
        let result = self.inner.add_member(room_id, member).await;
        self.paused.notify_one();
        self.resume.notified().await;
        result
    }

    async fn get_members(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RepositoryError> {
        self.inner.get_members(room_id).await
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        member: &ConnectionId,
    ) -> Result<MemberRemoval, RepositoryError> {
        self.inner.remove_member(room_id, member).await
    }

    async fn count_rooms(&self) -> usize {
        self.inner.count_rooms().await
    }
}
