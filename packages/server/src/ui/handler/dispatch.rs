//! Routing of incoming client envelopes to the use cases.

use crate::{
    domain::{ConnectionId, RoomId, Session},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
};

/// Handles one text frame received from `session`'s connection.
///
/// Malformed input is logged and ignored, leaving the connection open.
/// Errors a client can act on are answered with an `error` envelope sent to
/// the requester only; internal failures are logged only.
pub async fn dispatch_message(state: &AppState, session: &mut Session, raw: &str) {
    let connection_id = session.connection_id();
    let message = match serde_json::from_str::<ClientMessage>(raw) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring malformed message from '{}': {}", connection_id, e);
            return;
        }
    };
    tracing::debug!("Received '{}' from '{}'", message.kind(), connection_id);

    match message {
        ClientMessage::CreateRoom => {
            if let Err(e) = state.create_room_usecase.execute(session).await {
                match e.client_message() {
                    Some(reply) => {
                        tracing::warn!("create-room from '{}' failed: {}", connection_id, e);
                        send_error(state, connection_id, reply).await;
                    }
                    None => tracing::error!("create-room from '{}' failed: {}", connection_id, e),
                }
            }
        }
        ClientMessage::JoinRoom { room_id } => {
            if let Err(e) = state.join_room_usecase.execute(session, &room_id).await {
                match e.client_message() {
                    Some(reply) => {
                        tracing::info!("join-room from '{}' rejected: {}", connection_id, e);
                        send_error(state, connection_id, reply).await;
                    }
                    None => tracing::error!("join-room from '{}' failed: {}", connection_id, e),
                }
            }
        }
        ClientMessage::RelayMessage { room_id } => {
            if let Err(e) = state
                .relay_message_usecase
                .execute(connection_id, RoomId::new(room_id), raw)
                .await
            {
                tracing::warn!("relay-message from '{}' failed: {}", connection_id, e);
            }
        }
    }
}

/// `error` エンベロープを要求元にのみ送信する
async fn send_error(state: &AppState, connection_id: ConnectionId, reply: &str) {
    let envelope = ServerMessage::Error {
        message: reply.to_string(),
    };
    let message = match envelope.to_json() {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Failed to encode error message: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.push_to(&connection_id, &message).await {
        tracing::warn!("Failed to send error to '{}': {}", connection_id, e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        domain::{RoomIdFactory, RoomRepository},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
        usecase::{
            ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, EventSerializer,
            JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase, test_support::TestPeer,
        },
    };

    struct FixedRoomIdFactory(&'static str);

    impl RoomIdFactory for FixedRoomIdFactory {
        fn generate(&self) -> RoomId {
            RoomId::new(self.0.to_string())
        }
    }

    fn build_state(repository: Arc<InMemoryRoomRepository>) -> AppState {
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let events = Arc::new(EventSerializer::new());
        let leave_room = Arc::new(LeaveRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        AppState {
            connect_peer_usecase: Arc::new(ConnectPeerUseCase::new(message_pusher.clone())),
            create_room_usecase: Arc::new(
                CreateRoomUseCase::new(
                    repository.clone(),
                    message_pusher.clone(),
                    leave_room.clone(),
                    events.clone(),
                )
                .with_room_id_factory(Arc::new(FixedRoomIdFactory("AB12"))),
            ),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                leave_room.clone(),
                events.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                repository,
                message_pusher.clone(),
                events.clone(),
            )),
            disconnect_peer_usecase: Arc::new(DisconnectPeerUseCase::new(
                message_pusher.clone(),
                leave_room,
                events,
            )),
            message_pusher,
        }
    }

    async fn connect(state: &AppState) -> TestPeer {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = state.connect_peer_usecase.execute(tx).await;
        TestPeer { session, rx }
    }

    #[tokio::test]
    async fn test_malformed_messages_are_ignored() {
        // テスト項目: パースできないメッセージは応答も状態変更もせずに無視される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = build_state(repository.clone());
        let mut peer = connect(&state).await;

        // when (操作):
        for raw in [
            "not json",
            "{}",
            r#"{"type":"unknown"}"#,
            r#"{"type":"join-room"}"#,
            r#"{"type":"join-room","roomId":42}"#,
            r#"{"type":"relay-message"}"#,
            "[]",
        ] {
            dispatch_message(&state, &mut peer.session, raw).await;
        }

        // then (期待する結果):
        assert!(peer.drain().is_empty());
        assert_eq!(peer.session.room_id(), None);
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_join_unknown_room_replies_error_to_requester_only() {
        // テスト項目: 存在しないルームへの参加要求には、要求元にのみ error が返る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = build_state(repository.clone());
        let mut host = connect(&state).await;
        let mut guest = connect(&state).await;
        dispatch_message(&state, &mut host.session, r#"{"type":"create-room"}"#).await;
        host.drain();

        // when (操作):
        dispatch_message(
            &state,
            &mut guest.session,
            r#"{"type":"join-room","roomId":"ZZZZ"}"#,
        )
        .await;

        // then (期待する結果):
        assert_eq!(
            guest.drain_json(),
            vec![json!({"type": "error", "message": "Room not found."})]
        );
        assert!(host.drain().is_empty());
        assert_eq!(guest.session.room_id(), None);
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_signaling_scenario_between_two_peers() {
        // テスト項目: ルーム作成から参加・中継・退出までの一連の流れ
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = build_state(repository.clone());
        let mut a = connect(&state).await;
        let mut b = connect(&state).await;
        let room_id = RoomId::new("AB12".to_string());

        // when (操作): A がルームを作成する
        dispatch_message(&state, &mut a.session, r#"{"type":"create-room"}"#).await;

        // then (期待する結果):
        assert_eq!(
            a.drain_json(),
            vec![json!({"type": "room-created", "roomId": "AB12"})]
        );
        assert_eq!(
            repository.get_members(&room_id).await.unwrap(),
            vec![a.session.connection_id()]
        );

        // when (操作): B が小文字の ID で参加する
        dispatch_message(&state, &mut b.session, r#"{"type":"join-room","roomId":"ab12"}"#)
            .await;

        // then (期待する結果):
        assert_eq!(
            b.drain_json(),
            vec![json!({"type": "room-joined", "roomId": "AB12"})]
        );
        assert_eq!(a.drain_json(), vec![json!({"type": "client-joined"})]);

        // when (操作): B が中継メッセージを送る
        let offer = r#"{"type":"relay-message","roomId":"AB12","data":{"sdp":"offer"}}"#;
        dispatch_message(&state, &mut b.session, offer).await;

        // then (期待する結果): A にだけ元のテキストが届く
        assert_eq!(a.drain(), vec![offer.to_string()]);
        assert!(b.drain().is_empty());

        // when (操作): A が切断する
        state
            .disconnect_peer_usecase
            .execute(&mut a.session)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(b.drain_json(), vec![json!({"type": "client-left"})]);
        assert_eq!(
            repository.get_members(&room_id).await.unwrap(),
            vec![b.session.connection_id()]
        );

        // when (操作): B も切断する
        state
            .disconnect_peer_usecase
            .execute(&mut b.session)
            .await
            .unwrap();

        // then (期待する結果): ルームは削除される
        assert!(repository.get_members(&room_id).await.is_err());
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_relay_payload_is_forwarded_verbatim() {
        // テスト項目: 未知のフィールドや空白を含む中継メッセージも改変されずに届く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = build_state(repository);
        let mut a = connect(&state).await;
        let mut b = connect(&state).await;
        dispatch_message(&state, &mut a.session, r#"{"type":"create-room"}"#).await;
        dispatch_message(&state, &mut b.session, r#"{"type":"join-room","roomId":"AB12"}"#)
            .await;
        a.drain();
        b.drain();
        let candidate = "{ \"roomId\" : \"AB12\", \"type\" : \"relay-message\", \"candidate\" : { \"sdpMid\" : \"0\" } }";

        // when (操作):
        dispatch_message(&state, &mut a.session, candidate).await;

        // then (期待する結果):
        assert_eq!(b.drain(), vec![candidate.to_string()]);
        assert!(a.drain().is_empty());
    }
}
