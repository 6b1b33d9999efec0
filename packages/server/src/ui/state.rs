//! Server state shared by every connection.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, JoinRoomUseCase,
        RelayMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectPeerUseCase（接続開始のユースケース）
    pub connect_peer_usecase: Arc<ConnectPeerUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// DisconnectPeerUseCase（接続終了のユースケース）
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    /// MessagePusher（要求元へのエラー通知に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
}
