//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, RoomId};

/// ルーム作成のエラー
#[derive(Debug, Error)]
pub enum CreateRoomError {
    #[error("no free room id after {0} attempts")]
    RoomIdExhausted(usize),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CreateRoomError {
    /// クライアントへ通知するエラーメッセージ（内部エラーの場合は `None`）
    pub fn client_message(&self) -> Option<&'static str> {
        match self {
            CreateRoomError::RoomIdExhausted(_) => Some("Could not create a room, try again."),
            CreateRoomError::Repository(_) | CreateRoomError::Encode(_) => None,
        }
    }
}

/// ルーム参加のエラー
#[derive(Debug, Error)]
pub enum JoinRoomError {
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("room {room_id} is full (max {capacity} members)")]
    RoomFull { room_id: RoomId, capacity: usize },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

impl JoinRoomError {
    /// クライアントへ通知するエラーメッセージ（内部エラーの場合は `None`）
    pub fn client_message(&self) -> Option<&'static str> {
        match self {
            JoinRoomError::RoomNotFound(_) => Some("Room not found."),
            JoinRoomError::RoomFull { .. } => Some("Room is full."),
            JoinRoomError::Repository(_) | JoinRoomError::Encode(_) => None,
        }
    }
}

/// メッセージ中継のエラー
#[derive(Debug, Error)]
pub enum RelayMessageError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// ルーム退出のエラー
#[derive(Debug, Error)]
pub enum LeaveRoomError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
