//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{ConnectionId, RoomId};

/// Room エンティティの操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room capacity exceeded (max {0} members)")]
    CapacityExceeded(usize),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("room already exists: {0}")]
    RoomAlreadyExists(RoomId),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    #[error("connection closed: {0}")]
    ConnectionClosed(ConnectionId),
}
