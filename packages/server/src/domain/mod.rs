//! Domain layer for the signaling relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{MemberRemoval, Room, Session};
pub use error::{MessagePushError, RepositoryError, RoomError};
pub use factory::{ROOM_ID_ALPHABET, ROOM_ID_LENGTH, RandomRoomIdFactory, RoomIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockRoomRepository;
