//! UseCase 層
//!
//! シグナリングの各操作（ルーム作成・参加・中継・退出）を 1 ユースケース 1 構造体で実装します。
//! ユースケースは Repository / MessagePusher の trait にのみ依存します。

pub mod connect_peer;
pub mod create_room;
pub mod disconnect_peer;
pub mod error;
pub mod event_serializer;
pub mod join_room;
pub mod leave_room;
pub mod relay_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_peer::ConnectPeerUseCase;
pub use create_room::{CreateRoomUseCase, MAX_ROOM_ID_ATTEMPTS};
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::{CreateRoomError, JoinRoomError, LeaveRoomError, RelayMessageError};
pub use event_serializer::EventSerializer;
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use relay_message::{RelayMessageUseCase, RelayOutcome};
