//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 受信した生のペイロードを送信者以外の参加者へそのまま転送すること
//!
//! ### なぜこのテストが必要か
//! - 中継はペイロードを解釈・変換してはならない（SDP や ICE candidate をそのまま届ける）
//! - 送信者自身に自分のメッセージが返ってはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者への転送
//! - エッジケース：存在しないルーム宛て（何も起きない）
//! - エッジケース：ルームに参加していない送信者（転送される。送信者の所属は検証しない）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RepositoryError, RoomId, RoomRepository};

use super::{error::RelayMessageError, event_serializer::EventSerializer};

/// 中継処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// 転送対象（送信者以外の参加者）。閉じた接続は送信時にスキップされる。
    Forwarded(Vec<ConnectionId>),
    /// 宛先のルームが存在しないため破棄した
    RoomNotFound,
}

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// イベントを 1 つずつ処理するためのロック（他のユースケースと共有）
    events: Arc<EventSerializer>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        events: Arc<EventSerializer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            events,
        }
    }

    /// メッセージ中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者の接続 ID
    /// * `room_id` - メッセージ内で指定されたルーム ID（正規化しない）
    /// * `raw_message` - クライアントから受信したメッセージ（そのまま転送する）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        raw_message: &str,
    ) -> Result<RelayOutcome, RelayMessageError> {
        let _event = self.events.acquire().await;
        let members = match self.repository.get_members(&room_id).await {
            Ok(members) => members,
            Err(RepositoryError::RoomNotFound(_)) => {
                tracing::debug!(
                    "Dropping relay-message from '{}' to unknown room '{}'",
                    sender,
                    room_id
                );
                return Ok(RelayOutcome::RoomNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        let targets: Vec<ConnectionId> = members.into_iter().filter(|id| *id != sender).collect();
        self.message_pusher
            .broadcast(targets.clone(), raw_message)
            .await?;

        tracing::debug!(
            "Relayed message from '{}' in room '{}' to {} member(s)",
            sender,
            room_id,
            targets.len()
        );
        Ok(RelayOutcome::Forwarded(targets))
    }
}
