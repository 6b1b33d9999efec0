//! UseCase: ピア切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - 送信チャンネルの登録解除と、所属ルームからの退出
//!
//! ### なぜこのテストが必要か
//! - 最後の参加者が切断したルームは Registry から消えなければならない
//! - ルームに参加していない接続の切断は何も変更してはならない（冪等性）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者が残るルームからの切断（client-left の通知）
//! - エッジケース：最後の参加者の切断（ルーム削除）
//! - エッジケース：ルーム未所属の接続の切断

use std::sync::Arc;

use crate::domain::{MessagePusher, Session};

use super::{
    error::LeaveRoomError,
    event_serializer::EventSerializer,
    leave_room::{LeaveOutcome, LeaveRoomUseCase},
};

/// ピア切断のユースケース
pub struct DisconnectPeerUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 所属ルームから抜けるためのユースケース
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// イベントを 1 つずつ処理するためのロック（他のユースケースと共有）
    events: Arc<EventSerializer>,
}

impl DisconnectPeerUseCase {
    /// 新しい DisconnectPeerUseCase を作成
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        events: Arc<EventSerializer>,
    ) -> Self {
        Self {
            message_pusher,
            leave_room_usecase,
            events,
        }
    }

    /// ピア切断を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 切断した接続のセッション。ルームとの紐付けはクリアされる。
    pub async fn execute(&self, session: &mut Session) -> Result<LeaveOutcome, LeaveRoomError> {
        let _event = self.events.acquire().await;
        let connection_id = session.connection_id();
        self.message_pusher
            .unregister_connection(&connection_id)
            .await;

        match session.take_room() {
            Some(room_id) => {
                self.leave_room_usecase
                    .execute(connection_id, &room_id)
                    .await
            }
            None => Ok(LeaveOutcome::NotInRoom),
        }
    }
}
