//! UseCase: ピア接続処理
//!
//! WebSocket 接続が確立したときに、送信チャンネルを登録してルーム未所属の
//! セッションを作成します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, Session};

/// ピア接続のユースケース
pub struct ConnectPeerUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPeerUseCase {
    /// 新しい ConnectPeerUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// ピア接続を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// ルーム未所属の新しいセッション
    pub async fn execute(&self, channel: PusherChannel) -> Session {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_connection(connection_id, channel)
            .await;
        Session::new(connection_id)
    }
}
