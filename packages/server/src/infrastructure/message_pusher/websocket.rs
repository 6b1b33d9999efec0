//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//! - 接続の生存確認（is_open）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信タスクが終了すると sender は閉じた状態になり、`is_open` は `false` を返します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_connection(connection_id, tx).await;
///
/// pusher.push_to(&connection_id, "{\"type\":\"client-joined\"}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: ConnectionId, Value: PusherChannel
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// 登録済みで、かつ送信タスクが生きている接続のチャンネルを返す
fn open_channel<'a>(
    connections: &'a HashMap<ConnectionId, PusherChannel>,
    connection_id: &ConnectionId,
) -> Option<&'a PusherChannel> {
    connections
        .get(connection_id)
        .filter(|sender| !sender.is_closed())
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, channel);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn is_open(&self, connection_id: &ConnectionId) -> bool {
        let connections = self.connections.lock().await;
        open_channel(&connections, connection_id).is_some()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        let sender = connections
            .get(connection_id)
            .ok_or(MessagePushError::ConnectionNotFound(*connection_id))?;
        sender
            .send(content.to_string())
            .map_err(|_| MessagePushError::ConnectionClosed(*connection_id))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        for target in targets {
            let Some(sender) = open_channel(&connections, &target) else {
                tracing::debug!("Connection '{}' is closed or unknown, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if sender.send(content.to_string()).is_err() {
                tracing::debug!("Connection '{}' closed during broadcast", target);
            } else {
                tracing::debug!("Broadcasted message to connection '{}'", target);
            }
        }

        Ok(())
    }
}
