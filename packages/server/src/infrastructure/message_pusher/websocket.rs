//! WebSocket を使った MessagePusher 実装
//!
//! 接続トークンごとに、UI 層の送信タスクへつながる `PusherChannel` を保持します。
//! 参加後はこのマップだけが各接続の sender を持つため、
//! `unregister_client` で sender を破棄すると送信タスクの受信側が終了し、
//! 送信タスクが Close フレームを送ってソケットを閉じます。
//! 満員で拒否された接続は一度も登録されないため、通知を送った時点で閉じられます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionToken, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: 接続トークン
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionToken, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionToken, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, token: ConnectionToken, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(token, sender);
        tracing::debug!("Connection {} registered to MessagePusher", token);
    }

    /// sender を破棄する（接続のソケットはこれで閉じられる）
    async fn unregister_client(&self, token: &ConnectionToken) {
        let mut clients = self.clients.lock().await;
        if clients.remove(token).is_some() {
            tracing::debug!("Connection {} unregistered from MessagePusher", token);
        }
    }

    async fn push_to(
        &self,
        token: &ConnectionToken,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(token)
            .ok_or_else(|| MessagePushError::ClientNotFound(token.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection {}", token);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionToken>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection {}: {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to connection {}", target);
                }
            } else {
                tracing::warn!("Connection {} not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
