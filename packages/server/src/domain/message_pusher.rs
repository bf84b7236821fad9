//! MessagePusher trait 定義
//!
//! 接続中のクライアントへメッセージを届けるためのインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionToken, MessagePushError};

/// クライアントへの送信チャンネル（1 行ずつ描画済みのテキストを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, token: ConnectionToken, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除（冪等）
    async fn unregister_client(&self, token: &ConnectionToken);

    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, token: &ConnectionToken, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数のクライアントに同じメッセージを送信
    ///
    /// 一部のクライアントへの送信失敗は他のクライアントへの送信を妨げない。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionToken>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
