//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 受信したペイロードの分類（クリア / タイピング / エモーション / テキスト）と、
//!   それぞれの履歴への反映・配信
//!
//! ### なぜこのテストが必要か
//! - 送信者本人には "You"、相手には送信者名で表示されなければならない
//! - タイピング通知は履歴に残さず、送信者本人にも返さない
//! - 履歴の保存に失敗しても配信は行われなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキスト・エモーションの送信と配信、履歴のクリア
//! - 異常系：履歴の保存失敗
//! - エッジケース：クリアの連続実行、未知のエモーションキー

use std::sync::Arc;

use futari_shared::time::{Clock, format_chat_timestamp};

use crate::domain::{
    ChatRecord, ConnectionToken, DisplayName, InboundMessage,
    message::{CLEAR_NOTICE, emotion_display, render_typing},
};

use super::{error::SendMessageError, history_log::HistoryLog, room_registry::RoomRegistry};

/// 1 件のペイロードを処理した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// 履歴を全削除し、通知を送った
    Cleared { notified: usize },
    /// タイピング通知を相手に転送した
    TypingRelayed { targets: usize },
    /// レコードを履歴に追加し、配信した
    Recorded { record: ChatRecord, delivered: usize },
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    registry: Arc<RoomRegistry>,
    history: Arc<HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, history: Arc<HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            history,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者の接続トークン
    /// * `sender` - 送信者の表示名
    /// * `payload` - 受信した生のペイロード
    ///
    /// # Returns
    ///
    /// * `Ok(Dispatch)` - 処理結果
    /// * `Err(SendMessageError)` - 履歴の保存に失敗（配信は完了している）
    pub async fn execute(
        &self,
        from: &ConnectionToken,
        sender: &DisplayName,
        payload: &str,
    ) -> Result<Dispatch, SendMessageError> {
        let timestamp = format_chat_timestamp(&self.clock.now());

        match InboundMessage::classify(payload) {
            InboundMessage::Clear => self.clear(sender).await,
            InboundMessage::Typing => {
                let line = render_typing(sender.as_str(), &timestamp);
                let targets = self.registry.broadcast_except(from, &line).await;
                Ok(Dispatch::TypingRelayed {
                    targets: targets.len(),
                })
            }
            InboundMessage::Emotion { key } => {
                let record = ChatRecord::emotion(sender.clone(), emotion_display(key), timestamp);
                self.record(record).await
            }
            InboundMessage::Text { body } => {
                let record = ChatRecord::text(sender.clone(), body, timestamp);
                self.record(record).await
            }
        }
    }

    async fn clear(&self, sender: &DisplayName) -> Result<Dispatch, SendMessageError> {
        let mut log = self.history.lock().await;
        let persisted = log.clear().await;
        let notified = self.registry.broadcast_notice(CLEAR_NOTICE).await;
        drop(log);

        tracing::info!("Chat history cleared by '{}'", sender);
        persisted.map_err(|e| SendMessageError::PersistenceFailed(e.to_string()))?;
        Ok(Dispatch::Cleared {
            notified: notified.len(),
        })
    }

    async fn record(&self, record: ChatRecord) -> Result<Dispatch, SendMessageError> {
        // 履歴への追加と配信を同じロックの中で行い、配信順を履歴の順序と一致させる
        let mut log = self.history.lock().await;
        let persisted = log.append(record.clone()).await;
        let delivered = self.registry.broadcast_record(&record).await;
        drop(log);

        tracing::debug!(
            "Relayed {} from '{}' to {} participant(s)",
            record.kind.as_str(),
            record.sender,
            delivered
        );
        persisted.map_err(|e| SendMessageError::PersistenceFailed(e.to_string()))?;
        Ok(Dispatch::Recorded { record, delivered })
    }
}
