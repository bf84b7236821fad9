//! UseCase: 参加者切断処理
//!
//! 切断した接続を Room Registry から削除し、空いた枠を次の参加者に開放します。
//! どの経路で接続が終わっても呼ばれるため、冪等でなければなりません。

use std::sync::Arc;

use crate::domain::{ConnectionToken, Participant};

use super::room_registry::RoomRegistry;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<RoomRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 削除した参加者。既に削除済みの場合は `None`。
    pub async fn execute(&self, token: &ConnectionToken) -> Option<Participant> {
        let removed = self.registry.remove(token).await;
        match &removed {
            Some(participant) => tracing::info!(
                "'{}' ({}) disconnected and removed from room",
                participant.name,
                token
            ),
            None => tracing::debug!("Connection {} was already removed", token),
        }
        removed
    }
}
