//! UseCase: ルーム状態の取得

use std::sync::Arc;

use crate::domain::Participant;

use super::{history_log::HistoryLog, room_registry::RoomRegistry};

/// ルームの現在の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    /// 参加順の参加者
    pub participants: Vec<Participant>,
    pub capacity: usize,
    pub history_len: usize,
}

/// ルーム状態取得のユースケース
pub struct GetRoomStateUseCase {
    registry: Arc<RoomRegistry>,
    history: Arc<HistoryLog>,
}

impl GetRoomStateUseCase {
    pub fn new(registry: Arc<RoomRegistry>, history: Arc<HistoryLog>) -> Self {
        Self { registry, history }
    }

    pub async fn execute(&self) -> RoomState {
        let room = self.registry.room().await;
        RoomState {
            capacity: room.capacity(),
            participants: room.participants,
            history_len: self.history.len().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{domain::DisplayName, usecase::test_support::TestRelay};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_get_room_state() {
        // テスト項目: 参加者・定員・履歴件数が取得できる
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = relay.connect.execute(DisplayName::new("alice"), tx).await.unwrap();
        relay
            .send
            .execute(&alice.token, &DisplayName::new("alice"), "hi")
            .await
            .unwrap();

        // when (操作):
        let state = relay.room_state.execute().await;

        // then (期待する結果):
        assert_eq!(state.capacity, 2);
        assert_eq!(state.history_len, 1);
        assert_eq!(state.participants.len(), 1);
        assert_eq!(state.participants[0].name, DisplayName::new("alice"));
        assert_eq!(state.participants[0].connected_at, relay.now());
    }
}
