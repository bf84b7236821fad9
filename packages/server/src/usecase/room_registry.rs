//! Room Registry: 接続中の参加者（最大 2 人）の管理と配信
//!
//! 参加者の管理は `RoomRepository`、実際の送信は `MessagePusher` に委譲し、
//! 接続トークンをキーとして両者を結び付けます。
//!
//! 配信は受信者ごとに独立したベストエフォートで、
//! 1 人への送信失敗が他の受信者への送信を妨げることはありません。

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::domain::{
    ChatRecord, ConnectionToken, DisplayName, MessagePushError, MessagePusher, Participant,
    PusherChannel, RepositoryError, Room, RoomRepository,
};

use super::error::ConnectError;

/// Room Registry
pub struct RoomRegistry {
    /// Repository（参加者管理の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomRegistry {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加を試みる
    ///
    /// 満員の場合は `ConnectError::RoomCapacityExceeded` を返し、何も登録しない。
    pub async fn try_admit(
        &self,
        name: DisplayName,
        sender: PusherChannel,
        connected_at: DateTime<FixedOffset>,
    ) -> Result<ConnectionToken, ConnectError> {
        let token = ConnectionToken::generate();
        self.repository
            .try_admit(Participant::new(token, name, connected_at))
            .await
            .map_err(|e| match e {
                RepositoryError::CapacityExceeded(capacity) => {
                    ConnectError::RoomCapacityExceeded(capacity)
                }
            })?;
        self.message_pusher.register_client(token, sender).await;
        Ok(token)
    }

    /// 参加者を削除（冪等）
    pub async fn remove(&self, token: &ConnectionToken) -> Option<Participant> {
        let removed = self.repository.remove_participant(token).await;
        self.message_pusher.unregister_client(token).await;
        removed
    }

    /// 特定の接続に送信
    pub async fn push_to(
        &self,
        token: &ConnectionToken,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(token, content).await
    }

    /// チャットレコードを全員に配信
    ///
    /// ラベルは受信者ごとに決まる（送信者本人には "You"）。
    /// 届けられた受信者数を返す。
    pub async fn broadcast_record(&self, record: &ChatRecord) -> usize {
        let mut delivered = 0;
        for participant in self.participants().await {
            let line = record.render_for(&participant.name);
            match self.message_pusher.push_to(&participant.token, &line).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to deliver message to '{}' ({}): {}",
                    participant.name,
                    participant.token,
                    e
                ),
            }
        }
        delivered
    }

    /// 同じ内容を全員に配信
    pub async fn broadcast_notice(&self, content: &str) -> Vec<ConnectionToken> {
        let targets = self.tokens_except(None).await;
        self.broadcast(targets, content).await
    }

    /// 指定した接続以外の全員に配信
    pub async fn broadcast_except(
        &self,
        exclude: &ConnectionToken,
        content: &str,
    ) -> Vec<ConnectionToken> {
        let targets = self.tokens_except(Some(exclude)).await;
        self.broadcast(targets, content).await
    }

    /// 参加順の参加者
    pub async fn participants(&self) -> Vec<Participant> {
        self.repository.get_participants().await
    }

    pub async fn count(&self) -> usize {
        self.repository.count_participants().await
    }

    pub async fn room(&self) -> Room {
        self.repository.get_room().await
    }

    async fn tokens_except(&self, exclude: Option<&ConnectionToken>) -> Vec<ConnectionToken> {
        self.participants()
            .await
            .into_iter()
            .map(|p| p.token)
            .filter(|token| Some(token) != exclude)
            .collect()
    }

    async fn broadcast(&self, targets: Vec<ConnectionToken>, content: &str) -> Vec<ConnectionToken> {
        if let Err(e) = self.message_pusher.broadcast(targets.clone(), content).await {
            tracing::warn!("Failed to broadcast message: {}", e);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestRelay, drain};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_try_admit_until_full() {
        // テスト項目: 2 人までは参加でき、3 人目は拒否される
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        // when (操作):
        let alice = relay.registry.try_admit(DisplayName::new("alice"), tx1, relay.now()).await;
        let bob = relay.registry.try_admit(DisplayName::new("bob"), tx2, relay.now()).await;
        let charlie = relay.registry.try_admit(DisplayName::new("charlie"), tx3, relay.now()).await;

        // then (期待する結果):
        assert!(alice.is_ok());
        assert!(bob.is_ok());
        assert_eq!(charlie, Err(ConnectError::RoomCapacityExceeded(2)));
        assert_eq!(relay.registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent_and_closes_channel() {
        // テスト項目: 削除は冪等で、削除後は送信チャンネルが閉じる
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = relay
            .registry
            .try_admit(DisplayName::new("alice"), tx, relay.now())
            .await
            .unwrap();

        // when (操作):
        let first = relay.registry.remove(&token).await;
        let second = relay.registry.remove(&token).await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(relay.registry.count().await, 0);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_participants_in_join_order() {
        // テスト項目: 参加者は参加順に返され、退出した参加者は含まれない
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        let alice = relay.registry.try_admit(DisplayName::new("alice"), tx_a, relay.now()).await.unwrap();
        relay.registry.try_admit(DisplayName::new("bob"), tx_b, relay.now()).await.unwrap();

        // when (操作):
        let before = relay.registry.participants().await;
        relay.registry.remove(&alice).await;
        let after = relay.registry.participants().await;

        // then (期待する結果):
        let names = |ps: &[Participant]| ps.iter().map(|p| p.name.to_string()).collect::<Vec<_>>();
        assert_eq!(names(&before), vec!["alice", "bob"]);
        assert_eq!(names(&after), vec!["bob"]);
    }

    #[tokio::test]
    async fn test_broadcast_record_relabels_per_recipient() {
        // テスト項目: 送信者には "You"、相手には送信者名で配信される
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        relay.registry.try_admit(DisplayName::new("alice"), tx_a, relay.now()).await.unwrap();
        relay.registry.try_admit(DisplayName::new("bob"), tx_b, relay.now()).await.unwrap();
        let record = ChatRecord::text(DisplayName::new("alice"), "hi", "[2024-05-01 09:30]");

        // when (操作):
        let delivered = relay.registry.broadcast_record(&record).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(drain(&mut rx_a), vec!["You: hi [2024-05-01 09:30]"]);
        assert_eq!(drain(&mut rx_b), vec!["alice: hi [2024-05-01 09:30]"]);
    }

    #[tokio::test]
    async fn test_broadcast_record_survives_closed_recipient() {
        // テスト項目: 片方の接続が閉じていても、もう片方には届く
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        relay.registry.try_admit(DisplayName::new("alice"), tx_a, relay.now()).await.unwrap();
        relay.registry.try_admit(DisplayName::new("bob"), tx_b, relay.now()).await.unwrap();
        drop(rx_a);
        let record = ChatRecord::text(DisplayName::new("bob"), "still there?", "[2024-05-01 09:30]");

        // when (操作):
        let delivered = relay.registry.broadcast_record(&record).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(drain(&mut rx_b), vec!["You: still there? [2024-05-01 09:30]"]);
    }

    #[tokio::test]
    async fn test_broadcast_except_skips_excluded() {
        // テスト項目: 指定した接続以外にだけ配信される
        // given (前提条件):
        let relay = TestRelay::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let alice = relay.registry.try_admit(DisplayName::new("alice"), tx_a, relay.now()).await.unwrap();
        let bob = relay.registry.try_admit(DisplayName::new("bob"), tx_b, relay.now()).await.unwrap();

        // when (操作):
        let targets = relay.registry.broadcast_except(&alice, "ping").await;

        // then (期待する結果):
        assert_eq!(targets, vec![bob]);
        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(drain(&mut rx_b), vec!["ping"]);
    }
}
