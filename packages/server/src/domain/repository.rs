//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatRecord, ConnectionToken, HistoryStoreError, Participant, RepositoryError, Room};

/// Room Repository trait
///
/// 参加者（最大 2 人）の管理を担当するデータストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room エンティティのスナップショットを取得
    async fn get_room(&self) -> Room;

    /// 定員チェックと追加を 1 つの不可分な操作として行う
    ///
    /// 定員に達している場合は `RepositoryError::CapacityExceeded` を返す。
    async fn try_admit(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// 参加者を削除（冪等）
    ///
    /// 削除した参加者を返す。存在しなかった場合は `None`。
    async fn remove_participant(&self, token: &ConnectionToken) -> Option<Participant>;

    /// 参加者リストを参加順に取得
    async fn get_participants(&self) -> Vec<Participant>;

    /// 接続中の参加者数を取得
    async fn count_participants(&self) -> usize;
}

/// History Store trait
///
/// チャット履歴の永続化先。保存は常にスナップショット全体を書き込む。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// 永続化された履歴を読み込む（起動時に 1 回だけ呼ばれる）
    ///
    /// 読めない場合は `HistoryStoreError::Corrupted` を返し、呼び出し側は空の履歴にフォールバックする。
    async fn load(&self) -> Result<Vec<ChatRecord>, HistoryStoreError>;

    /// 履歴全体を保存する
    async fn save(&self, records: &[ChatRecord]) -> Result<(), HistoryStoreError>;
}
