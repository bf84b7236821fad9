//! InMemory History Store 実装
//!
//! プロセス終了とともに消える履歴。履歴ファイルを使わない起動モードとテストで使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatRecord, HistoryStore, HistoryStoreError};

/// インメモリ History Store 実装
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<ChatRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の履歴を持った状態で作成
    pub fn with_records(records: Vec<ChatRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// 最後に保存されたスナップショット
    pub async fn snapshot(&self) -> Vec<ChatRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<ChatRecord>, HistoryStoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[ChatRecord]) -> Result<(), HistoryStoreError> {
        let mut stored = self.records.lock().await;
        *stored = records.to_vec();
        Ok(())
    }
}
