//! History Log: 全参加者で共有するチャット履歴
//!
//! メモリ上の履歴を 1 つの `Mutex` で保護し、追加・全削除のたびに
//! History Store へスナップショット全体を保存します。
//! ロックを保持したまま配信まで行うことで、配信順と履歴の順序を一致させます。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ChatRecord, HistoryStore, HistoryStoreError};

/// 共有チャット履歴
pub struct HistoryLog {
    records: Mutex<Vec<ChatRecord>>,
    store: Arc<dyn HistoryStore>,
}

impl HistoryLog {
    /// History Store から履歴を読み込んで作成
    ///
    /// 読み込みに失敗した場合は警告を出して空の履歴から始める。
    pub async fn open(store: Arc<dyn HistoryStore>) -> Self {
        let records = match store.load().await {
            Ok(records) => {
                tracing::info!("Loaded {} chat history records", records.len());
                records
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load chat history, starting empty; the next write replaces the stored history: {}",
                    e
                );
                Vec::new()
            }
        };
        Self::with_records(store, records)
    }

    /// 指定した履歴で作成（History Store からは読み込まない）
    pub fn with_records(store: Arc<dyn HistoryStore>, records: Vec<ChatRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            store,
        }
    }

    /// 履歴をロックする
    ///
    /// ガードを保持している間、他の接続は履歴を読み書きできない。
    pub async fn lock(&self) -> HistoryGuard<'_> {
        HistoryGuard {
            records: self.records.lock().await,
            store: self.store.as_ref(),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

/// ロック中の履歴
pub struct HistoryGuard<'a> {
    records: MutexGuard<'a, Vec<ChatRecord>>,
    store: &'a dyn HistoryStore,
}

impl HistoryGuard<'_> {
    /// 追加順の履歴
    pub fn records(&self) -> &[ChatRecord] {
        &self.records
    }

    /// レコードを追加して保存する
    ///
    /// 保存に失敗してもメモリ上の履歴には残る。
    pub async fn append(&mut self, record: ChatRecord) -> Result<(), HistoryStoreError> {
        self.records.push(record);
        self.flush().await
    }

    /// 全てのレコードを削除して保存する
    pub async fn clear(&mut self) -> Result<(), HistoryStoreError> {
        self.records.clear();
        self.flush().await
    }

    async fn flush(&self) -> Result<(), HistoryStoreError> {
        self.store.save(&self.records).await.inspect_err(|e| {
            tracing::error!("Failed to persist chat history, durability lost: {}", e);
        })
    }
}
