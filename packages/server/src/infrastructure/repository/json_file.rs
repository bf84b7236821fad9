//! JSON ファイル History Store 実装
//!
//! 履歴全体を JSON 配列として 1 ファイルに保存します。
//! 書き込みは一時ファイル + rename で行い、途中で落ちても元のファイルが壊れないようにします。
//! 読み込めないファイルは `<name>.corrupt` に退避してから Corrupted を返します。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    domain::{ChatRecord, HistoryStore, HistoryStoreError},
    infrastructure::dto::history::ChatRecordDto,
};

/// JSON ファイル History Store 実装
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 読み込めなかったファイルの退避先
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling_path(".corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(suffix);
        self.path.with_file_name(file_name)
    }

    /// 壊れたファイルを退避し、次の保存で内容が失われないようにする
    async fn preserve_corrupted(&self) {
        let backup = self.corrupt_path();
        match fs::copy(&self.path, &backup).await {
            Ok(_) => tracing::warn!(
                "Unreadable history file {} kept as {}",
                self.path.display(),
                backup.display()
            ),
            Err(e) => tracing::error!(
                "Failed to back up unreadable history file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<Vec<ChatRecord>, HistoryStoreError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("History file {} not found, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        // 不正な UTF-8 も JSON のエラーとして扱われる
        match serde_json::from_slice::<Vec<ChatRecordDto>>(&content) {
            Ok(records) => Ok(records.into_iter().map(ChatRecord::from).collect()),
            Err(e) => {
                self.preserve_corrupted().await;
                Err(HistoryStoreError::Corrupted(e.to_string()))
            }
        }
    }

    async fn save(&self, records: &[ChatRecord]) -> Result<(), HistoryStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let dtos: Vec<ChatRecordDto> = records.iter().map(ChatRecordDto::from).collect();
        let json = serde_json::to_string_pretty(&dtos)
            .map_err(|e| HistoryStoreError::Serialize(e.to_string()))?;

        let tmp_path = self.temp_path();
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            "Saved {} history records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
