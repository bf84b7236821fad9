//! Persisted form of chat history records.

use serde::{Deserialize, Serialize};

/// Kind of a persisted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKindDto {
    #[default]
    Text,
    Emotion,
}

/// One persisted chat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecordDto {
    pub sender: String,
    pub body: String,
    pub timestamp: String,
    /// Missing in files written before emotion reactions existed
    #[serde(default)]
    pub kind: RecordKindDto,
}
