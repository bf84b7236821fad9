//! UseCase 層のエラー定義

use thiserror::Error;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// ルームが満員（定員を返す）
    #[error("Room capacity exceeded (capacity: {0})")]
    RoomCapacityExceeded(usize),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// 履歴の保存に失敗（配信自体は行われている）
    #[error("Failed to persist chat history: {0}")]
    PersistenceFailed(String),
}
