//! Domain-level error types.

use thiserror::Error;

/// Errors raised by the [`Room`](super::Room) entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room already holds as many participants as it allows
    #[error("Room is full (capacity: {capacity})")]
    CapacityExceeded { capacity: usize },
}

/// Errors raised by a [`RoomRepository`](super::RoomRepository)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room capacity exceeded (capacity: {0})")]
    CapacityExceeded(usize),
}

impl From<RoomError> for RepositoryError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::CapacityExceeded { capacity } => Self::CapacityExceeded(capacity),
        }
    }
}

/// Errors raised by a [`HistoryStore`](super::HistoryStore)
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("History store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted form could not be decoded
    #[error("History store is corrupted: {0}")]
    Corrupted(String),

    #[error("Failed to serialize history: {0}")]
    Serialize(String),
}

/// Errors raised by a [`MessagePusher`](super::MessagePusher)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
