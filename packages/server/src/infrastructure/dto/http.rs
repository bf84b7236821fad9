//! HTTP API response DTOs.

use serde::Serialize;

/// Response of `GET /api/room`
#[derive(Debug, Clone, Serialize)]
pub struct RoomStateDto {
    pub participants: Vec<ParticipantDto>,
    pub capacity: usize,
    pub history_len: usize,
}

/// A connected participant
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDto {
    pub name: String,
    /// RFC 3339
    pub connected_at: String,
}
