//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ParticipantDto, RoomStateDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current participants and history size
pub async fn room_state(State(state): State<Arc<AppState>>) -> Json<RoomStateDto> {
    let room = state.get_room_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(RoomStateDto {
        participants: room
            .participants
            .into_iter()
            .map(ParticipantDto::from)
            .collect(),
        capacity: room.capacity,
        history_len: room.history_len,
    })
}
