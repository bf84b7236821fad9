//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{GetRoomStateUseCase, RelaySession};

/// Shared application state
pub struct AppState {
    /// RelaySession（接続ごとの状態遷移）
    pub relay_session: Arc<RelaySession>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
}
