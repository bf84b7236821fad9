//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{GetRoomStateUseCase, RelaySession};

use super::{
    handler::{health_check, room_state, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the router with every endpoint of the relay
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/room", get(room_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Two-person chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(relay_session, get_room_state_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// RelaySession（接続ごとの状態遷移）
    relay_session: Arc<RelaySession>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    get_room_state_usecase: Arc<GetRoomStateUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `relay_session` - Drives each WebSocket connection
    /// * `get_room_state_usecase` - UseCase for getting room state
    pub fn new(
        relay_session: Arc<RelaySession>,
        get_room_state_usecase: Arc<GetRoomStateUseCase>,
    ) -> Self {
        Self {
            relay_session,
            get_room_state_usecase,
        }
    }

    /// Bind to `host:port` and serve until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws?user=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        Ok(self.serve(listener, shutdown_signal()).await?)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app_state = Arc::new(AppState {
            relay_session: self.relay_session,
            get_room_state_usecase: self.get_room_state_usecase,
        });
        let app = router(app_state);

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::TestRelay;

    fn server(relay: &TestRelay) -> Server {
        Server::new(relay.session.clone(), relay.room_state.clone())
    }

    #[tokio::test]
    async fn test_run_fails_when_port_is_taken() {
        // テスト項目: 使用中のポートでは run がエラーを返す
        // given (前提条件):
        let relay = TestRelay::new();
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        // when (操作):
        let result = server(&relay).run("127.0.0.1".to_string(), port).await;

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        // テスト項目: shutdown が完了すると serve が正常終了する
        // given (前提条件):
        let relay = TestRelay::new();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        // when (操作):
        let result = server(&relay).serve(listener, async {}).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
