//! WebSocket connection handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, InboundEvent, InboundStream},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Display name resolved upstream; "Unknown" when absent
    pub user: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let name = DisplayName::from_optional(query.user);
    tracing::info!("WebSocket upgrade requested by '{}'", name);

    // Admission is decided after the upgrade; a rejected client receives the full-room notice
    ws.on_upgrade(move |socket| handle_socket(socket, state, name))
}

/// Inbound half of a WebSocket connection
struct WebSocketInbound {
    receiver: SplitStream<WebSocket>,
}

#[async_trait]
impl InboundStream for WebSocketInbound {
    async fn receive(&mut self) -> InboundEvent {
        loop {
            match self.receiver.next().await {
                Some(Ok(Message::Text(text))) => return InboundEvent::Payload(text.to_string()),
                Some(Ok(Message::Close(_))) | None => return InboundEvent::Disconnected,
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::debug!("Ignoring binary frame ({} bytes)", data.len());
                }
                Some(Err(e)) => return InboundEvent::Error(e.to_string()),
            }
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// When every sender of the channel has been dropped the connection is closed.
///
/// # Arguments
///
/// * `rx` - Channel receiver for rendered lines addressed to this client
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("Stopped pushing to closed WebSocket: {}", e);
                return;
            }
        }
        // The peer may already have closed its side
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, name: DisplayName) {
    let (sender, receiver) = socket.split();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let send_task = pusher_loop(rx, sender);

    let mut inbound = WebSocketInbound { receiver };
    let report = state
        .relay_session
        .run(name.clone(), tx, &mut inbound)
        .await;
    tracing::info!(
        "Session of '{}' closed ({:?}, {} payloads)",
        name,
        report.close_reason,
        report.payloads
    );

    if let Err(e) = send_task.await {
        tracing::warn!("Push task for '{}' failed: {}", name, e);
    }
}
