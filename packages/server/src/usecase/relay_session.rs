//! Relay session: the per-connection state machine.
//!
//! ```text
//! Connecting ──admitted──▶ Admitted ──history replayed──▶ Streaming ──┐
//!     │                                                      ▲        │ payload
//!     │ room full                                            └────────┘
//!     ▼                                                           │ disconnect / error
//!   Closed ◀──────────────────────────────────────────────────────┘
//! ```
//!
//! A session never resumes; a reconnecting participant starts a new session
//! at `Connecting`.

use std::sync::Arc;

use crate::domain::{
    ConnectionToken, DisplayName, InboundEvent, InboundStream, PusherChannel,
    message::ROOM_FULL_NOTICE,
};

use super::{
    connect_participant::ConnectParticipantUseCase,
    disconnect_participant::DisconnectParticipantUseCase, error::ConnectError,
    send_message::SendMessageUseCase,
};

/// Lifecycle state of one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Admitted,
    Streaming,
    Closed,
}

/// Why a session reached `Closed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The room was full; the full-room notice was sent
    Rejected,
    Disconnected,
    TransportError(String),
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// `None` when the connection was never admitted
    pub token: Option<ConnectionToken>,
    pub final_state: ConnectionState,
    pub close_reason: CloseReason,
    /// Inbound payloads handled while streaming
    pub payloads: usize,
}

/// Drives connections through admission, replay, streaming and cleanup.
pub struct RelaySession {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl RelaySession {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
        }
    }

    /// Run one connection until it closes.
    ///
    /// `channel` carries every outbound line for this connection. It is handed
    /// to the room registry on admission and dropped when the session ends, so
    /// the receiving side sees the channel close once nothing more will be sent.
    pub async fn run<S>(
        &self,
        name: DisplayName,
        channel: PusherChannel,
        inbound: &mut S,
    ) -> SessionReport
    where
        S: InboundStream + ?Sized,
    {
        let mut state = ConnectionState::Connecting;
        let rejection_channel = channel.clone();

        let admission = match self
            .connect_participant_usecase
            .execute(name.clone(), channel)
            .await
        {
            Ok(admission) => admission,
            Err(ConnectError::RoomCapacityExceeded(capacity)) => {
                tracing::warn!(
                    "Room capacity ({}) exceeded. Rejecting '{}'",
                    capacity,
                    name
                );
                if rejection_channel.send(ROOM_FULL_NOTICE.to_string()).is_err() {
                    tracing::debug!("'{}' left before the full-room notice was sent", name);
                }
                transition(&mut state, ConnectionState::Closed, &name);
                return SessionReport {
                    token: None,
                    final_state: state,
                    close_reason: CloseReason::Rejected,
                    payloads: 0,
                };
            }
        };
        drop(rejection_channel);
        let token = admission.token;
        transition(&mut state, ConnectionState::Admitted, &name);

        // history was replayed during admission
        transition(&mut state, ConnectionState::Streaming, &name);

        let mut payloads = 0;
        let close_reason = loop {
            match inbound.receive().await {
                InboundEvent::Payload(payload) => {
                    payloads += 1;
                    tracing::debug!("Received payload from '{}' ({} bytes)", name, payload.len());
                    if let Err(e) = self
                        .send_message_usecase
                        .execute(&token, &name, &payload)
                        .await
                    {
                        tracing::error!("Message from '{}' was not persisted: {}", name, e);
                    }
                }
                InboundEvent::Disconnected => {
                    tracing::info!("'{}' disconnected", name);
                    break CloseReason::Disconnected;
                }
                InboundEvent::Error(e) => {
                    tracing::warn!("Transport error for '{}': {}", name, e);
                    break CloseReason::TransportError(e);
                }
            }
        };

        self.disconnect_participant_usecase.execute(&token).await;
        transition(&mut state, ConnectionState::Closed, &name);

        SessionReport {
            token: Some(token),
            final_state: state,
            close_reason,
            payloads,
        }
    }
}

fn transition(state: &mut ConnectionState, next: ConnectionState, name: &DisplayName) {
    tracing::debug!("Connection of '{}': {:?} -> {:?}", name, state, next);
    *state = next;
}
