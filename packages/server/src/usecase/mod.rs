//! UseCase 層
//!
//! ドメイン層の trait にだけ依存し、参加・送信・切断などのアプリケーションの操作を提供します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_state;
pub mod history_log;
pub mod relay_session;
pub mod room_registry;
pub mod send_message;

pub use connect_participant::{Admission, ConnectParticipantUseCase};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, SendMessageError};
pub use get_room_state::{GetRoomStateUseCase, RoomState};
pub use history_log::{HistoryGuard, HistoryLog};
pub use relay_session::{CloseReason, ConnectionState, RelaySession, SessionReport};
pub use room_registry::RoomRegistry;
pub use send_message::{Dispatch, SendMessageUseCase};

#[cfg(test)]
pub(crate) mod test_support {
    //! Wiring shared by the use case tests.

    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use futari_shared::time::{Clock, FixedClock, jst_offset};
    use tokio::sync::{Mutex, mpsc};

    use super::*;
    use crate::{
        domain::{HistoryStore, InboundEvent, InboundStream, Room},
        infrastructure::{
            message_pusher::WebSocketMessagePusher,
            repository::{InMemoryHistoryStore, InMemoryRoomRepository},
        },
    };

    /// Timestamp rendered by the fixed test clock
    pub const TS: &str = "[2024-05-01 09:30]";

    pub struct TestRelay {
        pub clock: Arc<FixedClock>,
        pub history: Arc<HistoryLog>,
        pub registry: Arc<RoomRegistry>,
        pub connect: Arc<ConnectParticipantUseCase>,
        pub send: Arc<SendMessageUseCase>,
        pub disconnect: Arc<DisconnectParticipantUseCase>,
        pub room_state: Arc<GetRoomStateUseCase>,
        pub session: Arc<RelaySession>,
    }

    impl TestRelay {
        /// Empty history kept in memory
        pub fn new() -> Self {
            Self::with_store(Arc::new(InMemoryHistoryStore::new()))
        }

        /// Empty history saved to `store`
        pub fn with_store(store: Arc<dyn HistoryStore>) -> Self {
            Self::with_history(HistoryLog::with_records(store, Vec::new()))
        }

        /// History loaded from `store`
        pub async fn open(store: Arc<dyn HistoryStore>) -> Self {
            Self::with_history(HistoryLog::open(store).await)
        }

        fn with_history(history: HistoryLog) -> Self {
            let fixed_time = jst_offset()
                .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
                .unwrap();
            let clock = Arc::new(FixedClock::new(fixed_time));
            let history = Arc::new(history);
            let registry = Arc::new(RoomRegistry::new(
                Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(Room::new())))),
                Arc::new(WebSocketMessagePusher::default()),
            ));
            let connect = Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                history.clone(),
                clock.clone(),
            ));
            let send = Arc::new(SendMessageUseCase::new(
                registry.clone(),
                history.clone(),
                clock.clone(),
            ));
            let disconnect = Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
            let room_state = Arc::new(GetRoomStateUseCase::new(registry.clone(), history.clone()));
            let session = Arc::new(RelaySession::new(
                connect.clone(),
                send.clone(),
                disconnect.clone(),
            ));
            Self {
                clock,
                history,
                registry,
                connect,
                send,
                disconnect,
                room_state,
                session,
            }
        }

        pub fn now(&self) -> DateTime<FixedOffset> {
            self.clock.now()
        }
    }

    /// Collect every line already queued on `rx`
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    /// Inbound stream fed from a channel; a dropped sender reads as a disconnect
    pub struct ChannelInbound {
        rx: mpsc::UnboundedReceiver<InboundEvent>,
    }

    impl ChannelInbound {
        pub fn new(rx: mpsc::UnboundedReceiver<InboundEvent>) -> Self {
            Self { rx }
        }
    }

    #[async_trait]
    impl InboundStream for ChannelInbound {
        async fn receive(&mut self) -> InboundEvent {
            self.rx.recv().await.unwrap_or(InboundEvent::Disconnected)
        }
    }
}
