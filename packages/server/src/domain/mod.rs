//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod message;
pub mod message_pusher;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use entity::{ChatRecord, Participant, ROOM_CAPACITY, RecordKind, Room};
pub use error::{HistoryStoreError, MessagePushError, RepositoryError, RoomError};
pub use message::InboundMessage;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{HistoryStore, RoomRepository};
pub use transport::{InboundEvent, InboundStream};
pub use value_object::{ConnectionToken, DisplayName};

#[cfg(test)]
pub use repository::MockHistoryStore;
