//! Inbound side of a participant's transport.

use async_trait::async_trait;

/// One event read from a participant's connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text payload
    Payload(String),
    /// The peer closed the connection (gracefully or not)
    Disconnected,
    /// The transport failed and cannot be read any further
    Error(String),
}

/// Source of inbound events for one connection.
///
/// `receive` blocks until the next event; after `Disconnected` or `Error`
/// it is not called again.
#[async_trait]
pub trait InboundStream: Send {
    async fn receive(&mut self) -> InboundEvent;
}
