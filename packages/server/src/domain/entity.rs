//! Domain entities: participants, the room and chat records.

use chrono::{DateTime, FixedOffset};

use super::{
    error::RoomError,
    message::SELF_LABEL,
    value_object::{ConnectionToken, DisplayName},
};

/// Maximum number of concurrent participants in the room
pub const ROOM_CAPACITY: usize = 2;

/// A connected participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub token: ConnectionToken,
    pub name: DisplayName,
    pub connected_at: DateTime<FixedOffset>,
}

impl Participant {
    pub fn new(
        token: ConnectionToken,
        name: DisplayName,
        connected_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            token,
            name,
            connected_at,
        }
    }
}

/// The chat room: a bounded set of participants.
///
/// Participants are kept in admission order so fan-out is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub participants: Vec<Participant>,
    capacity: usize,
}

impl Room {
    /// Create an empty room with the default capacity of two
    pub fn new() -> Self {
        Self::with_capacity(ROOM_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            participants: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity
    }

    /// Add a participant, rejecting it when the room is full
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.is_full() {
            return Err(RoomError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant by token; `None` when it was not present
    pub fn remove_participant(&mut self, token: &ConnectionToken) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.token == token)?;
        Some(self.participants.remove(index))
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of a persisted chat record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Text,
    Emotion,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Emotion => "emotion",
        }
    }
}

/// One persisted unit of chat history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub sender: DisplayName,
    pub body: String,
    /// Already rendered as `[YYYY-MM-DD HH:MM]`
    pub timestamp: String,
    pub kind: RecordKind,
}

impl ChatRecord {
    pub fn text(sender: DisplayName, body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender,
            body: body.into(),
            timestamp: timestamp.into(),
            kind: RecordKind::Text,
        }
    }

    pub fn emotion(
        sender: DisplayName,
        body: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            body: body.into(),
            timestamp: timestamp.into(),
            kind: RecordKind::Emotion,
        }
    }

    /// Label shown to `recipient`: "You" for the sender's own records
    pub fn label_for<'a>(&'a self, recipient: &DisplayName) -> &'a str {
        if &self.sender == recipient {
            SELF_LABEL
        } else {
            self.sender.as_str()
        }
    }

    /// Render the chat line as `recipient` sees it
    pub fn render_for(&self, recipient: &DisplayName) -> String {
        let label = self.label_for(recipient);
        match self.kind {
            RecordKind::Text => format!("{}: {} {}", label, self.body, self.timestamp),
            RecordKind::Emotion => format!("💌 {} sent {} {}", label, self.body, self.timestamp),
        }
    }
}
