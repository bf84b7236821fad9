//! InMemory 実装

pub mod history;
pub mod room;

pub use history::InMemoryHistoryStore;
pub use room::InMemoryRoomRepository;
