//! Repository 実装
//!
//! - `inmemory`: プロセス内のメモリに保持する実装
//! - `json_file`: 履歴を JSON ファイルに永続化する実装

pub mod inmemory;
pub mod json_file;

pub use inmemory::{InMemoryHistoryStore, InMemoryRoomRepository};
pub use json_file::JsonFileHistoryStore;
