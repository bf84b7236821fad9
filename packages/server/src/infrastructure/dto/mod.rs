//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by purpose:
//! - `history`: persisted chat history records
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod history;
pub mod http;
