//! Futari: a two-person chat relay over WebSocket.
//!
//! The crate is layered the same way from the inside out:
//!
//! - `domain`: room, chat records and the inbound protocol, plus the traits
//!   the outer layers implement
//! - `infrastructure`: in-memory and JSON file stores, the WebSocket pusher
//! - `usecase`: admission, message dispatch, disconnect and the per-connection
//!   session
//! - `ui`: the axum router and handlers

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
