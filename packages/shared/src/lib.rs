//! Utilities shared across the Futari packages.

pub mod logger;
pub mod time;
