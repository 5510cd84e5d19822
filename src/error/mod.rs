//! Error handling
//!
//! Defines error types and handling for the file relay.

pub mod handlers;
pub mod types;

pub use types::*;
