//! Server core functionality
//!
//! This module contains the HTTP server, its router and the state shared by
//! every request handler.

pub mod core;
pub mod state;

pub use self::core::{Server, create_router};
pub use state::AppState;
