pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod transfer;

pub use config::ServiceConfig;
pub use server::{AppState, Server, create_router};
