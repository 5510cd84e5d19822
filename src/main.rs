//! mango-service - Entry Point
//!
//! Ephemeral file relay: upload one file, download it once, or let it expire.

use log::info;

use mango_service::{Server, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting mango-service...");

    let config = ServiceConfig::load()?;
    let server = Server::new(config).await?;
    server.start().await?;

    Ok(())
}
