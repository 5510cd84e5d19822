use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Router, middleware};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::middleware::log_request;
use crate::protocol::{download, upload};
use crate::server::state::AppState;
use crate::transfer::MULTIPART_OVERHEAD;

pub struct Server {
    state: AppState,
    listener: TcpListener,
}

impl Server {
    /// Empties the storage root, then binds the listener.
    ///
    /// The sweep always finishes before the socket is bound, so no request
    /// can see a file left over from a previous run.
    pub async fn new(config: ServiceConfig) -> std::io::Result<Self> {
        let state = AppState::new(Arc::new(config));

        let swept = state.store.sweep().await;
        info!(
            "Removed {} leftover file(s) from {}",
            swept.removed,
            state.store.root().display()
        );
        if swept.failed > 0 {
            warn!("{} leftover file(s) could not be removed", swept.failed);
        }

        if let Err(e) = tokio::fs::create_dir_all(state.store.root()).await {
            warn!("Failed to create storage directory: {}", e);
        } else {
            info!("Storage directory: {}", state.store.root().display());
        }

        let socket = state
            .config
            .listen_socket()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
        let listener = TcpListener::bind(socket).await?;
        info!("Server bound to {}", socket);

        Ok(Self { state, listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C, then cancels outstanding expiries.
    pub async fn start(self) -> std::io::Result<()> {
        let Self { state, listener } = self;
        info!(
            "Starting mango-service (size limit {} bytes, lifetime {} ms, trust proxy {})",
            state.config.size_limit, state.config.lifetime, state.config.trust_proxy
        );

        let app = create_router(state.clone());
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        let cancelled = state.expiry.shutdown().await;
        info!("Server stopped, {} pending expiries cancelled", cancelled);
        Ok(())
    }
}

/// Builds the router. Requests must carry `ConnectInfo<SocketAddr>`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.size_limit + MULTIPART_OVERHEAD)
        .unwrap_or(usize::MAX);

    Router::new()
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/get/:id", get(download))
        .with_state(state)
        .layer(middleware::from_fn(log_request))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
