//! Logging middleware
//!
//! Provides request logging functionality.

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::net::SocketAddr;
use std::time::Instant;

/// Logs one line per request once the response is ready
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} -> {} ({:?})",
        peer,
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
