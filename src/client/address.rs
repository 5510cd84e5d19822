//! Client address resolution
//!
//! Decides which address a request is attributed to for the
//! one-upload-per-client policy.

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the identity address of a request.
///
/// With `trust_proxy` set and a non-empty X-Forwarded-For header, the first
/// address of the header wins. Otherwise the peer IP is used without its port.
pub fn resolve_client_address(headers: &HeaderMap, peer: SocketAddr, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(forwarded) = forwarded_for(headers) {
            return forwarded;
        }
    }

    peer.ip().to_string()
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
