//! HTTP handlers for the relay endpoints.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{ConnectInfo, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use std::net::SocketAddr;

use crate::client::resolve_client_address;
use crate::error::handlers::{error_to_status_code, handle_error};
use crate::protocol::responses::{DownloadResponse, UploadResponse};
use crate::server::AppState;
use crate::transfer::{handle_file_download, handle_file_upload};

/// POST /upload
/// Stores the multipart `file` field and returns its handle
pub async fn upload(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<UploadResponse>) {
    let client = resolve_client_address(&headers, peer, state.config.trust_proxy);
    let declared_body = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok());

    match handle_file_upload(&state, &client, declared_body, multipart).await {
        Ok(id) => (StatusCode::OK, Json(UploadResponse::success(id))),
        Err(e) => {
            handle_error(&e, &client);
            let code = error_to_status_code(&e);
            (code, Json(UploadResponse::failure(code.as_u16(), e.to_string())))
        }
    }
}

/// GET /get/{id}
/// Returns the file as base64 and deletes it; failures are reported in the body
pub async fn download(State(state): State<AppState>, Path(id): Path<String>) -> Json<DownloadResponse> {
    let outcome = handle_file_download(&state, &id).await;
    Json(DownloadResponse::from(outcome))
}
