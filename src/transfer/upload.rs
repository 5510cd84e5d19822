//! File upload
//!
//! Runs an upload request through its gates in order: duplicate client,
//! single file field, size limit, store write. Only a request that passes all
//! of them gets a handle and an armed expiry.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::http::{HeaderMap, StatusCode, header};
use log::info;

use crate::error::RelayError;
use crate::server::AppState;

/// Name of the multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// Allowance for multipart boundaries and part headers on top of the size limit
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Handles an upload from `client`, returning the new handle.
///
/// `declared_body` is the request's Content-Length, when it sent one.
pub async fn handle_file_upload(
    state: &AppState,
    client: &str,
    declared_body: Option<u64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, RelayError> {
    if state.registrar.lookup(client).await.is_some() {
        return Err(RelayError::DuplicateClient);
    }

    let limit = state.config.size_limit;
    if let Some(size) = declared_body {
        if size > limit + MULTIPART_OVERHEAD {
            return Err(RelayError::SizeLimitExceeded {
                size,
                limit,
                declared: true,
            });
        }
    }

    let multipart = multipart.map_err(|e| {
        RelayError::MalformedRequest(format!(
            "Failed to parse multipart form data: {}",
            e.body_text()
        ))
    })?;
    let data = read_single_file(multipart, limit).await?;

    let handle = state.registrar.assign(client).await?;
    if let Err(e) = state.store.create(&handle, &mut data.as_slice()).await {
        // no expiry will be armed for this handle, so free the slot now
        state.registrar.release(client).await;
        return Err(RelayError::from(e));
    }

    state.expiry.arm(&handle, client).await;
    info!(
        "Uploaded file '{}' from {} ({} bytes)",
        handle,
        client,
        data.len()
    );

    Ok(handle)
}

/// Reads the one `file` field of the form. Other fields are skipped.
async fn read_single_file(mut multipart: Multipart, limit: u64) -> Result<Vec<u8>, RelayError> {
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if data.is_some() {
            return Err(RelayError::MalformedRequest(
                "Please specify a file (not more)".into(),
            ));
        }
        data = Some(read_file_field(field, limit).await?);
    }

    data.ok_or_else(|| RelayError::MalformedRequest("No file specified".into()))
}

async fn read_file_field(mut field: Field<'_>, limit: u64) -> Result<Vec<u8>, RelayError> {
    if let Some(size) = declared_length(field.headers()) {
        if size > limit {
            return Err(RelayError::SizeLimitExceeded {
                size,
                limit,
                declared: true,
            });
        }
    }

    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let size = (data.len() + chunk.len()) as u64;
        if size > limit {
            return Err(RelayError::SizeLimitExceeded {
                size,
                limit,
                declared: false,
            });
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn multipart_error(err: MultipartError, limit: u64) -> RelayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::SizeLimitExceeded {
            size: limit + MULTIPART_OVERHEAD,
            limit,
            declared: false,
        }
    } else {
        RelayError::MalformedRequest(format!(
            "Failed to parse multipart form data: {}",
            err.body_text()
        ))
    }
}
