//! Error handlers
//!
//! Maps protocol errors onto HTTP status codes and reports them.

use crate::error::types::RelayError;
use axum::http::StatusCode;
use log::warn;

/// Log a rejected upload
pub fn handle_error(err: &RelayError, client: &str) {
    let code = error_to_status_code(err);
    warn!(
        "Failed to upload file from {}: {} (code {})",
        client,
        err,
        code.as_u16()
    );
}

/// Convert error to HTTP response code
pub fn error_to_status_code(err: &RelayError) -> StatusCode {
    match err {
        RelayError::SizeLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        RelayError::Storage(_) => StatusCode::BAD_REQUEST,
        RelayError::DuplicateClient => StatusCode::BAD_REQUEST,
        RelayError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_size_errors_map_to_413() {
        let err = RelayError::SizeLimitExceeded {
            size: 10,
            limit: 5,
            declared: true,
        };
        assert_eq!(error_to_status_code(&err), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "File is too large (10 bytes), limit is 5");
    }

    #[test]
    fn test_everything_else_maps_to_400() {
        let errors = [
            RelayError::DuplicateClient,
            RelayError::MalformedRequest("No file specified".into()),
            RelayError::Storage(StorageError::AlreadyExists("abc".into())),
        ];
        for err in &errors {
            assert_eq!(error_to_status_code(err), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_storage_messages() {
        let err = StorageError::NotFound("18c1f".into());
        assert_eq!(err.to_string(), "file with name '18c1f' doesn't exist");

        let err = RelayError::from(StorageError::AlreadyExists("18c1f".into()));
        assert_eq!(
            err.to_string(),
            "Failed to save file: can't create '18c1f', it already exists"
        );
    }
}
