//! HTTP response bodies
//!
//! JSON shapes returned by the upload and download endpoints.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::transfer::DownloadOutcome;

/// Body of `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub ok: bool,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl UploadResponse {
    pub fn success(id: String) -> Self {
        Self {
            ok: true,
            code: 200,
            error: None,
            id: Some(id),
        }
    }

    pub fn failure(code: u16, error: String) -> Self {
        Self {
            ok: false,
            code,
            error: Some(error),
            id: None,
        }
    }
}

/// Body of `GET /get/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadResponse {
    /// "ok" or "error"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub present: bool,
    /// Base64 of the file contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl From<DownloadOutcome> for DownloadResponse {
    fn from(outcome: DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Delivered(data) => Self {
                status: "ok".into(),
                error: None,
                present: true,
                file: Some(BASE64_STANDARD.encode(data)),
            },
            DownloadOutcome::Unreadable(e) => Self {
                status: "ok".into(),
                error: Some(e.to_string()),
                present: false,
                file: None,
            },
            DownloadOutcome::Missing(e) => Self {
                status: "error".into(),
                error: Some(e.to_string()),
                present: false,
                file: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use serde_json::json;

    #[test]
    fn test_upload_response_omits_empty_fields() {
        let body = serde_json::to_value(UploadResponse::success("18c2a".into())).unwrap();
        assert_eq!(body, json!({"ok": true, "code": 200, "id": "18c2a"}));

        let body = serde_json::to_value(UploadResponse::failure(
            413,
            "File is too large (10 bytes), limit is 5".into(),
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({"ok": false, "code": 413, "error": "File is too large (10 bytes), limit is 5"})
        );
    }

    #[test]
    fn test_download_outcomes() {
        let body = serde_json::to_value(DownloadResponse::from(DownloadOutcome::Delivered(
            b"0123456789".to_vec(),
        )))
        .unwrap();
        assert_eq!(
            body,
            json!({"status": "ok", "present": true, "file": "MDEyMzQ1Njc4OQ=="})
        );

        let body = serde_json::to_value(DownloadResponse::from(DownloadOutcome::Missing(
            StorageError::NotFound("18c2a".into()),
        )))
        .unwrap();
        assert_eq!(
            body,
            json!({"status": "error", "present": false, "error": "file with name '18c2a' doesn't exist"})
        );

        let unreadable = DownloadResponse::from(DownloadOutcome::Unreadable(
            std::io::Error::other("disk on fire"),
        ));
        assert_eq!(unreadable.status, "ok");
        assert!(!unreadable.present);
        assert_eq!(unreadable.error.as_deref(), Some("disk on fire"));
    }
}
