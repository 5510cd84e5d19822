//! File download
//!
//! Reads a stored blob in full and deletes it in the same request, so a
//! handle can be downloaded at most once.

use log::{error, info};
use tokio::io::AsyncReadExt;

use crate::error::StorageError;
use crate::server::AppState;
use crate::transfer::results::DownloadOutcome;

/// Handles downloading a stored file.
///
/// Only the request whose delete actually removed the blob gets the bytes.
/// A concurrent download or an expiry that deleted it first turns this
/// request into a miss.
pub async fn handle_file_download(state: &AppState, handle: &str) -> DownloadOutcome {
    let mut file = match state.store.read(handle).await {
        Ok(file) => file,
        Err(e) => {
            info!("Requested file '{}', but can't be get: {}", handle, e);
            return DownloadOutcome::Missing(e);
        }
    };

    let mut data = Vec::new();
    if let Err(e) = file.read_to_end(&mut data).await {
        info!("Requested file '{}', but bytes can't be read: {}", handle, e);
        return DownloadOutcome::Unreadable(e);
    }
    drop(file);

    match state.store.delete(handle).await {
        Ok(true) => {}
        Ok(false) => {
            info!("Requested file '{}', but it was claimed first", handle);
            return DownloadOutcome::Missing(StorageError::NotFound(handle.to_string()));
        }
        // the client still gets its bytes; the expiry will retry the delete
        Err(e) => error!("Failed to delete downloaded file '{}': {}", handle, e),
    }

    info!("Requested file '{}', downloaded ({} bytes)", handle, data.len());
    DownloadOutcome::Delivered(data)
}
