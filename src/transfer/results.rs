//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

use crate::error::StorageError;

/// Outcome of a download attempt
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Full contents, the blob is gone from the store
    Delivered(Vec<u8>),
    /// Blob exists but could not be read to the end; it is left in place
    Unreadable(std::io::Error),
    /// No blob for the handle, or the handle is invalid
    Missing(StorageError),
}
