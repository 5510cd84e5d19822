//! Transfer module for the file relay
//!
//! Upload and download protocols plus the expiry timers that bound how long
//! a stored file lives.

pub mod download;
pub mod expiry;
pub mod results;
pub mod upload;

// Re-export key types and functions
pub use download::handle_file_download;
pub use expiry::ExpiryScheduler;
pub use results::DownloadOutcome;
pub use upload::{FILE_FIELD, MULTIPART_OVERHEAD, handle_file_upload};
