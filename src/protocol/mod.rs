//! HTTP protocol surface
//!
//! Request handlers and the JSON bodies they return.

pub mod handlers;
pub mod responses;

pub use handlers::{download, upload};
pub use responses::{DownloadResponse, UploadResponse};
