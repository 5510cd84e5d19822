//! Error types
//!
//! Defines domain-specific error types for the storage layer and for the
//! upload/download protocol built on top of it.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Handle failed the path-safety check
    InvalidHandle { name: String, reason: &'static str },
    NotFound(String),
    AlreadyExists(String),
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidHandle { name, reason } => {
                write!(f, "invalid file name '{}' ({})", name, reason)
            }
            StorageError::NotFound(name) => write!(f, "file with name '{}' doesn't exist", name),
            StorageError::AlreadyExists(name) => {
                write!(f, "can't create '{}', it already exists", name)
            }
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Upload protocol errors
#[derive(Debug)]
pub enum RelayError {
    Storage(StorageError),
    /// Client address already owns a live upload
    DuplicateClient,
    SizeLimitExceeded {
        size: u64,
        limit: u64,
        /// False when the size was measured on the received bytes
        declared: bool,
    },
    MalformedRequest(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Storage(e) => write!(f, "Failed to save file: {}", e),
            RelayError::DuplicateClient => write!(f, "Only one file per IP address"),
            RelayError::SizeLimitExceeded {
                size,
                limit,
                declared: true,
            } => write!(f, "File is too large ({} bytes), limit is {}", size, limit),
            RelayError::SizeLimitExceeded {
                size,
                limit,
                declared: false,
            } => write!(
                f,
                "File is too large (at least {} bytes), limit is {}",
                size, limit
            ),
            RelayError::MalformedRequest(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for RelayError {
    fn from(error: StorageError) -> Self {
        RelayError::Storage(error)
    }
}
