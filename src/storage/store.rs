//! Storage operations
//!
//! [`FileStore`] owns the storage root. Blobs are keyed by handle and every
//! operation resolves the handle through the path validator first.

use log::{error, info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::error::StorageError;
use crate::storage::results::SweepResult;
use crate::storage::validation::resolve_handle_path;

/// Local disk blob store rooted at a single directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if a regular file exists for the handle. Invalid handles never exist.
    pub async fn exists(&self, handle: &str) -> bool {
        match resolve_handle_path(&self.root, handle) {
            Ok(path) => is_regular_file(&path).await,
            Err(_) => false,
        }
    }

    /// Streams `data` into a new blob, refusing to replace an existing one.
    ///
    /// On a failed write the partial blob is removed before returning.
    pub async fn create<R>(&self, handle: &str, data: &mut R) -> Result<u64, StorageError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = resolve_handle_path(&self.root, handle)?;

        fs::create_dir_all(&self.root).await?;

        // create_new makes the existence check and the creation a single step
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(handle.to_string()));
            }
            Err(e) => return Err(StorageError::from(e)),
        };

        let copied = async {
            let written = tokio::io::copy(data, &mut file).await?;
            file.flush().await?;
            Ok::<u64, std::io::Error>(written)
        }
        .await;
        drop(file);

        match copied {
            Ok(written) => {
                info!("Stored file '{}' ({} bytes)", handle, written);
                Ok(written)
            }
            Err(e) => {
                error!("Failed to write file '{}': {}", handle, e);
                if let Err(cleanup) = fs::remove_file(&path).await {
                    warn!("Failed to remove partial file '{}': {}", handle, cleanup);
                }
                Err(StorageError::from(e))
            }
        }
    }

    /// Opens the blob for reading. The returned file is closed when dropped.
    pub async fn read(&self, handle: &str) -> Result<File, StorageError> {
        let path = resolve_handle_path(&self.root, handle)?;

        if !is_regular_file(&path).await {
            return Err(StorageError::NotFound(handle.to_string()));
        }

        match File::open(&path).await {
            Ok(file) => Ok(file),
            // removed between the check and the open
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(handle.to_string()))
            }
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Lists the handles of all regular files directly under the root.
    ///
    /// A missing root is an empty store.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::from(e)),
        };

        let mut handles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => handles.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        Ok(handles)
    }

    /// Deletes the blob. Returns `Ok(false)` when there was nothing to delete.
    pub async fn delete(&self, handle: &str) -> Result<bool, StorageError> {
        let path = resolve_handle_path(&self.root, handle)?;

        if !is_regular_file(&path).await {
            return Ok(false);
        }

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            // lost a race with another delete
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Deletes every file under the root. Failures are logged and counted, never raised.
    ///
    /// Entries are removed by their raw name, so files that are not valid
    /// handles are cleared too.
    pub async fn sweep(&self) -> SweepResult {
        let mut result = SweepResult::default();

        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return result,
            Err(e) => {
                error!("Failed to delete stored files: {}", e);
                return result;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to delete stored files: {}", e);
                    break;
                }
            };

            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!("Failed to inspect {:?}: {}", entry.file_name(), e);
                    result.failed += 1;
                    continue;
                }
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => result.removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("Failed to delete file {:?}: {}", entry.file_name(), e);
                    result.failed += 1;
                }
            }
        }

        result
    }
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}
