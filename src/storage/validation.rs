//! Path validation
//!
//! Turns a file handle into an on-disk path under the storage root. Every
//! store operation goes through [`resolve_handle_path`], so a handle can never
//! name anything outside the root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Resolves `name` to a path directly under `root`.
///
/// The joined path is normalized lexically. It is rejected when it leaves
/// `root` or when its final segment is not exactly `name`, which rules out
/// separators, `.` and `..` inside the handle.
pub fn resolve_handle_path(root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    if name.is_empty() {
        return Err(invalid(name, "empty name"));
    }

    let root = normalize(root);
    let path = normalize(&root.join(name));

    if !path.starts_with(&root) || path == root {
        // a ".." walked out of the root
        return Err(invalid(name, "skipped prefix"));
    }

    match path.file_name() {
        Some(file_name) if file_name == OsStr::new(name) => Ok(path),
        _ => Err(invalid(name, "unexpected args")),
    }
}

/// Lexical normalization: drops `.` and folds `..` into its parent where possible.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // "/.." is "/"
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

fn invalid(name: &str, reason: &'static str) -> StorageError {
    StorageError::InvalidHandle {
        name: name.to_string(),
        reason,
    }
}
