//! Client registry
//!
//! Maps a client address to the handle of its single live upload.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::error::RelayError;

#[derive(Default)]
struct RegistryState {
    handles: HashMap<String, String>,
    last_issued: u64,
}

/// Registry for tracking which clients hold a live upload
///
/// Cloning is cheap; every clone shares the same map.
#[derive(Clone, Default)]
pub struct IdentityRegistrar {
    state: Arc<Mutex<RegistryState>>,
}

impl IdentityRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live handle of a client, if any.
    pub async fn lookup(&self, client: &str) -> Option<String> {
        self.state.lock().await.handles.get(client).cloned()
    }

    /// Issues a fresh handle for the client.
    ///
    /// Fails with `DuplicateClient` if the client already holds one, so the
    /// check and the insert happen under a single lock.
    pub async fn assign(&self, client: &str) -> Result<String, RelayError> {
        let mut state = self.state.lock().await;

        if state.handles.contains_key(client) {
            return Err(RelayError::DuplicateClient);
        }

        let issued = next_timestamp(state.last_issued);
        state.last_issued = issued;

        let handle = format!("{issued:x}");
        state.handles.insert(client.to_string(), handle.clone());
        Ok(handle)
    }

    /// Frees the client's slot, returning the handle it held.
    pub async fn release(&self, client: &str) -> Option<String> {
        self.state.lock().await.handles.remove(client)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.state.lock().await.handles.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Current unix time in milliseconds, bumped past `last` if the clock has not moved on.
fn next_timestamp(last: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();

    now.max(last + 1)
}
