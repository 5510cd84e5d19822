//! File expiry
//!
//! One delayed task per stored file. When it fires the owning client's slot
//! is released and the file is deleted if it is still there.

use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::client::IdentityRegistrar;
use crate::storage::FileStore;

#[derive(Clone)]
pub struct ExpiryScheduler {
    store: FileStore,
    registrar: IdentityRegistrar,
    lifetime: Duration,
    pending: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl ExpiryScheduler {
    pub fn new(store: FileStore, registrar: IdentityRegistrar, lifetime: Duration) -> Self {
        Self {
            store,
            registrar,
            lifetime,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedules expiry of `handle`, owned by `client`, one lifetime from now.
    pub async fn arm(&self, handle: &str, client: &str) {
        let scheduler = self.clone();
        let task_handle = handle.to_string();
        let task_client = client.to_string();

        // Held across the spawn so the task cannot unregister itself before it is registered
        let mut pending = self.pending.lock().await;
        let task = tokio::spawn(async move {
            tokio::time::sleep(scheduler.lifetime).await;
            scheduler.fire(&task_handle, &task_client).await;
        });

        if let Some(previous) = pending.insert(handle.to_string(), task) {
            previous.abort();
        }
        debug!(
            "Armed expiry for '{}' in {} ms",
            handle,
            self.lifetime.as_millis()
        );
    }

    async fn fire(&self, handle: &str, client: &str) {
        self.pending.lock().await.remove(handle);
        self.registrar.release(client).await;

        match self.store.delete(handle).await {
            Ok(true) => info!("Expired file '{}'", handle),
            Ok(false) => debug!("File '{}' was gone before expiry", handle),
            Err(e) => error!("Failed to delete expired file '{}': {}", handle, e),
        }
    }

    /// Number of expiries that have not fired yet.
    #[cfg(test)]
    pub(crate) async fn pending(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Aborts every pending expiry. Returns how many were cancelled.
    pub async fn shutdown(&self) -> usize {
        let mut pending = self.pending.lock().await;
        let cancelled = pending.len();
        for (_, task) in pending.drain() {
            task.abort();
        }
        cancelled
    }
}
