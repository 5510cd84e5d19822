//! Shared application state
//!
//! Everything a request handler needs, built once from the configuration.

use std::sync::Arc;

use crate::client::IdentityRegistrar;
use crate::config::ServiceConfig;
use crate::storage::FileStore;
use crate::transfer::ExpiryScheduler;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub store: FileStore,
    pub registrar: IdentityRegistrar,
    pub expiry: ExpiryScheduler,
}

impl AppState {
    pub fn new(config: Arc<ServiceConfig>) -> Self {
        let store = FileStore::new(config.storage_root());
        let registrar = IdentityRegistrar::new();
        let expiry = ExpiryScheduler::new(
            store.clone(),
            registrar.clone(),
            config.lifetime_duration(),
        );

        Self {
            config,
            store,
            registrar,
            expiry,
        }
    }
}
