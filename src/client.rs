// src/client.rs
//! The configured client: storage, request layer, and session wiring

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::common::ClientConfig;
use crate::http::RequestExecutor;
use crate::store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Entry point for the Kukekodes backend.
///
/// Domain methods live in the per-domain modules (`courses`, `learning`,
/// `live`, `forum`, `coach`, `users`) as `impl Kukekodes` blocks; this file
/// only wires configuration, storage, and the request layer together.
#[derive(Clone)]
pub struct Kukekodes {
    pub(crate) executor: Arc<RequestExecutor>,
    auth: Arc<AuthManager>,
}

impl Kukekodes {
    /// Builds a client from configuration: file-backed session store when
    /// `session_file` is set, in-memory otherwise.
    pub fn new(config: ClientConfig) -> Self {
        let store: Arc<dyn TokenStore> = match &config.session_file {
            Some(path) => Arc::new(FileTokenStore::open(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Builds a client over a caller-provided store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let executor = Arc::new(RequestExecutor::new(&config, store.clone()));
        let auth = Arc::new(AuthManager::new(
            executor.clone(),
            store,
            config.password_policy.clone(),
        ));
        Self { executor, auth }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Session operations: login, signup, logout, cached user.
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }
}
