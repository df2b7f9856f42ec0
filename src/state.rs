//! Shared application state.
//!
//! Contains the state shared across all request handlers: configuration,
//! the navigation guard, the identity state it observes and client storage.

use crate::config::ConfigV1;
use crate::guard::NavigationGuard;
use crate::identity::ReactiveAuthState;
use crate::storage::ClientStorage;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler; every field is a cheap
/// reference-counted handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The guard deciding every navigation.
    pub guard: Arc<NavigationGuard>,
    /// Identity SDK state, written by the SDK bridge and read by the guard.
    pub identity: Arc<ReactiveAuthState>,
    /// Persisted client storage (pending redirect target, cached tokens).
    pub storage: Arc<dyn ClientStorage>,
}

impl AppState {
    /// Wires the guard to the given identity state and storage.
    pub fn new(
        config: Arc<ConfigV1>,
        identity: Arc<ReactiveAuthState>,
        storage: Arc<dyn ClientStorage>,
    ) -> Self {
        let guard = Arc::new(NavigationGuard::new(
            &config.guard,
            identity.clone(),
            storage.clone(),
        ));
        AppState {
            config,
            guard,
            identity,
            storage,
        }
    }
}
