use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{file_storage::FileStorage, memory_storage::MemoryStorage, no_storage::NoStorage};
use crate::config::{StorageBackend, StorageConfig};

/// The only failure kind at the client storage boundary. Callers in the guard
/// treat any of these as "no token".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("client storage is disabled")]
    Disabled,
    #[error("client storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("client storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("client storage is misconfigured: {0}")]
    Misconfigured(String),
}

/// Persisted key/value storage owned by the client shell (the equivalent of
/// a browser's local storage).
#[async_trait]
pub trait ClientStorage: Send + Sync {
    fn get_name(&self) -> &str;
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn is_enabled(&self) -> bool {
        // NoStorage overrides this so logs can say why lookups fail
        true
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
/// If `storage.enabled = false`, returns NoStorage. Otherwise, picks the
/// specified backend.
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn ClientStorage>, StorageError> {
    if !config.enabled {
        info!("Client storage is disabled. Using NoStorage.");
        return Ok(Arc::new(NoStorage::new()));
    }

    match &config.backend {
        Some(StorageBackend::Memory) => {
            info!("Using in-memory client storage.");
            Ok(Arc::new(MemoryStorage::new()))
        }
        Some(StorageBackend::File(file_config)) => {
            info!("Using file client storage at {}", file_config.path.display());
            Ok(Arc::new(FileStorage::new(file_config)))
        }
        None => Err(StorageError::Misconfigured(
            "storage is enabled, but no backend type is provided".to_string(),
        )),
    }
}

/// Returns the pending redirect target stored under `key` and clears it.
///
/// This is the post-login half of the redirect flow: the guard writes the
/// target, whoever completes the sign-in reads it back exactly once.
pub async fn take_pending_redirect(
    storage: &dyn ClientStorage,
    key: &str,
) -> Result<Option<String>, StorageError> {
    let target = storage.get_item(key).await?;
    if let Some(target) = &target {
        debug!("Consuming pending redirect target '{}'", target);
        if let Err(e) = storage.remove_item(key).await {
            warn!("Failed to clear pending redirect target: {}", e);
            return Err(e);
        }
    }
    Ok(target.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage_disabled() {
        let storage = create_storage(&StorageConfig {
            enabled: false,
            backend: Some(StorageBackend::Memory),
        })
        .expect("disabled storage is always constructible");
        assert!(!storage.is_enabled());
        assert!(storage.get_item("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_create_storage_missing_backend() {
        let result = create_storage(&StorageConfig {
            enabled: true,
            backend: None,
        });
        assert!(matches!(result, Err(StorageError::Misconfigured(_))));
    }

    #[tokio::test]
    async fn test_take_pending_redirect_consumes_once() {
        let storage = MemoryStorage::new();
        storage.set_item("authRedirect", "/account").await.unwrap();

        let first = take_pending_redirect(&storage, "authRedirect").await.unwrap();
        assert_eq!(first.as_deref(), Some("/account"));

        let second = take_pending_redirect(&storage, "authRedirect").await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_take_pending_redirect_propagates_failure() {
        let storage = NoStorage::new();
        let result = take_pending_redirect(&storage, "authRedirect").await;
        assert!(matches!(result, Err(StorageError::Disabled)));
    }
}
