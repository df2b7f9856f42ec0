use super::{ClientStorage, StorageError};
use async_trait::async_trait;

/// A storage that fails every access, used when `storage.enabled` is false.
/// The guard then behaves as if no session token was ever cached.
pub struct NoStorage;

impl NoStorage {
    pub fn new() -> Self {
        NoStorage
    }
}

impl Default for NoStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStorage for NoStorage {
    fn get_name(&self) -> &str {
        "no-storage"
    }

    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Disabled)
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
