pub mod base;
pub mod file_storage;
pub mod memory_storage;
pub mod no_storage;

// Re-export the primary storage items so code outside can do
// "use crate::storage::{ClientStorage, create_storage};"
pub use base::{create_storage, take_pending_redirect, ClientStorage, StorageError};
