use async_trait::async_trait;

use super::error::StorageError;
use super::key::ObjectKey;

/// Maximum number of keys a single `delete_batch` call accepts.
///
/// Callers with larger sets issue multiple sequential calls.
pub const MAX_DELETE_BATCH: usize = 100;

/// Path-keyed binary object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under the given key, overwriting any existing object.
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Retrieve all bytes stored under a key.
    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Delete a single object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Delete up to [`MAX_DELETE_BATCH`] objects in one call.
    ///
    /// Missing objects are skipped, not errors. Implementations attempt every
    /// key before reporting a failure. Fails with `BatchTooLarge` when handed
    /// more than the cap.
    async fn delete_batch(&self, keys: &[ObjectKey]) -> Result<(), StorageError>;

    /// Provision any directory/container structure needed under a key prefix.
    ///
    /// Idempotent: repeated calls with the same prefix succeed without
    /// duplication.
    async fn ensure_prefix(&self, prefix: &ObjectKey) -> Result<(), StorageError>;

    /// Derive the publicly reachable URL for a key. Pure; no I/O.
    fn public_url(&self, key: &ObjectKey) -> String;
}
