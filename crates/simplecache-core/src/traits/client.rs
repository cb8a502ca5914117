//! Backend client trait

use std::collections::HashMap;

use async_trait::async_trait;

use crate::Result;

/// Primitive operations of an underlying cache engine
///
/// Implementations wrap a pre-existing store (an in-process shared map, a
/// Redis server) and expose its primitives unchanged: no TTL policy, no
/// default-value handling, no batching semantics of their own. The adapter
/// layers the uniform [`Cache`](crate::Cache) contract on top.
///
/// `expire_secs` follows the engines' own convention: `0` means the entry
/// never expires.
#[async_trait]
pub trait BackendClient: Send + Sync + 'static {
    /// Fetch a single value.
    ///
    /// Returns `Ok(None)` if the key is absent or expired; found/not-found
    /// is always this explicit `Option`, never a side-channel result code.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Fetch several keys in one round-trip where the engine supports it.
    ///
    /// The returned map holds only the keys the engine found.
    async fn fetch_multi(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>>;

    /// Store a value under a key with the given expiration.
    async fn store(&self, key: &str, value: Vec<u8>, expire_secs: u64) -> Result<()>;

    /// Store a batch of entries under one uniform expiration.
    ///
    /// Returns the keys the engine failed to store; an empty set is full
    /// success. Batches are not atomic across keys.
    async fn store_multi(
        &self,
        entries: &HashMap<String, Vec<u8>>,
        expire_secs: u64,
    ) -> Result<Vec<String>>;

    /// Delete a key. Deleting an absent key is a success.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete several keys; returns the keys that failed to delete.
    async fn delete_multi(&self, keys: &[String]) -> Result<Vec<String>>;

    /// True only for a live, non-expired entry.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remove every entry in this client's namespace.
    async fn flush(&self) -> Result<()>;
}
