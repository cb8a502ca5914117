//! Uniform cache contract

use std::collections::HashMap;

use async_trait::async_trait;

use crate::Ttl;

/// The uniform operation set exposed to callers
///
/// Every backend is reached through this one contract. No method returns an
/// error: a backend miss or failure surfaces as `false` or as the
/// caller-supplied default, so callers get the same failure-free surface
/// regardless of which engine sits underneath.
///
/// Values are opaque byte blobs; the contract defines no serialization.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value, or `default` unchanged on miss or backend failure.
    async fn get(&self, key: &str, default: Option<Vec<u8>>) -> Option<Vec<u8>>;

    /// Store a value under a key.
    ///
    /// A TTL that normalizes to an expired value degrades to `delete(key)`
    /// and returns that result instead of storing.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Ttl) -> bool;

    /// Delete a key. Idempotent: deleting an absent key still returns true.
    async fn delete(&self, key: &str) -> bool;

    /// Fetch several keys at once.
    ///
    /// The result contains every requested key; keys the backend did not
    /// return are filled with `default`. Duplicate requested keys collapse
    /// to one entry.
    async fn get_multiple(
        &self,
        keys: &[&str],
        default: Option<Vec<u8>>,
    ) -> HashMap<String, Option<Vec<u8>>>;

    /// Store a batch of entries under one uniform TTL.
    ///
    /// Returns true only if the backend reports zero per-key failures; any
    /// partial failure is an overall false. The batch is not atomic across
    /// keys.
    async fn set_multiple(&self, entries: HashMap<String, Vec<u8>>, ttl: Ttl) -> bool;

    /// Delete several keys; true only if no individual deletion fails.
    async fn delete_multiple(&self, keys: &[&str]) -> bool;

    /// True only if the backend holds a live, non-expired entry.
    async fn has(&self, key: &str) -> bool;

    /// Flush the backend's entire namespace, not just keys written through
    /// this adapter.
    async fn clear(&self) -> bool;
}
