//! Cache adapter over any backend client

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use simplecache_core::{BackendClient, Cache, Ttl};

/// Adapter exposing a [`BackendClient`] through the [`Cache`] contract
///
/// Holds nothing but the client handle; every operation is stateless
/// relative to prior calls except through the shared backend. TTLs are
/// normalized once per call, and any backend error is collapsed into
/// `false` or the caller's default before it can cross the boundary.
pub struct CacheAdapter<C: BackendClient> {
    client: C,
}

impl<C: BackendClient> CacheAdapter<C> {
    /// Create an adapter over a backend client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Borrow the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Consume the adapter, returning the client
    pub fn into_client(self) -> C {
        self.client
    }
}

#[async_trait]
impl<C: BackendClient> Cache for CacheAdapter<C> {
    async fn get(&self, key: &str, default: Option<Vec<u8>>) -> Option<Vec<u8>> {
        match self.client.fetch(key).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => default,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    key = %key,
                    error = %error,
                    "fetch failed, returning default"
                );
                default
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Ttl) -> bool {
        let expire = ttl.normalize();
        if expire < 0 {
            // An already-expired TTL is a delete instruction.
            return self.delete(key).await;
        }

        match self.client.store(key, value, expire as u64).await {
            Ok(()) => true,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    key = %key,
                    error = %error,
                    "store failed"
                );
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match self.client.delete(key).await {
            Ok(()) => true,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    key = %key,
                    error = %error,
                    "delete failed"
                );
                false
            }
        }
    }

    async fn get_multiple(
        &self,
        keys: &[&str],
        default: Option<Vec<u8>>,
    ) -> HashMap<String, Option<Vec<u8>>> {
        // Duplicate requested keys collapse to one entry.
        let unique: Vec<String> = keys
            .iter()
            .map(|key| key.to_string())
            .collect::<HashSet<String>>()
            .into_iter()
            .collect();

        let mut found = match self.client.fetch_multi(&unique).await {
            Ok(found) => found,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    keys = ?unique,
                    error = %error,
                    "fetch_multi failed, returning defaults"
                );
                HashMap::new()
            }
        };

        let mut result = HashMap::with_capacity(unique.len());
        for key in unique {
            let value = match found.remove(&key) {
                Some(value) => Some(value),
                None => default.clone(),
            };
            result.insert(key, value);
        }
        result
    }

    async fn set_multiple(&self, entries: HashMap<String, Vec<u8>>, ttl: Ttl) -> bool {
        let expire = ttl.normalize();
        if expire < 0 {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            return self.delete_multiple(&keys).await;
        }

        match self.client.store_multi(&entries, expire as u64).await {
            Ok(failed) if failed.is_empty() => true,
            Ok(failed) => {
                // The contract only reports overall failure; the failed
                // keys are logged and otherwise discarded.
                debug!(
                    target: "simplecache",
                    failed = ?failed,
                    "store_multi reported per-key failures"
                );
                false
            }
            Err(error) => {
                debug!(
                    target: "simplecache",
                    error = %error,
                    "store_multi failed"
                );
                false
            }
        }
    }

    async fn delete_multiple(&self, keys: &[&str]) -> bool {
        let keys: Vec<String> = keys.iter().map(|key| key.to_string()).collect();

        match self.client.delete_multi(&keys).await {
            Ok(failed) if failed.is_empty() => true,
            Ok(failed) => {
                debug!(
                    target: "simplecache",
                    failed = ?failed,
                    "delete_multi reported per-key failures"
                );
                false
            }
            Err(error) => {
                debug!(
                    target: "simplecache",
                    error = %error,
                    "delete_multi failed"
                );
                false
            }
        }
    }

    async fn has(&self, key: &str) -> bool {
        match self.client.exists(key).await {
            Ok(exists) => exists,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    key = %key,
                    error = %error,
                    "exists failed"
                );
                false
            }
        }
    }

    async fn clear(&self) -> bool {
        match self.client.flush().await {
            Ok(()) => true,
            Err(error) => {
                debug!(
                    target: "simplecache",
                    error = %error,
                    "flush failed"
                );
                false
            }
        }
    }
}
