//! Shared-memory backend client using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use simplecache_core::{BackendClient, Result};

/// Configuration for the memory client
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Initial capacity hint for the underlying map
    pub initial_capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
        }
    }
}

impl MemoryConfig {
    /// Create config with a specific capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
        }
    }
}

/// A stored blob plus its expiration deadline
#[derive(Debug, Clone)]
struct StoredValue {
    data: Vec<u8>,
    expires_at: Option<SystemTime>,
}

impl StoredValue {
    fn new(data: Vec<u8>, expire_secs: u64) -> Self {
        // 0 means no expiration, matching the engines' convention. A
        // deadline past the representable time range also never expires.
        let expires_at = (expire_secs > 0)
            .then(|| SystemTime::now().checked_add(Duration::from_secs(expire_secs)))
            .flatten();
        Self { data, expires_at }
    }

    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => SystemTime::now() >= at,
            None => false,
        }
    }
}

/// Access counters for the memory client
#[derive(Debug, Default, Clone)]
pub struct MemoryStats {
    /// Fetches that found a live entry
    pub hits: u64,
    /// Fetches that found nothing
    pub misses: u64,
    /// Entries written
    pub writes: u64,
    /// Entries removed by delete
    pub deletes: u64,
}

/// Shared-memory backend client
///
/// Wraps a `DashMap` as the in-process engine. Expired entries are removed
/// lazily when touched by `fetch`/`exists`; [`MemoryClient::purge_expired`]
/// sweeps the rest. Cloning creates a new handle to the SAME underlying
/// store.
#[derive(Clone)]
pub struct MemoryClient {
    data: Arc<DashMap<String, StoredValue>>,
    stats: Arc<RwLock<MemoryStats>>,
}

impl MemoryClient {
    /// Create a new memory client
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            data: Arc::new(DashMap::with_capacity(config.initial_capacity)),
            stats: Arc::new(RwLock::new(MemoryStats::default())),
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MemoryConfig::default())
    }

    /// Remove every expired entry; returns the number removed
    pub fn purge_expired(&self) -> usize {
        let expired: Vec<String> = self
            .data
            .iter()
            .filter(|entry| entry.value().is_expired())
            .map(|entry| entry.key().clone())
            .collect();

        let mut count = 0;
        for key in expired {
            if self.data.remove(&key).is_some() {
                count += 1;
            }
        }
        count
    }

    /// Snapshot of the access counters
    pub fn stats(&self) -> MemoryStats {
        self.stats.read().clone()
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Look up a live entry, lazily evicting it when past its deadline
    fn live_entry(&self, key: &str) -> Option<Vec<u8>> {
        match self.data.get(key) {
            Some(entry) if entry.is_expired() => {
                drop(entry);
                self.data.remove(key);
                None
            }
            Some(entry) => Some(entry.data.clone()),
            None => None,
        }
    }
}

#[async_trait]
impl BackendClient for MemoryClient {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.live_entry(key);
        let mut stats = self.stats.write();
        if value.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        Ok(value)
    }

    async fn fetch_multi(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.live_entry(key) {
                found.insert(key.clone(), value);
            }
        }

        let mut stats = self.stats.write();
        stats.hits += found.len() as u64;
        stats.misses += (keys.len() - found.len()) as u64;
        Ok(found)
    }

    async fn store(&self, key: &str, value: Vec<u8>, expire_secs: u64) -> Result<()> {
        self.data
            .insert(key.to_string(), StoredValue::new(value, expire_secs));
        self.stats.write().writes += 1;
        Ok(())
    }

    async fn store_multi(
        &self,
        entries: &HashMap<String, Vec<u8>>,
        expire_secs: u64,
    ) -> Result<Vec<String>> {
        for (key, value) in entries {
            self.data
                .insert(key.clone(), StoredValue::new(value.clone(), expire_secs));
        }
        self.stats.write().writes += entries.len() as u64;

        // An in-process insert cannot partially fail.
        Ok(Vec::new())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.data.remove(key).is_some() {
            self.stats.write().deletes += 1;
        }
        Ok(())
    }

    async fn delete_multi(&self, keys: &[String]) -> Result<Vec<String>> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(Vec::new())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.live_entry(key).is_some())
    }

    async fn flush(&self) -> Result<()> {
        self.data.clear();
        Ok(())
    }
}
