//! Redis backend client over a bb8 connection pool

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use redis::{AsyncCommands, Value};
use std::collections::HashMap;

use simplecache_core::{BackendClient, CacheError, Result};

use super::config::RedisConfig;

/// Networked backend client backed by a Redis server
///
/// The server owns expiry and eviction; this client only translates the
/// primitive calls. Values travel as raw bytes with no envelope.
#[derive(Clone)]
pub struct RedisClient {
    pool: Pool<RedisConnectionManager>,
    config: RedisConfig,
}

impl RedisClient {
    /// Connect a new Redis client
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { pool, config })
    }

    /// Get prefix for a key
    fn prefixed_key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Get connection from pool
    async fn connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

#[async_trait]
impl BackendClient for RedisClient {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let prefixed = self.prefixed_key(key);

        conn.get(&prefixed)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn fetch_multi(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.connection().await?;

        let prefixed_keys: Vec<String> = keys.iter().map(|k| self.prefixed_key(k)).collect();
        let raw: Vec<Option<Vec<u8>>> = conn
            .mget(&prefixed_keys)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        let mut found = HashMap::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(raw) {
            if let Some(data) = value {
                found.insert(key.clone(), data);
            }
        }
        Ok(found)
    }

    async fn store(&self, key: &str, value: Vec<u8>, expire_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let prefixed = self.prefixed_key(key);

        if expire_secs > 0 {
            let _: () = conn
                .set_ex(&prefixed, value, expire_secs)
                .await
                .map_err(|e| CacheError::Backend(e.to_string()))?;
        } else {
            let _: () = conn
                .set(&prefixed, value)
                .await
                .map_err(|e| CacheError::Backend(e.to_string()))?;
        }
        Ok(())
    }

    async fn store_multi(
        &self,
        entries: &HashMap<String, Vec<u8>>,
        expire_secs: u64,
    ) -> Result<Vec<String>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();

        for (key, value) in entries {
            let prefixed = self.prefixed_key(key);
            if expire_secs > 0 {
                pipe.set_ex(&prefixed, value.as_slice(), expire_secs);
            } else {
                pipe.set(&prefixed, value.as_slice());
            }
        }

        // A pipeline either fully submits or errors as a whole; per-key
        // failures are not visible here, so success is an empty set.
        pipe.query_async::<Vec<Value>>(&mut *conn)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(Vec::new())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let prefixed = self.prefixed_key(key);

        // DEL of an absent key returns 0 removed; still a success.
        let _: u64 = conn
            .del(&prefixed)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn delete_multi(&self, keys: &[String]) -> Result<Vec<String>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;

        let prefixed_keys: Vec<String> = keys.iter().map(|k| self.prefixed_key(k)).collect();
        let _: u64 = conn
            .unlink(&prefixed_keys)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(Vec::new())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let prefixed = self.prefixed_key(key);

        conn.exists(&prefixed)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.connection().await?;

        let match_pattern = match &self.config.key_prefix {
            Some(prefix) => format!("{}:*", prefix),
            None => "*".to_string(),
        };

        // Scan and unlink; flushes the whole namespace, not just keys this
        // client wrote.
        let mut cursor = 0u64;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(&match_pattern)
                .arg("COUNT")
                .arg(1000)
                .query_async(&mut *conn)
                .await
                .map_err(|e| CacheError::Backend(e.to_string()))?;

            if !keys.is_empty() {
                let _: usize = conn
                    .unlink(&keys)
                    .await
                    .map_err(|e| CacheError::Backend(e.to_string()))?;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(())
    }
}
