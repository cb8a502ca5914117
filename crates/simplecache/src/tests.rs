//! Integration tests for CacheAdapter

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Client whose every call fails, for exercising error collapsing.
    struct FailingClient;

    #[async_trait]
    impl BackendClient for FailingClient {
        async fn fetch(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(CacheError::Connection("refused".to_string()))
        }

        async fn fetch_multi(&self, _keys: &[String]) -> Result<HashMap<String, Vec<u8>>> {
            Err(CacheError::Connection("refused".to_string()))
        }

        async fn store(&self, _key: &str, _value: Vec<u8>, _expire_secs: u64) -> Result<()> {
            Err(CacheError::Backend("write failed".to_string()))
        }

        async fn store_multi(
            &self,
            _entries: &HashMap<String, Vec<u8>>,
            _expire_secs: u64,
        ) -> Result<Vec<String>> {
            Err(CacheError::Backend("write failed".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Err(CacheError::Backend("delete failed".to_string()))
        }

        async fn delete_multi(&self, _keys: &[String]) -> Result<Vec<String>> {
            Err(CacheError::Backend("delete failed".to_string()))
        }

        async fn exists(&self, _key: &str) -> Result<bool> {
            Err(CacheError::Timeout)
        }

        async fn flush(&self) -> Result<()> {
            Err(CacheError::Timeout)
        }
    }

    /// Client that stores nothing and reports every store_multi key failed.
    struct RejectingClient;

    #[async_trait]
    impl BackendClient for RejectingClient {
        async fn fetch(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn fetch_multi(&self, _keys: &[String]) -> Result<HashMap<String, Vec<u8>>> {
            Ok(HashMap::new())
        }

        async fn store(&self, _key: &str, _value: Vec<u8>, _expire_secs: u64) -> Result<()> {
            Ok(())
        }

        async fn store_multi(
            &self,
            entries: &HashMap<String, Vec<u8>>,
            _expire_secs: u64,
        ) -> Result<Vec<String>> {
            Ok(entries.keys().cloned().collect())
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn delete_multi(&self, keys: &[String]) -> Result<Vec<String>> {
            Ok(keys.to_vec())
        }

        async fn exists(&self, _key: &str) -> Result<bool> {
            Ok(false)
        }

        async fn flush(&self) -> Result<()> {
            Ok(())
        }
    }

    fn memory_cache() -> CacheAdapter<MemoryClient> {
        CacheAdapter::new(MemoryClient::with_defaults())
    }

    #[tokio::test]
    async fn test_unset_key_returns_default() {
        let cache = memory_cache();

        let default = Some(b"fallback".to_vec());
        assert_eq!(cache.get("absent", default.clone()).await, default);
        assert_eq!(cache.get("absent", None).await, None);
        assert!(!cache.has("absent").await);
    }

    #[tokio::test]
    async fn test_set_infinite_then_get() {
        let cache = memory_cache();

        assert!(cache.set("key", b"value".to_vec(), Ttl::Infinite).await);
        assert_eq!(cache.get("key", None).await, Some(b"value".to_vec()));
        assert!(cache.has("key").await);
    }

    #[tokio::test]
    async fn test_expired_ttl_degrades_to_delete() {
        let cache = memory_cache();

        assert!(cache.set("key", b"old".to_vec(), Ttl::Infinite).await);

        // An already-expired TTL removes the entry instead of storing.
        assert!(cache.set("key", b"new".to_vec(), Ttl::Seconds(-5)).await);
        assert_eq!(
            cache.get("key", Some(b"miss".to_vec())).await,
            Some(b"miss".to_vec())
        );
        assert!(!cache.has("key").await);
    }

    #[tokio::test]
    async fn test_overwrite_scenario() {
        let cache = memory_cache();

        // set "x" = "42" with no TTL, read back.
        assert!(cache.set("x", b"42".to_vec(), Ttl::Infinite).await);
        assert_eq!(
            cache.get("x", Some(b"miss".to_vec())).await,
            Some(b"42".to_vec())
        );

        // set "x" = "43" with ttl=-5: behaves as a delete.
        assert!(cache.set("x", b"43".to_vec(), Ttl::Seconds(-5)).await);
        assert_eq!(
            cache.get("x", Some(b"miss".to_vec())).await,
            Some(b"miss".to_vec())
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = memory_cache();

        cache.set("key", b"value".to_vec(), Ttl::Infinite).await;
        assert!(cache.delete("key").await);
        assert!(cache.delete("key").await);
    }

    #[tokio::test]
    async fn test_batch_round_trip() {
        let cache = memory_cache();

        let entries: HashMap<String, Vec<u8>> = [
            ("a".to_string(), b"1".to_vec()),
            ("b".to_string(), b"2".to_vec()),
        ]
        .into();
        assert!(cache.set_multiple(entries, Ttl::Infinite).await);

        let default = Some(b"D".to_vec());
        let result = cache.get_multiple(&["a", "b", "c"], default.clone()).await;

        assert_eq!(result.len(), 3);
        assert_eq!(result["a"], Some(b"1".to_vec()));
        assert_eq!(result["b"], Some(b"2".to_vec()));
        assert_eq!(result["c"], default);
    }

    #[tokio::test]
    async fn test_get_multiple_collapses_duplicates() {
        let cache = memory_cache();

        cache.set("a", b"1".to_vec(), Ttl::Infinite).await;

        let result = cache.get_multiple(&["a", "a", "b", "b"], None).await;
        assert_eq!(result.len(), 2);
        assert_eq!(result["a"], Some(b"1".to_vec()));
        assert_eq!(result["b"], None);
    }

    #[tokio::test]
    async fn test_set_multiple_expired_ttl_deletes() {
        let cache = memory_cache();

        cache.set("a", b"old".to_vec(), Ttl::Infinite).await;

        let entries: HashMap<String, Vec<u8>> = [
            ("a".to_string(), b"1".to_vec()),
            ("b".to_string(), b"2".to_vec()),
        ]
        .into();
        assert!(cache.set_multiple(entries, Ttl::Seconds(-1)).await);

        assert!(!cache.has("a").await);
        assert!(!cache.has("b").await);
    }

    #[tokio::test]
    async fn test_delete_multiple() {
        let cache = memory_cache();

        cache.set("a", b"1".to_vec(), Ttl::Infinite).await;
        cache.set("b", b"2".to_vec(), Ttl::Infinite).await;

        assert!(cache.delete_multiple(&["a", "b", "absent"]).await);
        assert!(!cache.has("a").await);
        assert!(!cache.has("b").await);
    }

    #[tokio::test]
    async fn test_clear_empties_everything() {
        let cache = memory_cache();

        cache.set("a", b"1".to_vec(), Ttl::Infinite).await;
        cache.set("b", b"2".to_vec(), Ttl::Seconds(600)).await;

        assert!(cache.clear().await);
        assert!(!cache.has("a").await);
        assert!(!cache.has("b").await);
    }

    #[tokio::test]
    async fn test_malformed_span_never_errors() {
        let cache = memory_cache();

        cache.set("key", b"value".to_vec(), Ttl::Infinite).await;

        // A span past the representable range normalizes to expired and
        // degrades to a delete; the caller sees no error.
        assert!(
            cache
                .set("key", b"value".to_vec(), Ttl::Span(chrono::Duration::MAX))
                .await
        );
        assert!(!cache.has("key").await);
    }

    #[tokio::test]
    async fn test_huge_ttl_never_errors() {
        let cache = memory_cache();

        // i64::MAX seconds passes through normalization unchanged and must
        // store as never-expiring, not panic in the backend.
        let huge = Ttl::from(std::time::Duration::from_secs(u64::MAX));
        assert!(cache.set("key", b"value".to_vec(), huge).await);
        assert!(cache.has("key").await);
        assert_eq!(cache.get("key", None).await, Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_positive_span_stores() {
        let cache = memory_cache();

        assert!(
            cache
                .set("key", b"value".to_vec(), Ttl::Span(chrono::Duration::minutes(5)))
                .await
        );
        assert!(cache.has("key").await);
    }

    #[tokio::test]
    async fn test_backend_failures_collapse() {
        let cache = CacheAdapter::new(FailingClient);

        let default = Some(b"D".to_vec());
        assert_eq!(cache.get("key", default.clone()).await, default);
        assert!(!cache.set("key", b"v".to_vec(), Ttl::Infinite).await);
        assert!(!cache.delete("key").await);
        assert!(!cache.has("key").await);
        assert!(!cache.clear().await);

        let result = cache.get_multiple(&["a", "b"], default.clone()).await;
        assert_eq!(result.len(), 2);
        assert_eq!(result["a"], default);
        assert_eq!(result["b"], default);

        let entries: HashMap<String, Vec<u8>> = [("a".to_string(), b"1".to_vec())].into();
        assert!(!cache.set_multiple(entries, Ttl::Infinite).await);
        assert!(!cache.delete_multiple(&["a"]).await);
    }

    #[tokio::test]
    async fn test_partial_batch_failure_is_overall_false() {
        let cache = CacheAdapter::new(RejectingClient);

        let entries: HashMap<String, Vec<u8>> = [
            ("a".to_string(), b"1".to_vec()),
            ("b".to_string(), b"2".to_vec()),
        ]
        .into();
        assert!(!cache.set_multiple(entries, Ttl::Infinite).await);
        assert!(!cache.delete_multiple(&["a", "b"]).await);
    }
}
