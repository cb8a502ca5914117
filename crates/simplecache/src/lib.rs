//! simplecache: Uniform adapter over external cache engines
//!
//! Exposes two pre-existing engines (an in-process shared-memory map and a
//! networked Redis store) through one failure-free contract: get, set,
//! delete, their multi-key variants, existence check, and full clear.
//! No caching logic lives here; the engines own storage, expiry, eviction,
//! and thread safety.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use simplecache::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = CacheAdapter::new(MemoryClient::with_defaults());
//!
//!     cache.set("answer", b"42".to_vec(), Ttl::Seconds(60)).await;
//!
//!     match cache.get("answer", None).await {
//!         Some(value) => println!("Got: {:?}", value),
//!         None => println!("Cache miss"),
//!     }
//! }
//! ```
//!
//! Backend misses and failures never surface as errors: `get` falls back to
//! the caller-supplied default and every other operation reports a plain
//! boolean.

mod adapter;

// Re-export core
pub use simplecache_core::*;

// Re-export backends
#[cfg(feature = "memory")]
pub use simplecache_backends::{MemoryClient, MemoryConfig, MemoryStats};

#[cfg(feature = "redis")]
pub use simplecache_backends::{RedisClient, RedisConfig};

// Export adapter
pub use adapter::CacheAdapter;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{BackendClient, Cache, CacheAdapter, CacheError, Result, Ttl};

    #[cfg(feature = "memory")]
    pub use crate::{MemoryClient, MemoryConfig};

    #[cfg(feature = "redis")]
    pub use crate::{RedisClient, RedisConfig};
}

#[cfg(test)]
mod tests;
