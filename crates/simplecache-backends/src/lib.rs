//! simplecache-backends: Backend clients for simplecache
//!
//! Each client wraps a pre-existing cache engine and exposes it through the
//! [`BackendClient`](simplecache_core::BackendClient) primitives. The
//! engines own storage, eviction, and thread safety; the clients only
//! translate.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::{MemoryClient, MemoryConfig, MemoryStats};

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "redis")]
pub use redis::{RedisClient, RedisConfig};
