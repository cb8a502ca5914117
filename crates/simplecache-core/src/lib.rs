//! simplecache-core: Core traits and types for the simplecache library
//!
//! This crate provides the foundational pieces shared by every backend and
//! the adapter facade: the [`BackendClient`] and [`Cache`] traits, the
//! [`Ttl`] sum type with its normalization rules, and the error type used
//! between the adapter and its clients.

mod error;
mod traits;
mod ttl;

pub use error::{CacheError, Result};
pub use traits::*;
pub use ttl::{Ttl, TTL_EXPIRED, TTL_INFINITE};
