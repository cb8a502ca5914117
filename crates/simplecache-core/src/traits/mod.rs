//! Core traits for cache operations

mod cache;
mod client;

pub use cache::Cache;
pub use client::BackendClient;
