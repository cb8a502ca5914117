//! In-process shared-memory backend

mod client;

pub use client::{MemoryClient, MemoryConfig, MemoryStats};
