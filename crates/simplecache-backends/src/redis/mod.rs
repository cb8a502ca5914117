//! Networked backend over a Redis server

mod client;
mod config;

pub use client::RedisClient;
pub use config::RedisConfig;
