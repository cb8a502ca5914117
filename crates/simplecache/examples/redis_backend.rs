//! Demo of the networked backend.
//!
//! Requires a Redis server on localhost:
//! `cargo run --example redis_backend --features redis`

use simplecache::prelude::*;

#[tokio::main]
async fn main() {
    let config = RedisConfig::new("redis://127.0.0.1:6379").prefix("demo");
    let client = match RedisClient::connect(config).await {
        Ok(client) => client,
        Err(error) => {
            eprintln!("could not connect to redis: {error}");
            return;
        }
    };

    let cache = CacheAdapter::new(client);

    cache.set("greeting", b"hello".to_vec(), Ttl::Seconds(60)).await;

    match cache.get("greeting", None).await {
        Some(value) => println!("greeting = {}", String::from_utf8_lossy(&value)),
        None => println!("miss"),
    }

    let found = cache.get_multiple(&["greeting", "absent"], Some(b"?".to_vec())).await;
    for (key, value) in found {
        println!("{key} -> {:?}", value.map(|v| String::from_utf8_lossy(&v).into_owned()));
    }

    cache.clear().await;
}
