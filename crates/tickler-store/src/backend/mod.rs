// ABOUTME: Backing-store contract used by the record store and index manager.
// ABOUTME: Defines the Backend trait (hash with TTL, list push/range/remove, delete) and its error type.

mod memory;
mod redis_backend;

pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a backing store. Every variant means the store could
/// not be reached or refused the call; callers surface it as unavailability.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("failed to create connection pool: {0}")]
    CreatePool(#[from] deadpool_redis::CreatePoolError),
}

/// Field map stored under a single key.
pub type Fields = HashMap<String, String>;

/// The primitive operations the store is built on. Keys expire out-of-band;
/// no implementation notifies anyone when that happens.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Write all fields under `key` and set the key to expire after `ttl`.
    async fn put_hash(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), BackendError>;

    /// Read every field under `key`. Absent and expired keys yield an empty map.
    async fn get_hash(&self, key: &str) -> Result<Fields, BackendError>;

    /// Overwrite the given fields only if `key` is still live. The key's
    /// remaining TTL is left as is. Returns false when the key was absent.
    async fn update_hash_if_exists(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<bool, BackendError>;

    /// Insert `value` at the head of the list at `key`.
    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Full contents of the list at `key`, head first.
    async fn list_range(&self, key: &str) -> Result<Vec<String>, BackendError>;

    /// Remove every occurrence of `value` from the list at `key`.
    async fn list_remove(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete `key` whatever its type. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), BackendError>;
}
