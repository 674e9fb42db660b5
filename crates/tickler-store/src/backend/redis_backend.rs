// ABOUTME: Redis implementation of the Backend trait over a deadpool-redis connection pool.
// ABOUTME: Pooled connections are checked out per call and returned on drop, including on error paths.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Connection, Pool, Runtime};
use redis::{AsyncCommands, Script};

use super::{Backend, BackendError, Fields};

/// Sets the given field/value pairs only when the hash still exists, so an
/// update racing with expiry cannot recreate the key without a TTL.
const UPDATE_IF_EXISTS: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    redis.call('HSET', KEYS[1], unpack(ARGV))
    return 1
end
return 0
";

/// Backend talking to a Redis server. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct RedisBackend {
    pool: Pool,
    update_script: Script,
}

impl RedisBackend {
    /// Build a pool for the given `redis://` URL. No connection is opened
    /// until the first call.
    pub fn connect(url: &str) -> Result<Self, BackendError> {
        let pool = PoolConfig::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self::with_pool(pool))
    }

    pub fn with_pool(pool: Pool) -> Self {
        Self {
            pool,
            update_script: Script::new(UPDATE_IF_EXISTS),
        }
    }

    /// Round-trip a PING to check the server is reachable.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn conn(&self) -> Result<Connection, BackendError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn put_hash(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), BackendError> {
        let mut conn = self.conn().await?;
        redis::pipe()
            .atomic()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, ttl.as_secs() as i64)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> Result<Fields, BackendError> {
        let mut conn = self.conn().await?;
        let fields: Fields = conn.hgetall(key).await?;
        Ok(fields)
    }

    async fn update_hash_if_exists(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<bool, BackendError> {
        if fields.is_empty() {
            let mut conn = self.conn().await?;
            let exists: bool = conn.exists(key).await?;
            return Ok(exists);
        }

        let mut conn = self.conn().await?;
        let mut invocation = self.update_script.key(key);
        for (field, value) in fields {
            invocation.arg(field).arg(value);
        }
        let updated: i64 = invocation.invoke_async(&mut conn).await?;
        Ok(updated == 1)
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut conn = self.conn().await?;
        let _: () = conn.lpush(key, value).await?;
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, BackendError> {
        let mut conn = self.conn().await?;
        let values: Vec<String> = conn.lrange(key, 0, -1).await?;
        Ok(values)
    }

    async fn list_remove(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut conn = self.conn().await?;
        // count 0 removes every occurrence
        let _: () = conn.lrem(key, 0, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        let mut conn = self.conn().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
