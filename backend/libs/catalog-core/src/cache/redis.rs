use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::error::CacheError;
use crate::store::CacheStore;

/// Redis-backed [`CacheStore`] over a multiplexed connection manager.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    pub async fn health_check(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        // TTL below one second would expire immediately; clamp to 1s.
        let ttl_secs = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires running Redis instance
    async fn test_set_get_delete_roundtrip() {
        let cache = RedisCache::connect("redis://localhost:6379")
            .await
            .expect("Failed to connect to Redis");

        cache.health_check().await.expect("Health check failed");

        cache
            .set_with_ttl("test:catalog-core:key", b"payload", Duration::from_secs(60))
            .await
            .expect("Failed to set value");

        let value = cache
            .get("test:catalog-core:key")
            .await
            .expect("Failed to get value");
        assert_eq!(value.as_deref(), Some(b"payload".as_slice()));

        cache
            .delete("test:catalog-core:key")
            .await
            .expect("Failed to delete value");
        let value = cache.get("test:catalog-core:key").await.unwrap();
        assert!(value.is_none());
    }
}
