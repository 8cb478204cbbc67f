use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use catalog_core::{CacheStore, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Read-through memoization over the [`CacheStore`]. Cache failures never
/// fail a request: read errors count as misses, write errors are swallowed
/// after logging and the freshly computed value is still returned.
pub struct RecommendationCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl RecommendationCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn user_key(user_id: UserId) -> String {
        format!("recs:user:{}", user_id)
    }

    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.store.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "failed to decode cached value, recomputing"),
            },
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "cache read failed, treating as miss"),
        }

        let value = compute().await?;

        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(e) = self.store.set_with_ttl(key, &bytes, self.ttl).await {
                    warn!(key, error = %e, "cache write failed");
                }
            }
            Err(e) => warn!(key, error = %e, "failed to encode value for cache"),
        }

        Ok(value)
    }

    /// Explicit invalidation, to be called by collaborators that mutate a
    /// user's enrollment/review/wishlist state.
    pub async fn clear(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!(key, error = %e, "cache invalidation failed");
        }
    }
}
