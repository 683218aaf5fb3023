//! Typed access to the cached price list

use std::sync::Arc;
use std::time::Duration;

use super::{CacheError, CacheStore};
use crate::data::PricingsCache;

/// Reads and writes the [`PricingsCache`] under a single key with a fixed TTL
///
/// The three operations are independent calls on the store; nothing here
/// makes a get followed by a set atomic.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
    key: String,
    ttl: Duration,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn CacheStore>, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached price list, or `None` on miss or expiry
    ///
    /// A stored value that no longer deserializes is treated as a miss so the
    /// next write replaces it.
    pub async fn get(&self) -> Result<Option<PricingsCache>, CacheError> {
        let Some(value) = self.store.get(&self.key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(cache) => Ok(Some(cache)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, cache: &PricingsCache) -> Result<(), CacheError> {
        tracing::debug!(
            key = %self.key,
            ttl_secs = self.ttl.as_secs(),
            records = cache.pricings.len(),
            "setting cache"
        );
        let value = serde_json::to_value(cache)?;
        self.store.set(&self.key, value, self.ttl).await
    }

    pub async fn delete(&self) -> Result<(), CacheError> {
        tracing::debug!(key = %self.key, "deleting cache");
        self.store.delete(&self.key).await
    }
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
