//! Pricing service: cache-aside reads and explicit refresh

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{transform_pricings, PricingsConfig, PricingsError};
use crate::cache::{CacheGateway, CacheStore};
use crate::data::{PriceListFetcher, PricingsCache};
use crate::schema::SchemaResolver;

/// A source of aggregated pricings
#[async_trait]
pub trait PricingsProvider: Send + Sync {
    /// Returns the current price list, from cache when possible
    async fn find_all(&self) -> Result<PricingsCache, PricingsError>;

    /// Drops the cached price list and rebuilds it from upstream
    async fn refresh(&self) -> Result<(), PricingsError>;
}

/// Serves the autobot.tf price list through a TTL-bounded cache
///
/// Without `coalesce_misses`, concurrent calls that all miss the cache each
/// fetch and transform independently and each write the cache.
pub struct PricingsService {
    fetcher: Arc<dyn PriceListFetcher>,
    schema: Arc<dyn SchemaResolver>,
    cache: CacheGateway,
    name_quality: u32,
    miss_lock: Option<Mutex<()>>,
}

impl PricingsService {
    pub fn new(
        fetcher: Arc<dyn PriceListFetcher>,
        schema: Arc<dyn SchemaResolver>,
        store: Arc<dyn CacheStore>,
        config: PricingsConfig,
    ) -> Self {
        Self {
            fetcher,
            schema,
            cache: CacheGateway::new(store, config.cache_key, config.cache_ttl),
            name_quality: config.name_quality,
            miss_lock: config.coalesce_misses.then(|| Mutex::new(())),
        }
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Fetches and transforms the upstream price list
    ///
    /// Returns `Ok(None)` when the upstream reports `success: false`.
    async fn fetch_and_transform(&self) -> Result<Option<PricingsCache>, PricingsError> {
        let response = self.fetcher.fetch_price_list().await?;
        if !response.success {
            return Ok(None);
        }

        let pricings = transform_pricings(self.schema.as_ref(), &response.items, self.name_quality)?;
        Ok(Some(PricingsCache { pricings }))
    }

    async fn load_and_cache(&self) -> Result<PricingsCache, PricingsError> {
        let Some(cache) = self.fetch_and_transform().await? else {
            tracing::error!("autobot.tf reported an unsuccessful price list");
            return Err(PricingsError::UpstreamFailure);
        };

        self.cache.set(&cache).await?;
        Ok(cache)
    }
}

#[async_trait]
impl PricingsProvider for PricingsService {
    async fn find_all(&self) -> Result<PricingsCache, PricingsError> {
        if let Some(cached) = self.cache.get().await? {
            return Ok(cached);
        }

        let Some(lock) = &self.miss_lock else {
            return self.load_and_cache().await;
        };

        let _guard = lock.lock().await;
        // Another caller may have filled the cache while we waited
        if let Some(cached) = self.cache.get().await? {
            return Ok(cached);
        }
        self.load_and_cache().await
    }

    async fn refresh(&self) -> Result<(), PricingsError> {
        self.cache.delete().await?;

        let Some(cache) = self.fetch_and_transform().await? else {
            tracing::warn!("autobot.tf reported an unsuccessful price list, cache left empty");
            return Ok(());
        };

        self.cache.set(&cache).await?;
        tracing::info!(records = cache.pricings.len(), "refreshed pricings cache");
        Ok(())
    }
}

impl std::fmt::Debug for PricingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingsService")
            .field("cache", &self.cache)
            .field("name_quality", &self.name_quality)
            .field("coalesce_misses", &self.miss_lock.is_some())
            .finish_non_exhaustive()
    }
}
