use std::time::Duration;

use crate::schema::UNIQUE_QUALITY;

/// Default cache key for the aggregated price list
pub const DEFAULT_CACHE_KEY: &str = "autobot-tf-pricings";

/// Default lifetime of the cached price list
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Configuration for the pricing service
#[derive(Debug, Clone)]
pub struct PricingsConfig {
    /// Key the price list is cached under
    pub cache_key: String,
    /// How long a cached price list stays valid
    pub cache_ttl: Duration,
    /// Quality used to resolve the shared base name of each item group
    pub name_quality: u32,
    /// Whether concurrent cache misses wait on a single upstream fetch
    pub coalesce_misses: bool,
}

impl Default for PricingsConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            name_quality: UNIQUE_QUALITY,
            coalesce_misses: false,
        }
    }
}
