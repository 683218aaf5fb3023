//! Cache-aside pricing pipeline
//!
//! Fetches the upstream price list, groups and enriches it with schema data,
//! and serves the result through a TTL-bounded cache.

mod config;
mod service;
mod transform;

pub use config::{PricingsConfig, DEFAULT_CACHE_KEY, DEFAULT_CACHE_TTL};
pub use service::{PricingsProvider, PricingsService};
pub use transform::{strip_article, transform_pricings};

use thiserror::Error;

use crate::cache::CacheError;
use crate::data::UpstreamError;
use crate::schema::SchemaError;

/// Errors surfaced by the pricing service
#[derive(Debug, Error)]
pub enum PricingsError {
    /// The upstream envelope reported `success: false`
    #[error("Autobot.tf pricelist request failed")]
    UpstreamFailure,

    /// The price list request itself could not complete
    #[error(transparent)]
    Transport(#[from] UpstreamError),

    /// A name or image could not be resolved from the item schema
    #[error("Failed to resolve item: {0}")]
    Resolution(#[from] SchemaError),

    /// The cache store failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}
