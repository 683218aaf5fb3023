//! Core data models for the pricing pipeline
//!
//! This module contains the upstream price list types, the enriched pricing
//! records produced from them, and the object stored in the cache.

pub mod autobot;
pub mod sku;

pub use autobot::{AutobotClient, PriceListFetcher, UpstreamError};
pub use sku::{Sku, SkuAttribute, SkuError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name under which the resolved base name is emitted
pub const BASE_NAME_FIELD: &str = "baseName";

/// Field name under which the resolved image is emitted
pub const IMAGE_FIELD: &str = "image";

/// A single upstream price list entry
///
/// Only `sku` is interpreted; every other field (buy/sell prices, timestamps,
/// provider metadata) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceEntry {
    /// Variant key of the priced item
    pub sku: String,
    /// Provider specific fields, opaque to this crate
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Envelope returned by the upstream price list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceListResponse {
    /// Whether the upstream managed to build its price list
    pub success: bool,
    /// Price entries, in upstream order
    #[serde(default)]
    pub items: Vec<RawPriceEntry>,
}

/// A price entry enriched with its display name and image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    /// All fields of the upstream entry
    #[serde(flatten)]
    pub entry: RawPriceEntry,
    /// Display name shared by every variant of the same base item
    #[serde(rename = "baseName")]
    pub base_name: String,
    /// Image reference for this exact variant
    pub image: String,
}

impl PricingRecord {
    /// Merges an entry with its resolved name and image
    ///
    /// Upstream fields named like the enrichment fields are dropped so the
    /// resolved values win.
    pub fn new(mut entry: RawPriceEntry, base_name: String, image: String) -> Self {
        entry
            .fields
            .retain(|key, _| key != BASE_NAME_FIELD && key != IMAGE_FIELD);
        Self {
            entry,
            base_name,
            image,
        }
    }

    pub fn sku(&self) -> &str {
        &self.entry.sku
    }
}

/// The single object held in the cache between requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingsCache {
    /// Records from the most recent successful transform, in output order
    pub pricings: Vec<PricingRecord>,
}
