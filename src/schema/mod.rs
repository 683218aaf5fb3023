//! Item schema lookups
//!
//! The pricing transform needs two things from the TF2 item schema: a display
//! name for a defindex at a given quality, and an image for a fully parsed
//! sku. Both go through the [`SchemaResolver`] trait so the transform never
//! depends on where the schema comes from.

mod file;

pub use file::{ItemSchema, SchemaItem};

use thiserror::Error;

use crate::data::{Sku, SkuError};

/// Quality id of "Unique" items, used to resolve canonical base names
pub const UNIQUE_QUALITY: u32 = 6;

/// Errors raised at the schema boundary
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No item with this defindex exists in the schema
    #[error("Unknown item defindex: {0}")]
    UnknownItem(u32),

    /// No quality with this id exists in the schema
    #[error("Unknown item quality: {0}")]
    UnknownQuality(u32),

    /// The variant key could not be parsed
    #[error("Invalid sku: {0}")]
    InvalidSku(#[from] SkuError),

    /// The schema file could not be loaded
    #[error("Failed to load item schema: {0}")]
    Load(String),
}

/// Name lookup key: base item plus the quality to render the name for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuery {
    pub defindex: u32,
    pub quality: u32,
}

/// Resolves display names and images for items
pub trait SchemaResolver: Send + Sync {
    /// Returns the display name of an item at a given quality
    fn get_name(&self, query: ItemQuery) -> Result<String, SchemaError>;

    /// Returns the image reference for a specific item variant
    fn get_image(&self, sku: &Sku) -> Result<String, SchemaError>;
}
