//! File-backed item schema
//!
//! Loads a trimmed-down TF2 schema from a JSON document of the form:
//!
//! ```json
//! {
//!   "qualities": { "6": "Unique", "11": "Strange" },
//!   "items": [
//!     { "defindex": 30, "name": "Texas Slim's Dome Shine", "proper_name": true,
//!       "image_url": "https://..." }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ItemQuery, SchemaError, SchemaResolver, UNIQUE_QUALITY};
use crate::data::Sku;

/// Quality id of "Normal" (stock) items, which render without a prefix
const NORMAL_QUALITY: u32 = 0;

/// A single item definition
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaItem {
    pub defindex: u32,
    pub name: String,
    /// Whether the unique name is rendered with a leading "The "
    #[serde(default)]
    pub proper_name: bool,
    pub image_url: String,
    #[serde(default)]
    pub image_url_australium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    qualities: HashMap<String, String>,
    items: Vec<SchemaItem>,
}

/// In-memory item schema indexed by defindex
#[derive(Debug, Clone, Default)]
pub struct ItemSchema {
    items: HashMap<u32, SchemaItem>,
    qualities: HashMap<u32, String>,
}

impl ItemSchema {
    /// Loads a schema from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parses a schema from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument =
            serde_json::from_str(json).map_err(|e| SchemaError::Load(e.to_string()))?;

        let mut qualities = HashMap::with_capacity(document.qualities.len());
        for (id, name) in document.qualities {
            let id = id
                .parse::<u32>()
                .map_err(|_| SchemaError::Load(format!("invalid quality id '{}'", id)))?;
            qualities.insert(id, name);
        }

        Ok(Self::from_parts(document.items, qualities))
    }

    /// Builds a schema from already-parsed items and qualities
    pub fn from_parts(items: Vec<SchemaItem>, qualities: HashMap<u32, String>) -> Self {
        let items = items.into_iter().map(|item| (item.defindex, item)).collect();
        Self { items, qualities }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item(&self, defindex: u32) -> Result<&SchemaItem, SchemaError> {
        self.items
            .get(&defindex)
            .ok_or(SchemaError::UnknownItem(defindex))
    }
}

impl SchemaResolver for ItemSchema {
    fn get_name(&self, query: ItemQuery) -> Result<String, SchemaError> {
        let item = self.item(query.defindex)?;

        match query.quality {
            UNIQUE_QUALITY if item.proper_name => Ok(format!("The {}", item.name)),
            UNIQUE_QUALITY | NORMAL_QUALITY => Ok(item.name.clone()),
            quality => {
                let prefix = self
                    .qualities
                    .get(&quality)
                    .ok_or(SchemaError::UnknownQuality(quality))?;
                Ok(format!("{} {}", prefix, item.name))
            }
        }
    }

    fn get_image(&self, sku: &Sku) -> Result<String, SchemaError> {
        let item = self.item(sku.defindex)?;

        let image = match &item.image_url_australium {
            Some(australium) if sku.is_australium() => australium,
            _ => &item.image_url,
        };
        Ok(image.clone())
    }
}
