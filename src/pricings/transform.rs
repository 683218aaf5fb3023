//! Grouping and enrichment of the raw price list

use std::collections::HashMap;

use crate::data::sku::base_segment;
use crate::data::{PricingRecord, RawPriceEntry, Sku, SkuError};
use crate::schema::{ItemQuery, SchemaError, SchemaResolver};

/// Article stripped from resolved base names
const ARTICLE_PREFIX: &str = "The ";

/// Removes one literal leading "The " from a name
pub fn strip_article(name: &str) -> &str {
    name.strip_prefix(ARTICLE_PREFIX).unwrap_or(name)
}

/// Groups entries by base defindex and enriches each with a name and image
///
/// Output is grouped by first-seen defindex, and within a group keeps
/// upstream order. The base name is resolved once per group at
/// `name_quality`; the image is resolved per entry from its full sku.
/// Any resolution failure aborts the whole transform.
pub fn transform_pricings(
    schema: &dyn SchemaResolver,
    items: &[RawPriceEntry],
    name_quality: u32,
) -> Result<Vec<PricingRecord>, SchemaError> {
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&RawPriceEntry>)> = Vec::new();

    for item in items {
        let defindex = base_segment(&item.sku);
        match group_index.get(defindex) {
            Some(&index) => groups[index].1.push(item),
            None => {
                group_index.insert(defindex, groups.len());
                groups.push((defindex, vec![item]));
            }
        }
    }

    let mut pricings = Vec::with_capacity(items.len());
    for (defindex, entries) in groups {
        let defindex = parse_defindex(defindex, entries[0])?;
        let name = schema.get_name(ItemQuery {
            defindex,
            quality: name_quality,
        })?;
        let base_name = strip_article(&name);

        for entry in entries {
            let sku: Sku = entry.sku.parse()?;
            let image = schema.get_image(&sku)?;
            pricings.push(PricingRecord::new(entry.clone(), base_name.to_string(), image));
        }
    }

    Ok(pricings)
}

fn parse_defindex(segment: &str, entry: &RawPriceEntry) -> Result<u32, SkuError> {
    segment.parse().map_err(|_| SkuError::InvalidDefindex {
        sku: entry.sku.clone(),
        segment: segment.to_string(),
    })
}
