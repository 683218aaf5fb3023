//! tfpricings library
//!
//! Fetches the autobot.tf price list, groups it by base item, enriches every
//! entry with a display name and image from the item schema, and serves the
//! result through a TTL-bounded cache.

pub mod cache;
pub mod cli;
pub mod data;
pub mod pricings;
pub mod refresh;
pub mod schema;
