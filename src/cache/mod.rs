//! Cache module for storing the aggregated price list
//!
//! The pricing service only talks to a [`CacheGateway`], which wraps any
//! [`CacheStore`] under a fixed key and TTL. Two stores are provided: an
//! in-process [`MemoryStore`] and a disk-backed [`CacheManager`] that keeps
//! entries as JSON files so they survive between CLI invocations.

mod gateway;
mod manager;
mod memory;

pub use gateway::CacheGateway;
pub use manager::{CacheManager, CachedData};
pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a cache store
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the backing storage failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The TTL cannot be represented by the store
    #[error("Invalid cache TTL: {0:?}")]
    InvalidTtl(Duration),
}

/// Generic key-value store with per-entry TTL
///
/// `get` returns `None` for both missing and expired keys. `set` overwrites
/// unconditionally and `delete` succeeds whether or not the key exists.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
