//! # Runtime Cache
//!
//! Backing store for memoised rate option lists.
//!
//! The [`RuntimeCache`] port owns storage and any expiry policy. Entries are
//! write-once: a second insert for a key keeps the first value.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::infrastructure::cache::{InMemoryRuntimeCache, RuntimeCache};
//!
//! # tokio_test::block_on(async {
//! let cache = InMemoryRuntimeCache::new();
//! cache.insert("k".to_string(), Vec::new()).await;
//! assert!(cache.get("k").await.is_some());
//! # });
//! ```

use crate::domain::entities::RateOption;
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;

/// Key-value store for parsed rate options.
#[async_trait]
pub trait RuntimeCache: Send + Sync + fmt::Debug {
    /// Returns the cached options for `key`, if any.
    async fn get(&self, key: &str) -> Option<Vec<RateOption>>;

    /// Stores `options` unless `key` is already present, and returns the
    /// value now held for `key`.
    async fn insert(&self, key: String, options: Vec<RateOption>) -> Vec<RateOption>;

    /// Evicts `key`. Returns `true` if an entry was removed.
    async fn remove(&self, key: &str) -> bool;
}

/// In-process [`RuntimeCache`] with no expiry.
///
/// # Thread Safety
///
/// Backed by a [`DashMap`]; the write-once check and the insert happen
/// under the same shard lock.
#[derive(Debug, Default)]
pub struct InMemoryRuntimeCache {
    entries: DashMap<String, Vec<RateOption>>,
}

impl InMemoryRuntimeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evicts every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[async_trait]
impl RuntimeCache for InMemoryRuntimeCache {
    async fn get(&self, key: &str) -> Option<Vec<RateOption>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    async fn insert(&self, key: String, options: Vec<RateOption>) -> Vec<RateOption> {
        self.entries.entry(key).or_insert(options).value().clone()
    }

    async fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}
