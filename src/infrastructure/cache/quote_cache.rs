//! # Quote Cache
//!
//! Single-flight memoisation of parsed rate options per shipment version.
//!
//! [`QuoteCache::get_or_compute`] runs the supplied computation at most once
//! per key while its result stays in the backing [`RuntimeCache`]. Callers
//! that arrive while a computation for the same key is running wait for it
//! and share its result.
//!
//! The key embeds the shipment version, so a changed shipment gets a new key
//! instead of an overwrite. Expiry is left to the backing cache.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use carrier_rate_quote::domain::value_objects::{ProviderKey, ProviderSettingsKey, ShipmentVersion};
//! use carrier_rate_quote::infrastructure::cache::{CacheKey, InMemoryRuntimeCache, QuoteCache};
//!
//! # tokio_test::block_on(async {
//! let cache = QuoteCache::new(Arc::new(InMemoryRuntimeCache::new()));
//! let key = CacheKey::new(ProviderKey::new_v4(), ProviderSettingsKey::new_v4(), ShipmentVersion::new_v4());
//!
//! let options = cache
//!     .get_or_compute(&key, || async { Ok::<_, std::convert::Infallible>(Vec::new()) })
//!     .await
//!     .unwrap();
//! assert!(options.is_empty());
//! # });
//! ```

use crate::domain::entities::RateOption;
use crate::domain::value_objects::{ProviderKey, ProviderSettingsKey, ShipmentVersion};
use crate::infrastructure::cache::runtime_cache::RuntimeCache;
use dashmap::DashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Prefix shared by every quote cache key.
pub const CACHE_KEY_PREFIX: &str = "shippingquotecollection";

/// Identity of one cached rate option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    provider: ProviderKey,
    settings: ProviderSettingsKey,
    version: ShipmentVersion,
}

impl CacheKey {
    /// Creates a key from the method's provider, the provider settings and
    /// the shipment version.
    #[must_use]
    pub const fn new(
        provider: ProviderKey,
        settings: ProviderSettingsKey,
        version: ShipmentVersion,
    ) -> Self {
        Self {
            provider,
            settings,
            version,
        }
    }

    /// Returns the shipment version part.
    #[inline]
    #[must_use]
    pub fn version(&self) -> ShipmentVersion {
        self.version
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            CACHE_KEY_PREFIX, self.provider, self.settings, self.version
        )
    }
}

type Flight = Arc<OnceCell<Vec<RateOption>>>;

/// Get-or-compute cache over a [`RuntimeCache`].
#[derive(Debug)]
pub struct QuoteCache {
    backing: Arc<dyn RuntimeCache>,
    in_flight: DashMap<String, Flight>,
}

impl QuoteCache {
    /// Creates a cache over `backing`.
    #[must_use]
    pub fn new(backing: Arc<dyn RuntimeCache>) -> Self {
        Self {
            backing,
            in_flight: DashMap::new(),
        }
    }

    /// Returns the number of keys currently being computed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns the cached options for `key`, or runs `compute` and caches
    /// its result.
    ///
    /// Failures are not cached. A waiter whose leader failed runs its own
    /// `compute`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `compute`.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &CacheKey, compute: F) -> Result<Vec<RateOption>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<RateOption>, E>>,
    {
        let key = key.to_string();

        if let Some(hit) = self.backing.get(&key).await {
            debug!(%key, "quote cache hit");
            return Ok(hit);
        }

        let flight = self.in_flight.entry(key.clone()).or_default().clone();
        let result = flight
            .get_or_try_init(|| async {
                // a flight for this key may have finished since the first lookup
                if let Some(hit) = self.backing.get(&key).await {
                    return Ok(hit);
                }
                debug!(%key, "quote cache miss");
                match compute().await {
                    Ok(computed) => Ok(self.backing.insert(key.clone(), computed).await),
                    Err(error) => Err(error),
                }
            })
            .await
            .cloned();

        self.in_flight
            .remove_if(&key, |_, current| Arc::ptr_eq(current, &flight));
        result
    }
}
