//! # Quote Caching
//!
//! - [`RuntimeCache`]: backing store port, owns expiry
//! - [`InMemoryRuntimeCache`]: in-process store
//! - [`QuoteCache`]: single-flight get-or-compute keyed by [`CacheKey`]

pub mod quote_cache;
pub mod runtime_cache;

pub use quote_cache::{CACHE_KEY_PREFIX, CacheKey, QuoteCache};
pub use runtime_cache::{InMemoryRuntimeCache, RuntimeCache};
