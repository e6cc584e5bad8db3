//! # Rate Transport Trait
//!
//! Port for delivering an encoded rate request to a carrier.
//!
//! The quote path depends only on this trait, so tests can substitute a
//! canned response and production can use [`HttpRateTransport`].
//!
//! [`HttpRateTransport`]: crate::infrastructure::carriers::http_client::HttpRateTransport
//!
//! # Examples
//!
//! ```ignore
//! use carrier_rate_quote::infrastructure::carriers::traits::RateTransport;
//!
//! struct CannedTransport(String);
//!
//! #[async_trait::async_trait]
//! impl RateTransport for CannedTransport {
//!     async fn post(&self, _body: String) -> CarrierResult<String> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use std::fmt;

/// Sends a request body to the carrier and returns the raw response.
///
/// Implementations bound the call with their own timeout. Any failure is
/// final for the quote attempt.
#[async_trait]
pub trait RateTransport: Send + Sync + fmt::Debug {
    /// Posts the form-encoded request body.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` on network failure, timeout or a non-2xx
    /// response.
    async fn post(&self, body: String) -> CarrierResult<String>;
}
