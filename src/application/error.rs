//! # Application Errors
//!
//! Error types for the quote use case.
//!
//! Every failure inside a quote attempt is a [`QuoteError`]. At the use case
//! boundary it becomes a [`QuoteFailure`], whose message is what the
//! storefront shows to the shopper.
//!
//! # Error Hierarchy
//!
//! ```text
//! QuoteFailure                      - user-facing wrapper
//! └── QuoteError
//!     ├── Domain(DomainError)       - package too large, no matching rate
//!     └── Carrier(CarrierError)     - transport, carrier-reported, protocol
//! ```
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::application::error::{QuoteError, QuoteFailure};
//! use carrier_rate_quote::domain::errors::DomainError;
//!
//! let failure = QuoteFailure::from(QuoteError::from(DomainError::no_matching_rate("Priority")));
//! assert!(failure.to_string().starts_with("An error occurred during your request : "));
//! ```

use crate::application::use_cases::quote_shipment::ShipmentRateQuote;
use crate::domain::errors::DomainError;
use crate::infrastructure::carriers::error::CarrierError;
use std::fmt;
use thiserror::Error;

/// Failure of one quote attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Business rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Carrier call or response failure.
    #[error(transparent)]
    Carrier(#[from] CarrierError),
}

impl QuoteError {
    /// Returns true if a later attempt could succeed unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_retryable(),
            Self::Carrier(e) => e.is_retryable(),
        }
    }

    /// Returns true if no offered service matched the ship method.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NoMatchingRate { .. }))
    }
}

/// User-facing failure returned by the quote use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFailure {
    cause: QuoteError,
}

impl QuoteFailure {
    /// Wraps a cause.
    #[must_use]
    pub fn new(cause: QuoteError) -> Self {
        Self { cause }
    }

    /// Returns the underlying cause.
    #[inline]
    #[must_use]
    pub fn cause(&self) -> &QuoteError {
        &self.cause
    }
}

impl fmt::Display for QuoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "An error occurred during your request : {} Please contact your administrator or try again.",
            self.cause
        )
    }
}

impl std::error::Error for QuoteFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl From<QuoteError> for QuoteFailure {
    fn from(cause: QuoteError) -> Self {
        Self::new(cause)
    }
}

impl From<DomainError> for QuoteFailure {
    fn from(error: DomainError) -> Self {
        Self::new(error.into())
    }
}

impl From<CarrierError> for QuoteFailure {
    fn from(error: CarrierError) -> Self {
        Self::new(error.into())
    }
}

/// Result of the quote use case.
pub type QuoteResult = Result<ShipmentRateQuote, QuoteFailure>;
