//! # Domain Errors
//!
//! Rule violations raised by the domain layer.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::errors::DomainError;
//!
//! let err = DomainError::package_too_large(131);
//! assert!(!err.is_retryable());
//! assert!(err.to_string().contains("too large"));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Length plus girth exceeds what the carrier will rate at all.
    #[error("Shipping Error: Package too large. Length plus girth of {total} exceeds {limit}.")]
    PackageTooLarge {
        /// Computed length plus girth.
        total: u32,
        /// Largest accepted length plus girth.
        limit: u32,
    },

    /// A physical measurement could not be expressed in whole units.
    #[error("invalid {field} measurement: {value}")]
    InvalidMeasurement {
        /// Name of the measurement (weight, width, ...).
        field: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// No parsed rate option satisfies the requested service.
    #[error("no rate available for service '{service_code}'")]
    NoMatchingRate {
        /// The requested service code.
        service_code: String,
    },
}

impl DomainError {
    /// Creates a package too large error for the given length plus girth.
    #[must_use]
    pub fn package_too_large(total: u32) -> Self {
        Self::PackageTooLarge {
            total,
            limit: crate::domain::value_objects::package_size::OVERSIZE_LIMIT,
        }
    }

    /// Creates an invalid measurement error.
    #[must_use]
    pub fn invalid_measurement(field: &'static str, value: Decimal) -> Self {
        Self::InvalidMeasurement { field, value }
    }

    /// Creates a no matching rate error.
    #[must_use]
    pub fn no_matching_rate(service_code: impl Into<String>) -> Self {
        Self::NoMatchingRate {
            service_code: service_code.into(),
        }
    }

    /// Returns `false`; domain errors are deterministic.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
