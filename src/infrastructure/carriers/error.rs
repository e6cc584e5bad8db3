//! # Carrier Errors
//!
//! Error types for carrier rate API operations.
//!
//! Covers transport failures reaching the carrier endpoint, errors the
//! carrier reports inside an otherwise well-formed response, and payloads
//! that cannot be produced or understood.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::infrastructure::carriers::error::CarrierError;
//!
//! let error = CarrierError::timeout("Request timed out after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = CarrierError::rejected("Error Desc: Invalid Zip Code");
//! assert!(!error.is_retryable());
//! assert!(error.is_reported_by_carrier());
//! ```

use thiserror::Error;

/// Error type for carrier rate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials were refused.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The endpoint refused the request as malformed.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The carrier answered with an `Error` element.
    #[error("carrier error returned: {message}")]
    Rejected {
        /// Help context and description reported by the carrier.
        message: String,
    },

    /// Response could not be read as the expected document.
    #[error("carrier protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Request could not be produced locally.
    #[error("carrier internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a carrier-reported error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient.
    ///
    /// The quote path never retries on its own; this only classifies.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if the request itself was at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Authentication { .. }
        )
    }

    /// Returns true if the carrier answered with an `Error` element.
    #[must_use]
    pub fn is_reported_by_carrier(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;
