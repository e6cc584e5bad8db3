//! # Carrier Adapters
//!
//! Outbound integration with carrier rate APIs.
//!
//! ## Port
//!
//! - [`RateTransport`]: delivers an encoded request and returns the raw response
//!
//! ## Implementations
//!
//! - [`HttpRateTransport`]: `reqwest`-backed transport
//! - [`usps`]: USPS request builder and response parser

pub mod error;
pub mod http_client;
pub mod traits;
pub mod usps;

pub use error::{CarrierError, CarrierResult};
pub use http_client::{HttpClient, HttpRateTransport};
pub use traits::RateTransport;
