//! # USPS Rate API
//!
//! Request building, field encoding and response parsing for the USPS
//! `RateV4` API.
//!
//! - [`request`]: [`RateRequestBuilder`] and the request document
//! - [`encoding`]: the form transform applied to the `XML` field
//! - [`response`]: [`RateResponseParser`]

pub mod encoding;
pub mod request;
pub mod response;

pub use encoding::form_urlencode;
pub use request::{RATE_API, RateRequest, RateRequestBuilder, RequestRoot};
pub use response::{RateResponseParser, RecordOutcome, Records, SkipReason};

/// Production rate API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://secure.shippingapis.com/ShippingAPI.dll";
