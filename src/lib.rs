//! # Carrier Rate Quote
//!
//! Rate-quotation engine for a postal carrier's domestic rate API.
//!
//! Given a shipment, the engine classifies the package by dimensional
//! size, encodes a rate request, parses the carrier's streaming XML
//! response into rate options and selects the single rate matching the
//! requested service.
//!
//! # Layers
//!
//! - [`domain`]: package classification, service catalog, rate selection
//! - [`application`]: the [`QuoteShipmentUseCase`] entry point
//! - [`infrastructure`]: carrier wire codec, HTTP transport, quote cache
//! - [`config`]: settings loading
//!
//! # Examples
//!
//! ```ignore
//! use carrier_rate_quote::QuoteShipmentUseCase;
//!
//! let result = use_case.quote_shipment(&shipment).await;
//! match result {
//!     Ok(quote) => println!("rate: {}", quote.rate()),
//!     Err(failure) => eprintln!("{failure}"),
//! }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::error::{QuoteError, QuoteFailure, QuoteResult};
pub use application::use_cases::quote_shipment::{QuoteShipmentUseCase, ShipmentRateQuote};
pub use domain::entities::{LineItem, LineItemTotals, RateOption, ShipMethod, Shipment};
pub use domain::value_objects::PackageSize;
