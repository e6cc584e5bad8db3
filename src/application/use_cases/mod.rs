//! # Use Cases
//!
//! - [`quote_shipment`]: quote one ship method for one shipment

pub mod quote_shipment;

pub use quote_shipment::{QuoteShipmentUseCase, ShipmentRateQuote};
