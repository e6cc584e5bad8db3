//! # Domain Entities
//!
//! - [`Shipment`]: the package being rated, with its [`LineItem`]s
//! - [`LineItemTotals`]: aggregated weight and dimensions
//! - [`ShipMethod`]: the requested carrier service
//! - [`RateOption`]: one priced service from a carrier response

pub mod rate_option;
pub mod ship_method;
pub mod shipment;

pub use rate_option::RateOption;
pub use ship_method::ShipMethod;
pub use shipment::{DOMESTIC_COUNTRY_CODE, LineItem, LineItemTotals, Shipment};
