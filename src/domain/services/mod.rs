//! # Domain Services
//!
//! Logic that does not belong to a single entity or value object.
//!
//! ## Services
//!
//! - [`ServiceOptionCatalog`]: carrier service classes and their limits
//! - [`RateSelector`]: requested-service rate selection with flat-rate tie-break
//! - [`ShipmentAggregator`]: line item totals

pub mod aggregation;
pub mod rate_selector;
pub mod service_catalog;

pub use aggregation::{ShipmentAggregator, SummingAggregator};
pub use rate_selector::{RateSelector, decode_entities};
pub use service_catalog::{ServiceEligibilityProfile, ServiceOptionCatalog, UNLIMITED};
