//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ShipMethodKey`], [`ProviderKey`], [`ProviderSettingsKey`]
//! - [`ShipmentVersion`]: changes with shipment contents
//!
//! ## Measurement
//!
//! - [`PackageSize`]: dimensional size tier
//! - [`SplitWeight`]: weight rounded up to whole pounds, split into pounds and ounces
//! - [`ceil_units`]: whole-unit rounding for dimensions

pub mod arithmetic;
pub mod ids;
pub mod package_size;

pub use arithmetic::{OUNCES_PER_POUND, SplitWeight, ceil_units};
pub use ids::{ProviderKey, ProviderSettingsKey, ShipMethodKey, ShipmentVersion};
pub use package_size::PackageSize;
