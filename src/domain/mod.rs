//! # Domain Layer
//!
//! Carrier-independent shipping concepts and the rules that act on them.
//!
//! - [`value_objects`]: identifiers, dimensional size tiers, rounding
//! - [`entities`]: shipments, ship methods, rate options
//! - [`services`]: service catalog and rate selection
//! - [`errors`]: domain rule violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
