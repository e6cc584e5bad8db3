//! # Shipment
//!
//! A shipment to be rated and the aggregated totals of its line items.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::entities::shipment::{LineItem, Shipment};
//! use carrier_rate_quote::domain::value_objects::ShipmentVersion;
//! use rust_decimal::Decimal;
//!
//! let shipment = Shipment::new(ShipmentVersion::new_v4(), "10001", "94105", "US")
//!     .with_item(LineItem::new("SKU-1", 2, Decimal::ONE, Decimal::new(6, 0), Decimal::new(8, 0), Decimal::new(4, 0)));
//!
//! assert!(shipment.is_domestic());
//! assert_eq!(shipment.items().len(), 1);
//! ```

use crate::domain::value_objects::ShipmentVersion;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Destination country code treated as domestic.
pub const DOMESTIC_COUNTRY_CODE: &str = "US";

/// One line of a shipment with per-unit physical measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    sku: String,
    quantity: u32,
    weight: Decimal,
    width: Decimal,
    length: Decimal,
    height: Decimal,
}

impl LineItem {
    /// Creates a line item. Measurements are per unit.
    #[must_use]
    pub fn new(
        sku: impl Into<String>,
        quantity: u32,
        weight: Decimal,
        width: Decimal,
        length: Decimal,
        height: Decimal,
    ) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            weight,
            width,
            length,
            height,
        }
    }

    /// Returns the SKU.
    #[inline]
    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the per-unit weight in pounds.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the per-unit width in inches.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Decimal {
        self.width
    }

    /// Returns the per-unit length in inches.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Decimal {
        self.length
    }

    /// Returns the per-unit height in inches.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Decimal {
        self.height
    }
}

/// A shipment awaiting a rate quote.
///
/// Immutable for the duration of a quote request. Any change to its
/// contents must come with a new [`ShipmentVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    version: ShipmentVersion,
    origin_postal_code: String,
    destination_postal_code: String,
    destination_country_code: String,
    items: Vec<LineItem>,
}

impl Shipment {
    /// Creates an empty shipment.
    #[must_use]
    pub fn new(
        version: ShipmentVersion,
        origin_postal_code: impl Into<String>,
        destination_postal_code: impl Into<String>,
        destination_country_code: impl Into<String>,
    ) -> Self {
        Self {
            version,
            origin_postal_code: origin_postal_code.into(),
            destination_postal_code: destination_postal_code.into(),
            destination_country_code: destination_country_code.into(),
            items: Vec::new(),
        }
    }

    /// Adds a line item.
    #[must_use]
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Returns the version identifier.
    #[inline]
    #[must_use]
    pub fn version(&self) -> ShipmentVersion {
        self.version
    }

    /// Returns the origin postal code.
    #[inline]
    #[must_use]
    pub fn origin_postal_code(&self) -> &str {
        &self.origin_postal_code
    }

    /// Returns the destination postal code.
    #[inline]
    #[must_use]
    pub fn destination_postal_code(&self) -> &str {
        &self.destination_postal_code
    }

    /// Returns the destination country code.
    #[inline]
    #[must_use]
    pub fn destination_country_code(&self) -> &str {
        &self.destination_country_code
    }

    /// Returns the line items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns `true` when the destination is inside the carrier's home country.
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        self.destination_country_code
            .eq_ignore_ascii_case(DOMESTIC_COUNTRY_CODE)
    }
}

/// Aggregated weight and dimensions of every line item in a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineItemTotals {
    /// Total weight in pounds.
    pub weight: Decimal,
    /// Total width in inches.
    pub width: Decimal,
    /// Total length in inches.
    pub length: Decimal,
    /// Total height in inches.
    pub height: Decimal,
}

impl LineItemTotals {
    /// Creates totals from the four scalar measurements.
    #[must_use]
    pub fn new(weight: Decimal, width: Decimal, length: Decimal, height: Decimal) -> Self {
        Self {
            weight,
            width,
            length,
            height,
        }
    }
}
