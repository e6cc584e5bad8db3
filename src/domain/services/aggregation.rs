//! # Shipment Aggregation
//!
//! Port for collapsing a shipment's line items into package totals.

use crate::domain::entities::{LineItemTotals, Shipment};
use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use std::fmt;

/// Computes the aggregated weight and dimensions of a shipment.
pub trait ShipmentAggregator: Send + Sync + fmt::Debug {
    /// Returns the totals for every line item in the shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` if a total cannot be
    /// represented.
    fn aggregate(&self, shipment: &Shipment) -> DomainResult<LineItemTotals>;
}

/// Sums each measurement over all line items, scaled by quantity.
///
/// Treats the shipment as one stacked package: dimensions add up the same
/// way weight does.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummingAggregator;

impl ShipmentAggregator for SummingAggregator {
    fn aggregate(&self, shipment: &Shipment) -> DomainResult<LineItemTotals> {
        shipment
            .items()
            .iter()
            .try_fold(LineItemTotals::default(), |totals, item| {
                let quantity = Decimal::from(item.quantity());
                Ok(LineItemTotals::new(
                    accumulate(totals.weight, item.weight(), quantity, "weight")?,
                    accumulate(totals.width, item.width(), quantity, "width")?,
                    accumulate(totals.length, item.length(), quantity, "length")?,
                    accumulate(totals.height, item.height(), quantity, "height")?,
                ))
            })
    }
}

#[inline]
fn accumulate(
    total: Decimal,
    value: Decimal,
    quantity: Decimal,
    field: &'static str,
) -> DomainResult<Decimal> {
    value
        .checked_mul(quantity)
        .and_then(|scaled| total.checked_add(scaled))
        .ok_or_else(|| DomainError::invalid_measurement(field, value))
}
