//! # Measurement Rounding
//!
//! Conversion of fractional physical totals into the whole units the
//! carrier accepts.
//!
//! Partial units always round up. Rounding down would under-state a
//! package's billed dimensional class.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::value_objects::arithmetic::{ceil_units, SplitWeight};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(ceil_units(Decimal::new(101, 1), "width").unwrap(), 11);
//!
//! // 2.3 lb is billed as 3 lb
//! let weight = SplitWeight::from_pounds(Decimal::new(23, 1)).unwrap();
//! assert_eq!((weight.pounds(), weight.ounces()), (3, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-units per whole weight unit.
pub const OUNCES_PER_POUND: u32 = 16;

/// Rounds a non-negative measurement up to the next whole unit.
///
/// # Errors
///
/// Returns `DomainError::InvalidMeasurement` if the value is negative or
/// does not fit in a `u32` after rounding.
pub fn ceil_units(value: Decimal, field: &'static str) -> DomainResult<u32> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::invalid_measurement(field, value));
    }

    value
        .ceil()
        .to_u32()
        .ok_or_else(|| DomainError::invalid_measurement(field, value))
}

/// A weight split into whole pounds and remaining ounces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SplitWeight {
    pounds: u32,
    ounces: u32,
}

impl SplitWeight {
    /// Splits a weight in pounds, rounding up to the next whole pound
    /// first. The ounce part of a rounded weight is always zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` if the weight is negative
    /// or too large to express in ounces.
    pub fn from_pounds(weight: Decimal) -> DomainResult<Self> {
        let total_ounces = ceil_units(weight, "weight")?
            .checked_mul(OUNCES_PER_POUND)
            .ok_or_else(|| DomainError::invalid_measurement("weight", weight))?;

        Ok(Self {
            pounds: total_ounces / OUNCES_PER_POUND,
            ounces: total_ounces % OUNCES_PER_POUND,
        })
    }

    /// Returns the whole pounds.
    #[inline]
    #[must_use]
    pub fn pounds(&self) -> u32 {
        self.pounds
    }

    /// Returns the remaining ounces (`0..16`).
    #[inline]
    #[must_use]
    pub fn ounces(&self) -> u32 {
        self.ounces
    }
}

impl fmt::Display for SplitWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb {} oz", self.pounds, self.ounces)
    }
}
