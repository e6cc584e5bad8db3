//! # Rate Option
//!
//! One priced carrier service parsed from a rate response.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::entities::rate_option::RateOption;
//! use rust_decimal::Decimal;
//!
//! let option = RateOption::new(1, "Priority Mail", Decimal::new(575, 2));
//! assert_eq!(option.to_string(), "Priority Mail (class 1): 5.75");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quoted rate for one carrier service class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateOption {
    service_class_id: u32,
    service_name: String,
    rate: Decimal,
}

impl RateOption {
    /// Creates a rate option.
    #[must_use]
    pub fn new(service_class_id: u32, service_name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            service_class_id,
            service_name: service_name.into(),
            rate,
        }
    }

    /// Returns the carrier service class id (`0` when unknown).
    #[inline]
    #[must_use]
    pub fn service_class_id(&self) -> u32 {
        self.service_class_id
    }

    /// Returns the carrier's display name for the service.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the rate, including any additional handling charge.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl fmt::Display for RateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (class {}): {}",
            self.service_name, self.service_class_id, self.rate
        )
    }
}
