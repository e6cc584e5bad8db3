//! # Package Size
//!
//! Dimensional size tier of a package.
//!
//! The tier is derived from length plus girth, where girth is
//! `2 * height + 2 * width`. It is independent of weight and feeds both
//! the rate request (`Size` element) and the medium/large flat-rate
//! tie-break during selection.
//!
//! | Length + girth | Tier       |
//! |----------------|------------|
//! | `<= 84`        | `REGULAR`  |
//! | `85..=108`     | `LARGE`    |
//! | `109..=130`    | `OVERSIZE` |
//! | `> 130`        | rejected   |
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::value_objects::package_size::PackageSize;
//!
//! let size = PackageSize::classify(12, 10, 8).unwrap();
//! assert_eq!(size, PackageSize::Regular);
//! assert_eq!(size.to_string(), "REGULAR");
//!
//! assert!(PackageSize::classify(100, 10, 10).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest length plus girth classified as `REGULAR`.
pub const REGULAR_LIMIT: u32 = 84;

/// Largest length plus girth classified as `LARGE`.
pub const LARGE_LIMIT: u32 = 108;

/// Largest length plus girth the carrier will rate.
pub const OVERSIZE_LIMIT: u32 = 130;

/// Returns `2 * height + 2 * width`.
#[inline]
#[must_use]
pub fn girth(width: u32, height: u32) -> u64 {
    2 * u64::from(height) + 2 * u64::from(width)
}

/// Returns length plus girth.
#[inline]
#[must_use]
pub fn length_plus_girth(length: u32, width: u32, height: u32) -> u64 {
    girth(width, height) + u64::from(length)
}

/// Dimensional size tier of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
#[derive(Default)]
pub enum PackageSize {
    /// Length plus girth up to 84.
    #[default]
    Regular = 0,
    /// Length plus girth above 84, up to 108.
    Large = 1,
    /// Length plus girth above 108, up to 130.
    Oversize = 2,
}

impl PackageSize {
    /// Classifies a package from its whole-unit dimensions.
    ///
    /// Dimensions are expected to be rounded up from fractional units
    /// before this call.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PackageTooLarge` if length plus girth
    /// exceeds [`OVERSIZE_LIMIT`].
    pub fn classify(length: u32, width: u32, height: u32) -> DomainResult<Self> {
        let total = length_plus_girth(length, width, height);

        if total <= u64::from(REGULAR_LIMIT) {
            Ok(Self::Regular)
        } else if total <= u64::from(LARGE_LIMIT) {
            Ok(Self::Large)
        } else if total <= u64::from(OVERSIZE_LIMIT) {
            Ok(Self::Oversize)
        } else {
            Err(DomainError::package_too_large(
                u32::try_from(total).unwrap_or(u32::MAX),
            ))
        }
    }

    /// Returns `true` if this is the regular tier.
    #[inline]
    #[must_use]
    pub const fn is_regular(self) -> bool {
        matches!(self, Self::Regular)
    }

    /// Returns the value carried in the request `Size` element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Large => "LARGE",
            Self::Oversize => "OVERSIZE",
        }
    }
}

impl fmt::Display for PackageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
