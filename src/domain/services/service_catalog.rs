//! # Service Option Catalog
//!
//! Read-only table of carrier service classes and their physical
//! eligibility limits.
//!
//! The catalog is built once at startup and shared by reference. A class
//! that is absent from the table is not an error: it means the class is
//! not one the engine can route to a ship method, and parsed rate records
//! for it are dropped.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::services::service_catalog::ServiceOptionCatalog;
//!
//! let catalog = ServiceOptionCatalog::usps();
//! assert_eq!(catalog.lookup(17).map(|p| p.len()), Some(2));
//! assert!(catalog.lookup(999).is_none());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel for a limit that does not apply.
pub const UNLIMITED: Decimal = Decimal::MAX;

/// Physical limits for one box variant of a carrier service class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceEligibilityProfile {
    service_class_id: u32,
    width_limit: Decimal,
    height_limit: Decimal,
    length_limit: Decimal,
    combined_limit: Decimal,
    weight_limit: Decimal,
}

impl ServiceEligibilityProfile {
    /// Creates a profile. Use [`UNLIMITED`] for limits that do not apply.
    #[must_use]
    pub const fn new(
        service_class_id: u32,
        width_limit: Decimal,
        height_limit: Decimal,
        length_limit: Decimal,
        combined_limit: Decimal,
        weight_limit: Decimal,
    ) -> Self {
        Self {
            service_class_id,
            width_limit,
            height_limit,
            length_limit,
            combined_limit,
            weight_limit,
        }
    }

    /// Returns the service class id.
    #[inline]
    #[must_use]
    pub fn service_class_id(&self) -> u32 {
        self.service_class_id
    }

    /// Returns the width limit.
    #[inline]
    #[must_use]
    pub fn width_limit(&self) -> Decimal {
        self.width_limit
    }

    /// Returns the height limit.
    #[inline]
    #[must_use]
    pub fn height_limit(&self) -> Decimal {
        self.height_limit
    }

    /// Returns the length limit.
    #[inline]
    #[must_use]
    pub fn length_limit(&self) -> Decimal {
        self.length_limit
    }

    /// Returns the combined width plus height limit.
    #[inline]
    #[must_use]
    pub fn combined_limit(&self) -> Decimal {
        self.combined_limit
    }

    /// Returns the weight limit in pounds.
    #[inline]
    #[must_use]
    pub fn weight_limit(&self) -> Decimal {
        self.weight_limit
    }

    /// Returns `true` if the profile constrains no dimension individually.
    #[must_use]
    pub fn is_dimensionally_unlimited(&self) -> bool {
        self.width_limit == UNLIMITED
            && self.height_limit == UNLIMITED
            && self.length_limit == UNLIMITED
    }

    /// Returns `true` if a package with these measurements fits this variant.
    ///
    /// The smaller of width and height is compared against the smaller of
    /// the two limits, so a box may be rotated.
    #[must_use]
    pub fn fits(&self, weight: Decimal, width: u32, length: u32, height: u32) -> bool {
        if self.weight_limit < weight {
            return false;
        }

        let narrowest_limit = self.height_limit.min(self.width_limit);
        if narrowest_limit < Decimal::from(width.min(height)) {
            return false;
        }

        if self.length_limit < Decimal::from(length) {
            return false;
        }

        self.combined_limit >= Decimal::from(u64::from(width) + u64::from(height))
    }
}

/// Lookup from carrier service class id to its eligibility profiles.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptionCatalog {
    profiles: HashMap<u32, Vec<ServiceEligibilityProfile>>,
}

impl ServiceOptionCatalog {
    /// Builds a catalog from profiles; profiles sharing a class id are grouped.
    #[must_use]
    pub fn from_profiles(profiles: impl IntoIterator<Item = ServiceEligibilityProfile>) -> Self {
        let mut grouped: HashMap<u32, Vec<ServiceEligibilityProfile>> = HashMap::new();
        for profile in profiles {
            grouped
                .entry(profile.service_class_id)
                .or_default()
                .push(profile);
        }
        Self { profiles: grouped }
    }

    /// The domestic service classes of the USPS rate API.
    #[must_use]
    pub fn usps() -> Self {
        let unlimited_parcel = |class_id| {
            ServiceEligibilityProfile::new(
                class_id,
                UNLIMITED,
                UNLIMITED,
                UNLIMITED,
                Decimal::from(108),
                Decimal::from(70),
            )
        };
        let flat_rate = |class_id, width, height, length| {
            ServiceEligibilityProfile::new(
                class_id,
                width,
                height,
                length,
                UNLIMITED,
                Decimal::from(70),
            )
        };
        let envelope = |class_id| {
            flat_rate(
                class_id,
                Decimal::new(125, 1),
                Decimal::new(95, 1),
                Decimal::new(75, 2),
            )
        };

        Self::from_profiles([
            // Express Mail Hold For Pickup
            unlimited_parcel(2),
            // Express Mail Flat-Rate Envelope Hold For Pickup
            envelope(27),
            // Express Mail
            unlimited_parcel(3),
            // Express Mail Flat-Rate Envelope
            envelope(13),
            // Priority Mail
            unlimited_parcel(1),
            // Priority Mail Flat-Rate Envelope
            envelope(16),
            // Priority Mail Small Flat-Rate Box
            flat_rate(28, Decimal::new(5375, 3), Decimal::new(8625, 3), Decimal::new(1675, 3)),
            // Priority Mail Regular/Medium Flat-Rate Boxes
            flat_rate(17, Decimal::new(11875, 3), Decimal::new(13625, 3), Decimal::new(3375, 3)),
            flat_rate(17, Decimal::from(11), Decimal::new(85, 1), Decimal::new(55, 1)),
            // Priority Mail Large Flat-Rate Box
            flat_rate(22, Decimal::from(12), Decimal::from(12), Decimal::new(55, 1)),
            // Parcel Post
            unlimited_parcel(4),
            // Bound Printed Matter
            unlimited_parcel(5),
            // Media Mail
            unlimited_parcel(6),
            // Library Mail
            unlimited_parcel(7),
        ])
    }

    /// Returns the profiles for a service class, or `None` if the class is
    /// not modelled.
    #[must_use]
    pub fn lookup(&self, service_class_id: u32) -> Option<&[ServiceEligibilityProfile]> {
        self.profiles
            .get(&service_class_id)
            .map(Vec::as_slice)
            .filter(|profiles| !profiles.is_empty())
    }

    /// Returns `true` if the class is modelled.
    #[must_use]
    pub fn contains(&self, service_class_id: u32) -> bool {
        self.lookup(service_class_id).is_some()
    }

    /// Returns the number of modelled service classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if no class is modelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod catalog {
        use super::*;

        #[test]
        fn usps_table_has_thirteen_classes() {
            let catalog = ServiceOptionCatalog::usps();
            assert_eq!(catalog.len(), 13);
            for class_id in [1, 2, 3, 4, 5, 6, 7, 13, 16, 17, 22, 27, 28] {
                assert!(catalog.contains(class_id), "missing class {class_id}");
            }
        }

        #[test]
        fn medium_flat_rate_has_two_variants() {
            let catalog = ServiceOptionCatalog::usps();
            let variants = catalog.lookup(17).unwrap();
            assert_eq!(variants.len(), 2);
            assert_eq!(variants.first().unwrap().width_limit(), Decimal::new(11875, 3));
            assert_eq!(variants.get(1).unwrap().width_limit(), Decimal::from(11));
        }

        #[test]
        fn unknown_class_is_absent() {
            let catalog = ServiceOptionCatalog::usps();
            assert!(catalog.lookup(0).is_none());
            assert!(catalog.lookup(999).is_none());
        }

        #[test]
        fn empty_catalog() {
            let catalog = ServiceOptionCatalog::default();
            assert!(catalog.is_empty());
            assert!(catalog.lookup(1).is_none());
        }
    }

    mod eligibility {
        use super::*;

        fn priority_mail() -> ServiceEligibilityProfile {
            *ServiceOptionCatalog::usps().lookup(1).unwrap().first().unwrap()
        }

        fn large_flat_rate_box() -> ServiceEligibilityProfile {
            *ServiceOptionCatalog::usps().lookup(22).unwrap().first().unwrap()
        }

        #[test]
        fn parcel_profile_is_dimensionally_unlimited() {
            assert!(priority_mail().is_dimensionally_unlimited());
            assert!(!large_flat_rate_box().is_dimensionally_unlimited());
        }

        #[test]
        fn parcel_fits_within_combined_limit() {
            assert!(priority_mail().fits(Decimal::from(10), 40, 60, 40));
        }

        #[test]
        fn parcel_rejects_combined_overflow() {
            assert!(!priority_mail().fits(Decimal::from(10), 60, 10, 50));
        }

        #[test]
        fn overweight_rejected() {
            assert!(!priority_mail().fits(Decimal::new(705, 1), 1, 1, 1));
        }

        #[test]
        fn flat_rate_box_checks_narrowest_side_and_length() {
            let profile = large_flat_rate_box();
            assert!(profile.fits(Decimal::from(5), 12, 5, 30));
            assert!(!profile.fits(Decimal::from(5), 13, 5, 13));
            assert!(!profile.fits(Decimal::from(5), 10, 6, 10));
        }
    }
}
