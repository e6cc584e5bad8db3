//! # Identifiers
//!
//! UUID-based identifiers for the entities that take part in a quote.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::value_objects::ids::ShipmentVersion;
//!
//! let v1 = ShipmentVersion::new_v4();
//! let v2 = ShipmentVersion::new_v4();
//! assert_ne!(v1, v2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates an identifier from an existing UUID.
            #[inline]
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a random identifier.
            #[inline]
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner UUID.
            #[inline]
            #[must_use]
            pub const fn get(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies a configured ship method.
    ShipMethodKey
);

uuid_id!(
    /// Identifies the shipping gateway provider a ship method belongs to.
    ProviderKey
);

uuid_id!(
    /// Identifies a provider's stored settings (credentials, charges).
    ProviderSettingsKey
);

uuid_id!(
    /// Changes whenever the contents of a shipment change.
    ShipmentVersion
);
