//! # Ship Method
//!
//! A configured way of shipping, bound to one carrier service.

use crate::domain::value_objects::{ProviderKey, ShipMethodKey};
use serde::{Deserialize, Serialize};

/// A ship method offered at checkout.
///
/// `service_code` is matched as a substring against the carrier's
/// service names (for example `"Priority Mail"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipMethod {
    key: ShipMethodKey,
    provider_key: ProviderKey,
    name: String,
    service_code: String,
}

impl ShipMethod {
    /// Creates a ship method.
    #[must_use]
    pub fn new(
        key: ShipMethodKey,
        provider_key: ProviderKey,
        name: impl Into<String>,
        service_code: impl Into<String>,
    ) -> Self {
        Self {
            key,
            provider_key,
            name: name.into(),
            service_code: service_code.into(),
        }
    }

    /// Returns the ship method key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> ShipMethodKey {
        self.key
    }

    /// Returns the key of the provider this method belongs to.
    #[inline]
    #[must_use]
    pub fn provider_key(&self) -> ProviderKey {
        self.provider_key
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested carrier service code.
    #[inline]
    #[must_use]
    pub fn service_code(&self) -> &str {
        &self.service_code
    }
}
