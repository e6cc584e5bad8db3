//! # Configuration
//!
//! Carrier settings and process configuration.
//!
//! Configuration is layered with the `config` crate: an optional TOML file,
//! then environment variables prefixed with `RATE_QUOTE_` using `__` as
//! the nesting separator, e.g. `RATE_QUOTE_CARRIER__USERNAME`.
//!
//! ```toml
//! log_filter = "info,carrier_rate_quote=debug"
//!
//! [carrier]
//! username = "123EXAMP4567"
//! password = "secret"
//! additional_handling_charge = "1.50"
//! timeout_ms = 5000
//! ```
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::config::QuoteConfig;
//! use rust_decimal::Decimal;
//!
//! let config = QuoteConfig::from_toml(
//!     r#"
//!     [carrier]
//!     username = "user"
//!     password = "secret"
//!     additional_handling_charge = "1.50"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.carrier.handling_charge(), Some(Decimal::new(150, 2)));
//! assert!(!format!("{:?}", config.carrier).contains("secret"));
//! ```

use crate::infrastructure::carriers::usps::DEFAULT_ENDPOINT;
use config::{Config, ConfigError, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RATE_QUOTE";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const REDACTED: &str = "[redacted]";

/// Account credentials embedded in every rate request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierCredentials {
    username: String,
    password: String,
}

impl CarrierCredentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the account user id.
    #[inline]
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    #[inline]
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for CarrierCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierCredentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Settings of one carrier gateway provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSettings {
    /// Account user id.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Flat amount added to every quoted rate, as entered by the merchant.
    #[serde(default)]
    pub additional_handling_charge: Option<String>,
    /// Rate API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl CarrierSettings {
    /// Creates settings with the default endpoint and timeout.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            additional_handling_charge: None,
            endpoint: default_endpoint(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the additional handling charge.
    #[must_use]
    pub fn with_handling_charge(mut self, charge: impl Into<String>) -> Self {
        self.additional_handling_charge = Some(charge.into());
        self
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the credentials for request building.
    #[must_use]
    pub fn credentials(&self) -> CarrierCredentials {
        CarrierCredentials::new(&self.username, &self.password)
    }

    /// Parses the handling charge.
    ///
    /// Blank or unparseable input yields `None`.
    #[must_use]
    pub fn handling_charge(&self) -> Option<Decimal> {
        let raw = self.additional_handling_charge.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<Decimal>() {
            Ok(charge) => Some(charge),
            Err(e) => {
                warn!(charge = raw, error = %e, "ignoring unparseable handling charge");
                None
            }
        }
    }
}

impl fmt::Debug for CarrierSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierSettings")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("additional_handling_charge", &self.additional_handling_charge)
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Carrier account and endpoint.
    pub carrier: CarrierSettings,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl QuoteConfig {
    /// Loads configuration from an optional file and the environment.
    ///
    /// A missing file is not an error; environment values override it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or required keys
    /// are missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from TOML text only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is invalid or required keys are
    /// missing.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
