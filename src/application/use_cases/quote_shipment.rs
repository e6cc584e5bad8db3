//! # Quote Shipment Use Case
//!
//! Quotes one ship method for one shipment.
//!
//! # Flow
//!
//! 1. Aggregate line items into package totals
//! 2. Build the rate request and classify the package
//! 3. Fetch and parse rate options, once per shipment version
//! 4. Select the rate for the method's service code
//!
//! Any failure along the way is returned as a [`QuoteFailure`]; nothing
//! escapes as a panic or an untyped error.
//!
//! # Examples
//!
//! ```ignore
//! use carrier_rate_quote::application::use_cases::quote_shipment::QuoteShipmentUseCase;
//!
//! let use_case = QuoteShipmentUseCase::new(method, settings_key, settings, transport, cache);
//! let quote = use_case.quote_shipment(&shipment).await?;
//! println!("{}", quote.rate());
//! ```

use crate::application::error::{QuoteError, QuoteFailure, QuoteResult};
use crate::config::CarrierSettings;
use crate::domain::entities::{RateOption, ShipMethod, Shipment};
use crate::domain::services::{
    RateSelector, ServiceOptionCatalog, ShipmentAggregator, SummingAggregator,
};
use crate::domain::value_objects::{PackageSize, ProviderSettingsKey, ShipMethodKey};
use crate::infrastructure::cache::{CacheKey, QuoteCache};
use crate::infrastructure::carriers::error::CarrierResult;
use crate::infrastructure::carriers::traits::RateTransport;
use crate::infrastructure::carriers::usps::{RateRequest, RateRequestBuilder, RateResponseParser};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Selected rate for a ship method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRateQuote {
    ship_method_key: ShipMethodKey,
    service_code: String,
    package_size: PackageSize,
    rate: Decimal,
}

impl ShipmentRateQuote {
    /// Creates a quote.
    #[must_use]
    pub fn new(
        ship_method_key: ShipMethodKey,
        service_code: impl Into<String>,
        package_size: PackageSize,
        rate: Decimal,
    ) -> Self {
        Self {
            ship_method_key,
            service_code: service_code.into(),
            package_size,
            rate,
        }
    }

    /// Returns the quoted ship method.
    #[inline]
    #[must_use]
    pub fn ship_method_key(&self) -> ShipMethodKey {
        self.ship_method_key
    }

    /// Returns the requested service code.
    #[inline]
    #[must_use]
    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    /// Returns the package size tier used for selection.
    #[inline]
    #[must_use]
    pub fn package_size(&self) -> PackageSize {
        self.package_size
    }

    /// Returns the selected rate.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

/// Use case for quoting a shipment against one ship method.
#[derive(Debug)]
pub struct QuoteShipmentUseCase {
    ship_method: ShipMethod,
    settings_key: ProviderSettingsKey,
    settings: CarrierSettings,
    parser: RateResponseParser,
    transport: Arc<dyn RateTransport>,
    aggregator: Arc<dyn ShipmentAggregator>,
    cache: Arc<QuoteCache>,
}

impl QuoteShipmentUseCase {
    /// Creates a use case with the USPS catalog and summing aggregation.
    #[must_use]
    pub fn new(
        ship_method: ShipMethod,
        settings_key: ProviderSettingsKey,
        settings: CarrierSettings,
        transport: Arc<dyn RateTransport>,
        cache: Arc<QuoteCache>,
    ) -> Self {
        let parser =
            RateResponseParser::new(Arc::new(ServiceOptionCatalog::usps()), settings.handling_charge());
        Self {
            ship_method,
            settings_key,
            settings,
            parser,
            transport,
            aggregator: Arc::new(SummingAggregator),
            cache,
        }
    }

    /// Replaces the service catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<ServiceOptionCatalog>) -> Self {
        self.parser = RateResponseParser::new(catalog, self.settings.handling_charge());
        self
    }

    /// Replaces the line item aggregator.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Arc<dyn ShipmentAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Returns the ship method being quoted.
    #[must_use]
    pub fn ship_method(&self) -> &ShipMethod {
        &self.ship_method
    }

    /// Quotes the shipment.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteFailure`] wrapping the first failure: an oversized
    /// package, a transport or carrier error, or no matching service.
    #[instrument(skip(self, shipment), fields(
        method = %self.ship_method.name(),
        service_code = %self.ship_method.service_code(),
        version = %shipment.version()
    ))]
    pub async fn quote_shipment(&self, shipment: &Shipment) -> QuoteResult {
        match self.try_quote(shipment).await {
            Ok(quote) => {
                info!(rate = %quote.rate(), size = %quote.package_size(), "shipment quoted");
                Ok(quote)
            }
            Err(cause) => {
                warn!(error = %cause, retryable = cause.is_retryable(), "shipment quote failed");
                Err(QuoteFailure::new(cause))
            }
        }
    }

    async fn try_quote(&self, shipment: &Shipment) -> Result<ShipmentRateQuote, QuoteError> {
        let totals = self.aggregator.aggregate(shipment)?;
        let request = RateRequestBuilder::build(shipment, &totals, &self.settings.credentials())?;

        let key = CacheKey::new(
            self.ship_method.provider_key(),
            self.settings_key,
            shipment.version(),
        );
        let options = self
            .cache
            .get_or_compute(&key, || self.fetch_options(&request))
            .await?;

        let rate = RateSelector::select(&options, self.ship_method.service_code(), request.size())?;

        Ok(ShipmentRateQuote::new(
            self.ship_method.key(),
            self.ship_method.service_code(),
            request.size(),
            rate,
        ))
    }

    async fn fetch_options(&self, request: &RateRequest) -> CarrierResult<Vec<RateOption>> {
        let body = request.to_form_body()?;
        let raw = self.transport.post(body).await?;
        self.parser.parse(&raw)
    }
}
