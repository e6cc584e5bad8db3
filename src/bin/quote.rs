//! # Quote CLI
//!
//! Quotes a single-item shipment against one carrier service from the
//! command line.
//!
//! ```text
//! quote --origin 10001 --destination 94105 --service "Priority Mail" \
//!       --weight 2.3 --width 10 --length 12 --height 4
//! ```

use anyhow::Context;
use carrier_rate_quote::config::QuoteConfig;
use carrier_rate_quote::domain::value_objects::{
    ProviderKey, ProviderSettingsKey, ShipMethodKey, ShipmentVersion,
};
use carrier_rate_quote::infrastructure::cache::{InMemoryRuntimeCache, QuoteCache};
use carrier_rate_quote::infrastructure::carriers::HttpRateTransport;
use carrier_rate_quote::{LineItem, QuoteShipmentUseCase, ShipMethod, Shipment};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Quotes a shipment against a carrier rate API.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The configuration file. Missing files are skipped.
    #[arg(long, value_name = "CONFIG", env = "RATE_QUOTE_CONFIG", default_value = "quote.toml")]
    config: PathBuf,
    /// Origin postal code.
    #[arg(long, value_name = "ZIP")]
    origin: String,
    /// Destination postal code.
    #[arg(long, value_name = "ZIP")]
    destination: String,
    /// Destination country code.
    #[arg(long, value_name = "COUNTRY", default_value = "US")]
    country: String,
    /// Service code to select, matched against carrier service names.
    #[arg(long, value_name = "SERVICE")]
    service: String,
    /// Weight in pounds.
    #[arg(long, value_name = "POUNDS")]
    weight: Decimal,
    /// Width in inches.
    #[arg(long, value_name = "INCHES")]
    width: Decimal,
    /// Length in inches.
    #[arg(long, value_name = "INCHES")]
    length: Decimal,
    /// Height in inches.
    #[arg(long, value_name = "INCHES")]
    height: Decimal,
}

impl Args {
    async fn run(self) -> anyhow::Result<()> {
        let config = QuoteConfig::load(Some(&self.config))
            .with_context(|| format!("loading configuration from {}", self.config.display()))?;

        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
            )
            .init();

        let transport = HttpRateTransport::new(&config.carrier.endpoint, config.carrier.timeout_ms)
            .context("creating carrier transport")?;
        let cache = QuoteCache::new(Arc::new(InMemoryRuntimeCache::new()));
        let method = ShipMethod::new(
            ShipMethodKey::new_v4(),
            ProviderKey::new_v4(),
            &self.service,
            &self.service,
        );
        let use_case = QuoteShipmentUseCase::new(
            method,
            ProviderSettingsKey::new_v4(),
            config.carrier,
            Arc::new(transport),
            Arc::new(cache),
        );

        let shipment = Shipment::new(
            ShipmentVersion::new_v4(),
            self.origin,
            self.destination,
            self.country,
        )
        .with_item(LineItem::new(
            "cli",
            1,
            self.weight,
            self.width,
            self.length,
            self.height,
        ));

        let quote = use_case.quote_shipment(&shipment).await?;
        info!(size = %quote.package_size(), "quote complete");
        println!("{}: {}", quote.service_code(), quote.rate());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    Args::parse().run().await
}
