//! End-to-end quoting against a mocked carrier endpoint.

#![allow(clippy::unwrap_used)]

use carrier_rate_quote::config::CarrierSettings;
use carrier_rate_quote::domain::value_objects::{
    ProviderKey, ProviderSettingsKey, ShipMethodKey, ShipmentVersion,
};
use carrier_rate_quote::infrastructure::cache::{InMemoryRuntimeCache, QuoteCache};
use carrier_rate_quote::infrastructure::carriers::{CarrierError, HttpRateTransport};
use carrier_rate_quote::{LineItem, PackageSize, QuoteError, QuoteShipmentUseCase, ShipMethod, Shipment};
use rust_decimal::Decimal;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RATES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RateV4Response>
  <Package ID="0">
    <ZipOrigination>10001</ZipOrigination>
    <ZipDestination>94105</ZipDestination>
    <Pounds>3</Pounds>
    <Ounces>0</Ounces>
    <Size>REGULAR</Size>
    <Machinable>FALSE</Machinable>
    <Zone>8</Zone>
    <Postage CLASSID="3">
      <MailService>Priority Mail Express 1-Day&amp;lt;sup&amp;gt;&amp;#8482;&amp;lt;/sup&amp;gt;</MailService>
      <Rate>42.50</Rate>
    </Postage>
    <Postage CLASSID="1">
      <MailService>Priority Mail 2-Day&amp;lt;sup&amp;gt;&amp;#8482;&amp;lt;/sup&amp;gt;</MailService>
      <Rate>12.40</Rate>
    </Postage>
    <Postage CLASSID="17">
      <MailService>Priority Mail Medium Flat Rate Box</MailService>
      <Rate>15.50</Rate>
    </Postage>
    <Postage CLASSID="22">
      <MailService>Priority Mail Large Flat Rate Box</MailService>
      <Rate>21.90</Rate>
    </Postage>
    <Postage CLASSID="1058">
      <MailService>USPS Ground Advantage</MailService>
      <Rate>9.10</Rate>
    </Postage>
  </Package>
</RateV4Response>"#;

fn shipment(length: i64) -> Shipment {
    Shipment::new(ShipmentVersion::new_v4(), "10001", "94105", "US").with_item(LineItem::new(
        "BOOK-1",
        1,
        Decimal::new(23, 1),
        Decimal::from(8),
        Decimal::from(length),
        Decimal::from(6),
    ))
}

fn use_case(server: &MockServer, service_code: &str, settings: CarrierSettings) -> QuoteShipmentUseCase {
    let endpoint = format!("{}/ShippingAPI.dll", server.uri());
    let settings = settings.with_endpoint(&endpoint).with_timeout_ms(2000);
    let transport = HttpRateTransport::new(&settings.endpoint, settings.timeout_ms).unwrap();

    QuoteShipmentUseCase::new(
        ShipMethod::new(
            ShipMethodKey::new_v4(),
            ProviderKey::new_v4(),
            service_code,
            service_code,
        ),
        ProviderSettingsKey::new_v4(),
        settings,
        Arc::new(transport),
        Arc::new(QuoteCache::new(Arc::new(InMemoryRuntimeCache::new()))),
    )
}

async fn mount_rates(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/ShippingAPI.dll"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("API=RateV4&XML=&#60;RateV4Request+USERID&#61;&#34;user&#34;"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RATES))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn quotes_service_with_trademark_markup() {
    let server = MockServer::start().await;
    mount_rates(&server, 1).await;

    let uc = use_case(&server, "Priority Mail 2-Day", CarrierSettings::new("user", "pw"));
    let quote = uc.quote_shipment(&shipment(12)).await.unwrap();

    assert_eq!(quote.rate(), Decimal::new(1240, 2));
}

#[tokio::test]
async fn flat_rate_tie_break_follows_package_size() {
    let server = MockServer::start().await;
    mount_rates(&server, 2).await;

    let uc = use_case(&server, "Flat Rate Box", CarrierSettings::new("user", "pw"));

    let regular = uc.quote_shipment(&shipment(12)).await.unwrap();
    assert_eq!(regular.package_size(), PackageSize::Regular);
    assert_eq!(regular.rate(), Decimal::new(1550, 2));

    // 60 + 2*6 + 2*8 = 88
    let large = uc.quote_shipment(&shipment(60)).await.unwrap();
    assert_eq!(large.package_size(), PackageSize::Large);
    assert_eq!(large.rate(), Decimal::new(2190, 2));
}

#[tokio::test]
async fn handling_charge_and_cache() {
    let server = MockServer::start().await;
    mount_rates(&server, 1).await;

    let uc = use_case(
        &server,
        "Priority Mail Express",
        CarrierSettings::new("user", "pw").with_handling_charge("2.25"),
    );
    let shipment = shipment(12);

    let first = uc.quote_shipment(&shipment).await.unwrap();
    let second = uc.quote_shipment(&shipment).await.unwrap();

    assert_eq!(first.rate(), Decimal::new(4475, 2));
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_class_is_not_offered() {
    let server = MockServer::start().await;
    mount_rates(&server, 1).await;

    let uc = use_case(&server, "Ground Advantage", CarrierSettings::new("user", "pw"));
    let failure = uc.quote_shipment(&shipment(12)).await.unwrap_err();

    assert!(failure.cause().is_no_match());
}

#[tokio::test]
async fn carrier_error_document_fails_quote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\"?><Error><Number>80040B1A</Number>\
             <Description>Authorization failure.</Description>\
             <Source>USPSCOM::DoAuth</Source><HelpContext>1000440</HelpContext></Error>",
        ))
        .mount(&server)
        .await;

    let uc = use_case(&server, "Priority Mail", CarrierSettings::new("user", "pw"));
    let failure = uc.quote_shipment(&shipment(12)).await.unwrap_err();

    assert_eq!(
        failure.cause(),
        &QuoteError::Carrier(CarrierError::rejected(
            "USPS Help Context: 1000440, Error Desc: Authorization failure."
        ))
    );
    assert!(failure
        .to_string()
        .ends_with("Please contact your administrator or try again."));
}

#[tokio::test]
async fn server_error_fails_quote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let uc = use_case(&server, "Priority Mail", CarrierSettings::new("user", "pw"));
    let failure = uc.quote_shipment(&shipment(12)).await.unwrap_err();

    assert!(matches!(
        failure.cause(),
        QuoteError::Carrier(CarrierError::Connection { .. })
    ));
}
