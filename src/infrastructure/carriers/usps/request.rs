//! # Rate Request
//!
//! Builds the single-package rate request and serialises it to the
//! carrier's wire format.
//!
//! The request document looks like:
//!
//! ```text
//! <RateV4Request USERID=".." PASSWORD="..">
//!   <Revision/>
//!   <Package ID="0">
//!     <Service>ALL</Service>
//!     <ZipOrigination>..</ZipOrigination>
//!     <ZipDestination>..</ZipDestination>
//!     <Pounds>..</Pounds>
//!     <Ounces>..</Ounces>
//!     <Container>Variable</Container>
//!     <Size>REGULAR|LARGE|OVERSIZE</Size>
//!     <Width>..</Width>
//!     <Length>..</Length>
//!     <Height>..</Height>
//!     <Machinable>FALSE</Machinable>
//!   </Package>
//! </RateV4Request>
//! ```
//!
//! and travels as the form body `API=RateV4&XML=<encoded document>`, with
//! the document passed through [`form_urlencode`].

use crate::config::CarrierCredentials;
use crate::domain::entities::{LineItemTotals, Shipment};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{PackageSize, SplitWeight, ceil_units};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::usps::encoding::form_urlencode;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fmt;

/// Name of the rate API in the `API` form field.
pub const RATE_API: &str = "RateV4";

/// Root element of the request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestRoot {
    /// Destination inside the carrier's home country.
    Domestic,
    /// Any other destination.
    International,
}

impl RequestRoot {
    /// Chooses the root for a shipment's destination.
    #[must_use]
    pub fn for_shipment(shipment: &Shipment) -> Self {
        if shipment.is_domestic() {
            Self::Domestic
        } else {
            Self::International
        }
    }

    /// Returns the root element name.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::Domestic => "RateV4Request",
            Self::International => "IntlRateV2Request",
        }
    }
}

impl fmt::Display for RequestRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// A fully resolved single-package rate request.
///
/// Created per quote attempt and discarded after it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    credentials: CarrierCredentials,
    root: RequestRoot,
    origin_postal_code: String,
    destination_postal_code: String,
    weight: SplitWeight,
    width: u32,
    length: u32,
    height: u32,
    size: PackageSize,
}

impl RateRequest {
    /// Returns the document root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> RequestRoot {
        self.root
    }

    /// Returns the package weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> SplitWeight {
        self.weight
    }

    /// Returns the rounded `(width, length, height)`.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.length, self.height)
    }

    /// Returns the dimensional size tier.
    #[inline]
    #[must_use]
    pub fn size(&self) -> PackageSize {
        self.size
    }

    /// Returns the origin postal code.
    #[inline]
    #[must_use]
    pub fn origin_postal_code(&self) -> &str {
        &self.origin_postal_code
    }

    /// Returns the destination postal code.
    #[inline]
    #[must_use]
    pub fn destination_postal_code(&self) -> &str {
        &self.destination_postal_code
    }

    /// Serialises the request document without an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the document cannot be written.
    pub fn to_xml(&self) -> CarrierResult<String> {
        let mut writer = Writer::new(Vec::new());
        let root = self.root.element_name();

        writer
            .write_event(Event::Start(BytesStart::new(root).with_attributes([
                ("USERID", self.credentials.username()),
                ("PASSWORD", self.credentials.password()),
            ])))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Empty(BytesStart::new("Revision")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(
                BytesStart::new("Package").with_attributes([("ID", "0")]),
            ))
            .map_err(xml_error)?;

        let pounds = self.weight.pounds().to_string();
        let ounces = self.weight.ounces().to_string();
        let width = self.width.to_string();
        let length = self.length.to_string();
        let height = self.height.to_string();
        let fields: [(&str, &str); 11] = [
            ("Service", "ALL"),
            ("ZipOrigination", self.origin_postal_code.as_str()),
            ("ZipDestination", self.destination_postal_code.as_str()),
            ("Pounds", pounds.as_str()),
            ("Ounces", ounces.as_str()),
            ("Container", "Variable"),
            ("Size", self.size.as_str()),
            ("Width", width.as_str()),
            ("Length", length.as_str()),
            ("Height", height.as_str()),
            // packages are never machine-sortable
            ("Machinable", "FALSE"),
        ];
        for (name, value) in fields {
            write_text_element(&mut writer, name, value)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("Package")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(root)))
            .map_err(xml_error)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| CarrierError::internal_error(format!("request is not UTF-8: {}", e)))
    }

    /// Returns the complete form body, `API=RateV4&XML=<encoded document>`.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the document cannot be written.
    pub fn to_form_body(&self) -> CarrierResult<String> {
        let xml = self.to_xml()?;
        Ok(format!("API={}&XML={}", RATE_API, form_urlencode(&xml)))
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> CarrierResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn xml_error(error: impl fmt::Display) -> CarrierError {
    CarrierError::internal_error(format!("failed to write rate request: {}", error))
}

/// Turns a shipment and its totals into a [`RateRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RateRequestBuilder;

impl RateRequestBuilder {
    /// Rounds the totals up to whole units, classifies the package and
    /// assembles the request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PackageTooLarge` if length plus girth exceeds
    /// the carrier limit, or `DomainError::InvalidMeasurement` for negative
    /// or out-of-range totals.
    pub fn build(
        shipment: &Shipment,
        totals: &LineItemTotals,
        credentials: &CarrierCredentials,
    ) -> DomainResult<RateRequest> {
        let weight = SplitWeight::from_pounds(totals.weight)?;
        let width = ceil_units(totals.width, "width")?;
        let length = ceil_units(totals.length, "length")?;
        let height = ceil_units(totals.height, "height")?;
        let size = PackageSize::classify(length, width, height)?;

        Ok(RateRequest {
            credentials: credentials.clone(),
            root: RequestRoot::for_shipment(shipment),
            origin_postal_code: shipment.origin_postal_code().to_string(),
            destination_postal_code: shipment.destination_postal_code().to_string(),
            weight,
            width,
            length,
            height,
            size,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::ShipmentVersion;
    use rust_decimal::Decimal;

    fn credentials() -> CarrierCredentials {
        CarrierCredentials::new("user", "secret")
    }

    fn shipment(country: &str) -> Shipment {
        Shipment::new(ShipmentVersion::new_v4(), "10001", "94105", country)
    }

    fn totals(weight: Decimal, width: Decimal, length: Decimal, height: Decimal) -> LineItemTotals {
        LineItemTotals::new(weight, width, length, height)
    }

    mod build {
        use super::*;

        #[test]
        fn rounds_up_and_classifies() {
            let request = RateRequestBuilder::build(
                &shipment("US"),
                &totals(
                    Decimal::new(23, 1),
                    Decimal::new(101, 1),
                    Decimal::new(205, 1),
                    Decimal::new(49, 1),
                ),
                &credentials(),
            )
            .unwrap();

            // 2.3 lb bills as 3 lb
            assert_eq!(request.weight().pounds(), 3);
            assert_eq!(request.weight().ounces(), 0);
            assert_eq!(request.dimensions(), (11, 21, 5));
            // 21 + 2*5 + 2*11 = 53
            assert_eq!(request.size(), PackageSize::Regular);
            assert_eq!(request.root(), RequestRoot::Domestic);
        }

        #[test]
        fn large_package_tier() {
            let request = RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::ONE, Decimal::from(15), Decimal::from(30), Decimal::from(15)),
                &credentials(),
            )
            .unwrap();
            assert_eq!(request.size(), PackageSize::Large);
        }

        #[test]
        fn too_large_package_rejected() {
            let err = RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::ONE, Decimal::from(20), Decimal::new(505, 1), Decimal::from(20)),
                &credentials(),
            )
            .unwrap_err();
            // 50.5 rounds to 51, so 51 + 40 + 40 = 131
            assert!(matches!(err, DomainError::PackageTooLarge { total: 131, .. }));
        }

        #[test]
        fn fractional_rounding_can_push_tier_up() {
            // 20.1 + 2*16 + 2*16 rounds to 21 + 64 = 85
            let request = RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::ONE, Decimal::from(16), Decimal::new(201, 1), Decimal::from(16)),
                &credentials(),
            )
            .unwrap();
            assert_eq!(request.size(), PackageSize::Large);
        }

        #[test]
        fn negative_weight_rejected() {
            let err = RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::new(-1, 0), Decimal::ONE, Decimal::ONE, Decimal::ONE),
                &credentials(),
            )
            .unwrap_err();
            assert!(matches!(err, DomainError::InvalidMeasurement { field: "weight", .. }));
        }

        #[test]
        fn foreign_destination_uses_international_root() {
            let request = RateRequestBuilder::build(
                &shipment("CA"),
                &totals(Decimal::ONE, Decimal::ONE, Decimal::ONE, Decimal::ONE),
                &credentials(),
            )
            .unwrap();
            assert_eq!(request.root(), RequestRoot::International);
            assert!(request.to_xml().unwrap().starts_with("<IntlRateV2Request "));
        }
    }

    mod wire {
        use super::*;

        fn sample_request() -> RateRequest {
            RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::new(15, 1), Decimal::from(6), Decimal::from(12), Decimal::from(4)),
                &credentials(),
            )
            .unwrap()
        }

        #[test]
        fn document_layout() {
            let xml = sample_request().to_xml().unwrap();
            assert_eq!(
                xml,
                "<RateV4Request USERID=\"user\" PASSWORD=\"secret\"><Revision/>\
                 <Package ID=\"0\"><Service>ALL</Service>\
                 <ZipOrigination>10001</ZipOrigination>\
                 <ZipDestination>94105</ZipDestination>\
                 <Pounds>2</Pounds><Ounces>0</Ounces>\
                 <Container>Variable</Container><Size>REGULAR</Size>\
                 <Width>6</Width><Length>12</Length><Height>4</Height>\
                 <Machinable>FALSE</Machinable></Package></RateV4Request>"
            );
        }

        #[test]
        fn credentials_are_attribute_escaped() {
            let request = RateRequestBuilder::build(
                &shipment("US"),
                &totals(Decimal::ONE, Decimal::ONE, Decimal::ONE, Decimal::ONE),
                &CarrierCredentials::new("a&b", "p\"w"),
            )
            .unwrap();
            let xml = request.to_xml().unwrap();
            assert!(xml.contains("USERID=\"a&amp;b\""));
            assert!(xml.contains("PASSWORD=\"p&quot;w\""));
        }

        #[test]
        fn form_body_encodes_document() {
            let body = sample_request().to_form_body().unwrap();
            assert!(body.starts_with("API=RateV4&XML=&#60;RateV4Request+USERID&#61;&#34;user&#34;"));
            assert!(body.contains("&#60;Size&#62;REGULAR&#60;&#47;Size&#62;"));
            assert!(body.contains("&#60;Pounds&#62;2&#60;&#47;Pounds&#62;&#60;Ounces&#62;0&#60;&#47;Ounces&#62;"));
            assert!(!body.contains(' '));
            assert!(!body.contains('%'));
        }
    }
}
