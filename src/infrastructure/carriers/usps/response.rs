//! # Rate Response Parser
//!
//! Single forward pass over a rate response document.
//!
//! The parser walks the document once and never backtracks. It reacts to
//! two elements:
//!
//! - `Error`: the nested `HelpContext` and `Description` texts are joined
//!   into one message and parsing stops with [`CarrierError::Rejected`].
//! - `Postage`: the `CLASSID` attribute, then the immediately following
//!   `MailService` and `Rate` elements, become one [`RateOption`].
//!
//! Everything else is ignored. A `Postage` record whose class is not in
//! the [`ServiceOptionCatalog`] or whose rate is not a decimal is skipped
//! without failing the response; see [`SkipReason`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use carrier_rate_quote::domain::services::ServiceOptionCatalog;
//! use carrier_rate_quote::infrastructure::carriers::usps::response::RateResponseParser;
//! use rust_decimal::Decimal;
//!
//! let parser = RateResponseParser::new(Arc::new(ServiceOptionCatalog::usps()), None);
//! let options = parser
//!     .parse(r#"<RateV4Response><Package ID="0">
//!         <Postage CLASSID="1"><MailService>Priority Mail</MailService><Rate>5.75</Rate></Postage>
//!     </Package></RateV4Response>"#)
//!     .unwrap();
//! assert_eq!(options[0].rate(), Decimal::new(575, 2));
//! ```

use crate::domain::entities::RateOption;
use crate::domain::services::ServiceOptionCatalog;
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Why a single `Postage` record produced no option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The class id is not in the catalog.
    UnknownServiceClass {
        /// Class id read from `CLASSID`, `0` when unparseable.
        service_class_id: u32,
    },
    /// The `Rate` text is missing or not a decimal.
    MalformedRate {
        /// Class id of the record.
        service_class_id: u32,
        /// Raw rate text.
        text: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownServiceClass { service_class_id } => {
                write!(f, "unknown service class {}", service_class_id)
            }
            Self::MalformedRate {
                service_class_id,
                text,
            } => write!(f, "unparseable rate '{}' for class {}", text, service_class_id),
        }
    }
}

/// One parsed record: an option, or the reason it was dropped.
pub type RecordOutcome = Result<RateOption, SkipReason>;

/// Parses carrier rate responses into [`RateOption`]s.
#[derive(Debug, Clone)]
pub struct RateResponseParser {
    catalog: Arc<ServiceOptionCatalog>,
    handling_charge: Option<Decimal>,
}

impl RateResponseParser {
    /// Creates a parser that keeps classes known to `catalog` and adds
    /// `handling_charge` to every rate.
    #[must_use]
    pub fn new(catalog: Arc<ServiceOptionCatalog>, handling_charge: Option<Decimal>) -> Self {
        Self {
            catalog,
            handling_charge,
        }
    }

    /// Returns the flat charge added to each rate.
    #[must_use]
    pub fn handling_charge(&self) -> Option<Decimal> {
        self.handling_charge
    }

    /// Parses a whole response.
    ///
    /// An empty list is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Rejected` if the response carries an `Error`
    /// element, or `CarrierError::ProtocolError` if it is not well-formed.
    pub fn parse(&self, raw: &str) -> CarrierResult<Vec<RateOption>> {
        let mut options = Vec::new();

        for record in self.records(raw) {
            match record? {
                Ok(option) => options.push(option),
                Err(reason) => debug!(%reason, "skipping postage record"),
            }
        }

        debug!(count = options.len(), "parsed rate response");
        Ok(options)
    }

    /// Returns a lazy sequence of per-record outcomes.
    ///
    /// The sequence ends after the first `Err`.
    #[must_use]
    pub fn records<'a>(&'a self, raw: &'a str) -> Records<'a> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        Records {
            parser: self,
            reader,
            pending: None,
            finished: false,
        }
    }

    fn option_for(&self, service_class_id: u32, service_name: String, rate_text: String) -> RecordOutcome {
        if self.catalog.lookup(service_class_id).is_none() {
            return Err(SkipReason::UnknownServiceClass { service_class_id });
        }

        let malformed = |text: String| SkipReason::MalformedRate {
            service_class_id,
            text,
        };
        let Ok(base) = rate_text.trim().parse::<Decimal>() else {
            return Err(malformed(rate_text));
        };
        let rate = match self.handling_charge {
            Some(charge) => base.checked_add(charge).ok_or_else(|| malformed(rate_text))?,
            None => base,
        };

        Ok(RateOption::new(service_class_id, service_name, rate))
    }
}

/// Streaming iterator over the `Postage` records of one response.
pub struct Records<'a> {
    parser: &'a RateResponseParser,
    reader: Reader<&'a [u8]>,
    // one event of lookahead after a Postage record
    pending: Option<Event<'a>>,
    finished: bool,
}

impl fmt::Debug for Records<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records")
            .field("position", &self.reader.buffer_position())
            .field("finished", &self.finished)
            .finish()
    }
}

impl<'a> Records<'a> {
    fn next_event(&mut self) -> CarrierResult<Event<'a>> {
        if let Some(event) = self.pending.take() {
            return Ok(event);
        }
        self.reader.read_event().map_err(|e| {
            CarrierError::protocol_error(format!(
                "malformed rate response at byte {}: {}",
                self.reader.buffer_position(),
                e
            ))
        })
    }

    /// Reads the text content up to the end of the element just opened.
    fn read_text(&mut self, name: &[u8]) -> CarrierResult<String> {
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|e| {
                        CarrierError::protocol_error(format!("invalid text in response: {}", e))
                    })?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::Start(_) => depth += 1,
                Event::End(e) if depth == 0 && e.name().as_ref() == name => return Ok(text),
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => {
                    return Err(CarrierError::protocol_error(format!(
                        "unexpected end of rate response inside '{}'",
                        String::from_utf8_lossy(name)
                    )));
                }
                _ => {}
            }
        }
    }

    /// Reads the next element if it is `name`, otherwise leaves the event
    /// for the main loop and returns an empty string.
    fn read_following(&mut self, name: &[u8]) -> CarrierResult<String> {
        match self.next_event()? {
            Event::Start(e) if e.name().as_ref() == name => self.read_text(name),
            Event::Empty(e) if e.name().as_ref() == name => Ok(String::new()),
            other => {
                self.pending = Some(other);
                Ok(String::new())
            }
        }
    }

    fn read_error(&mut self) -> CarrierError {
        match self.read_error_fields() {
            Ok((help_context, description)) => {
                let mut message = String::new();
                if let Some(help_context) = help_context {
                    message.push_str(&format!("USPS Help Context: {}, ", help_context));
                }
                if let Some(description) = description {
                    message.push_str(&format!("Error Desc: {}", description));
                }
                CarrierError::rejected(message)
            }
            Err(error) => error,
        }
    }

    /// Collects `HelpContext` and `Description` up to the end of `Error`.
    fn read_error_fields(&mut self) -> CarrierResult<(Option<String>, Option<String>)> {
        let mut help_context = None;
        let mut description = None;
        let mut depth = 0usize;

        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"HelpContext" => {
                    help_context = Some(self.read_text(b"HelpContext")?);
                }
                Event::Start(e) if e.name().as_ref() == b"Description" => {
                    description = Some(self.read_text(b"Description")?);
                }
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok((help_context, description)),
                Event::End(_) => depth -= 1,
                Event::Eof => return Ok((help_context, description)),
                _ => {}
            }
        }
    }

    fn read_postage(&mut self, start: &BytesStart<'_>) -> CarrierResult<RecordOutcome> {
        let service_class_id = class_id(start);
        let service_name = self.read_following(b"MailService")?;
        let rate_text = self.read_following(b"Rate")?;

        Ok(self
            .parser
            .option_for(service_class_id, service_name, rate_text))
    }
}

impl Iterator for Records<'_> {
    type Item = CarrierResult<RecordOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let event = match self.next_event() {
                Ok(event) => event,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            };

            match event {
                Event::Start(e) if e.name().as_ref() == b"Error" => {
                    self.finished = true;
                    return Some(Err(self.read_error()));
                }
                Event::Start(e) if e.name().as_ref() == b"Postage" => {
                    let outcome = self.read_postage(&e);
                    if outcome.is_err() {
                        self.finished = true;
                    }
                    return Some(outcome);
                }
                Event::Empty(e) if e.name().as_ref() == b"Postage" => {
                    let service_class_id = class_id(&e);
                    return Some(Ok(Err(SkipReason::MalformedRate {
                        service_class_id,
                        text: String::new(),
                    })));
                }
                Event::Eof => {
                    self.finished = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

/// Reads `CLASSID`, falling back to `0` when absent or not a number.
fn class_id(start: &BytesStart<'_>) -> u32 {
    start
        .try_get_attribute("CLASSID")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().and_then(|v| v.trim().parse().ok()))
        .unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parser(handling_charge: Option<Decimal>) -> RateResponseParser {
        RateResponseParser::new(Arc::new(ServiceOptionCatalog::usps()), handling_charge)
    }

    fn postage(class_id: &str, service: &str, rate: &str) -> String {
        format!(
            "<Postage CLASSID=\"{}\"><MailService>{}</MailService><Rate>{}</Rate></Postage>",
            class_id, service, rate
        )
    }

    fn response(records: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <RateV4Response><Package ID=\"0\"><ZipOrigination>10001</ZipOrigination>{}</Package></RateV4Response>",
            records.concat()
        )
    }

    mod postage_records {
        use super::*;

        #[test]
        fn unknown_class_is_dropped() {
            let raw = response(&[
                postage("1", "Priority Mail", "5.75"),
                postage("999", "Mystery Mail", "3.00"),
            ]);
            let options = parser(None).parse(&raw).unwrap();
            assert_eq!(options, vec![RateOption::new(1, "Priority Mail", Decimal::new(575, 2))]);
        }

        #[test]
        fn response_order_is_kept() {
            let raw = response(&[
                postage("6", "Media Mail", "3.19"),
                postage("1", "Priority Mail", "5.75"),
                postage("4", "Parcel Post", "6.10"),
            ]);
            let ids: Vec<u32> = parser(None)
                .parse(&raw)
                .unwrap()
                .iter()
                .map(RateOption::service_class_id)
                .collect();
            assert_eq!(ids, vec![6, 1, 4]);
        }

        #[test]
        fn handling_charge_is_added() {
            let raw = response(&[postage("1", "Priority Mail", "5.75")]);
            let options = parser(Some(Decimal::new(150, 2))).parse(&raw).unwrap();
            assert_eq!(options[0].rate(), Decimal::new(725, 2));
        }

        #[test]
        fn malformed_rate_is_skipped() {
            let raw = response(&[
                postage("1", "Priority Mail", "n/a"),
                postage("3", "Express Mail", "19.99"),
            ]);
            let options = parser(None).parse(&raw).unwrap();
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].service_class_id(), 3);
        }

        #[test]
        fn unparseable_class_id_is_unknown() {
            let raw = response(&[postage("abc", "Priority Mail", "5.75")]);
            let outcomes: Vec<_> = parser(None)
                .records(&raw)
                .map(Result::unwrap)
                .collect();
            assert_eq!(
                outcomes,
                vec![Err(SkipReason::UnknownServiceClass {
                    service_class_id: 0
                })]
            );
        }

        #[test]
        fn escaped_service_name_is_unescaped_once() {
            let raw = response(&[postage(
                "1",
                "Priority Mail 2-Day&amp;lt;sup&amp;gt;&amp;#8482;&amp;lt;/sup&amp;gt;",
                "5.75",
            )]);
            let options = parser(None).parse(&raw).unwrap();
            assert_eq!(
                options[0].service_name(),
                "Priority Mail 2-Day&lt;sup&gt;&#8482;&lt;/sup&gt;"
            );
        }

        #[test]
        fn missing_rate_does_not_swallow_next_record() {
            let raw = response(&[
                "<Postage CLASSID=\"1\"><MailService>Priority Mail</MailService></Postage>"
                    .to_string(),
                postage("3", "Express Mail", "19.99"),
            ]);
            let outcomes: Vec<_> = parser(None)
                .records(&raw)
                .map(Result::unwrap)
                .collect();
            assert_eq!(outcomes.len(), 2);
            assert!(matches!(
                outcomes[0],
                Err(SkipReason::MalformedRate {
                    service_class_id: 1,
                    ..
                })
            ));
            assert_eq!(outcomes[1].as_ref().unwrap().service_class_id(), 3);
        }

        #[test]
        fn empty_response_is_not_an_error() {
            let options = parser(None).parse(&response(&[])).unwrap();
            assert!(options.is_empty());
        }
    }

    mod carrier_errors {
        use super::*;

        #[test]
        fn error_element_fails_with_message() {
            let raw = "<Error><Number>-2147219401</Number><Source>clsRateV4</Source>\
                       <Description>Invalid Zip Code.</Description>\
                       <HelpFile/><HelpContext>1000440</HelpContext></Error>";
            let err = parser(None).parse(raw).unwrap_err();
            assert_eq!(
                err,
                CarrierError::rejected("USPS Help Context: 1000440, Error Desc: Invalid Zip Code.")
            );
        }

        #[test]
        fn description_only() {
            let raw = "<Error><Description>Invalid Zip Code.</Description></Error>";
            let err = parser(None).parse(raw).unwrap_err();
            assert_eq!(
                err.to_string(),
                "carrier error returned: Error Desc: Invalid Zip Code."
            );
        }

        #[test]
        fn nested_error_discards_earlier_records() {
            let raw = response(&[
                postage("1", "Priority Mail", "5.75"),
                "<Error><Description>Bad package</Description></Error>".to_string(),
            ]);
            let err = parser(None).parse(&raw).unwrap_err();
            assert!(err.is_reported_by_carrier());
        }

        #[test]
        fn records_stop_after_error() {
            let raw = "<Error><Description>x</Description></Error>\
                       <Postage CLASSID=\"1\"><MailService>P</MailService><Rate>1</Rate></Postage>";
            let parser = parser(None);
            let mut records = parser.records(raw);
            assert!(records.next().unwrap().is_err());
            assert!(records.next().is_none());
        }

        #[test]
        fn malformed_document_is_protocol_error() {
            let raw = "<RateV4Response><Package></RateV4Response>";
            let err = parser(None).parse(raw).unwrap_err();
            assert!(matches!(err, CarrierError::ProtocolError { .. }));
        }

        #[test]
        fn truncated_record_is_protocol_error() {
            let raw = "<RateV4Response><Postage CLASSID=\"1\"><MailService>Priority";
            let err = parser(None).parse(raw).unwrap_err();
            assert!(matches!(err, CarrierError::ProtocolError { .. }));
        }
    }
}
