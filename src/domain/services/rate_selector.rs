//! # Rate Selector
//!
//! Picks the single rate for a requested carrier service out of the
//! options parsed from a rate response.
//!
//! # Algorithm
//!
//! 1. Keep options whose decoded service name contains the decoded
//!    requested service code, preserving response order.
//! 2. If any kept option names a `medium` or `large` flat-rate variant,
//!    both variants must be present: the medium rate is used for a
//!    `REGULAR` package and the large rate otherwise. A lone variant
//!    selects nothing.
//! 3. Otherwise the first kept option wins.
//!
//! HTML character references (`&#233;`, `&amp;`, `&reg;`) are decoded on
//! both sides before comparison, since the request encoding can leak them
//! into display names.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::domain::entities::RateOption;
//! use carrier_rate_quote::domain::services::rate_selector::RateSelector;
//! use carrier_rate_quote::domain::value_objects::PackageSize;
//! use rust_decimal::Decimal;
//!
//! let options = vec![
//!     RateOption::new(17, "Priority Mail Regular/Medium Flat-Rate Boxes", Decimal::from(10)),
//!     RateOption::new(22, "Priority Mail Large Flat-Rate Box", Decimal::from(15)),
//! ];
//!
//! let rate = RateSelector::select(&options, "Priority", PackageSize::Regular).unwrap();
//! assert_eq!(rate, Decimal::from(10));
//! ```

use crate::domain::entities::RateOption;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::PackageSize;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use rust_decimal::Decimal;
use std::borrow::Cow;
use tracing::debug;

const MEDIUM_TOKEN: &str = "medium";
const LARGE_TOKEN: &str = "large";

/// Decodes HTML character references, named and numeric, leaving the text
/// untouched if it contains an unrecognised or malformed reference.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    unescape_with(text, resolve_html5_entity).unwrap_or(Cow::Borrowed(text))
}

/// A rate option paired with its decoded, lower-cased service name.
struct Candidate<'a> {
    option: &'a RateOption,
    folded_name: String,
}

impl Candidate<'_> {
    fn mentions(&self, token: &str) -> bool {
        self.folded_name.contains(token)
    }
}

/// Stateless selector over parsed rate options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateSelector;

impl RateSelector {
    /// Selects the rate for `service_code`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoMatchingRate` if no option names the
    /// service, or if only one of the medium/large flat-rate variants is
    /// present.
    pub fn select(
        options: &[RateOption],
        service_code: &str,
        package_size: PackageSize,
    ) -> DomainResult<Decimal> {
        let requested = decode_entities(service_code);

        let candidates: Vec<Candidate<'_>> = options
            .iter()
            .filter_map(|option| {
                let name = decode_entities(option.service_name());
                name.contains(requested.as_ref()).then(|| Candidate {
                    option,
                    folded_name: name.to_lowercase(),
                })
            })
            .collect();

        let has_variants = candidates
            .iter()
            .any(|c| c.mentions(MEDIUM_TOKEN) || c.mentions(LARGE_TOKEN));

        let selected = if has_variants {
            let medium = candidates.iter().find(|c| c.mentions(MEDIUM_TOKEN));
            let large = candidates.iter().find(|c| c.mentions(LARGE_TOKEN));
            match (medium, large) {
                (Some(medium), Some(large)) => {
                    let chosen = if package_size.is_regular() { medium } else { large };
                    Some(chosen.option)
                }
                _ => {
                    debug!(
                        service_code,
                        "flat-rate variants incomplete, need both medium and large"
                    );
                    None
                }
            }
        } else {
            candidates.first().map(|c| c.option)
        };

        match selected {
            Some(option) => {
                debug!(
                    service_code,
                    service = option.service_name(),
                    class_id = option.service_class_id(),
                    rate = %option.rate(),
                    %package_size,
                    "rate selected"
                );
                Ok(option.rate())
            }
            None => Err(DomainError::no_matching_rate(service_code)),
        }
    }
}
