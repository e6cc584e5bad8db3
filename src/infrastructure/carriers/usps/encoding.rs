//! # Request Field Encoding
//!
//! Form-urlencoded transform for the `XML` request field.
//!
//! The rate endpoint only accepts single-byte-safe payloads, so the
//! escape for anything outside the unreserved set is an HTML numeric
//! character reference rather than a percent escape:
//!
//! | Input                      | Output        |
//! |----------------------------|---------------|
//! | `A-Z a-z 0-9 * - . _`      | unchanged     |
//! | space                      | `+`           |
//! | any other character `c`    | `&#{c as u32};` |
//!
//! Wide characters are referenced by code point, so they survive intact.
//! The carrier decodes this exact transform; it must not be swapped for a
//! standard percent-encoder.
//!
//! # Examples
//!
//! ```
//! use carrier_rate_quote::infrastructure::carriers::usps::encoding::form_urlencode;
//!
//! assert_eq!(form_urlencode("Media Mail"), "Media+Mail");
//! assert_eq!(form_urlencode("café"), "caf&#233;");
//! assert_eq!(form_urlencode("<a>"), "&#60;a&#62;");
//! ```

/// Returns `true` for characters that pass through unchanged.
#[inline]
#[must_use]
pub fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '*' | '-' | '.' | '_')
}

/// Encodes a field value with the carrier's form-urlencoded transform.
#[must_use]
pub fn form_urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        if c == ' ' {
            encoded.push('+');
        } else if is_unreserved(c) {
            encoded.push(c);
        } else {
            encoded.push_str("&#");
            encoded.push_str(&u32::from(c).to_string());
            encoded.push(';');
        }
    }
    encoded
}
