//! Shared date helpers for the climate API
//!
//! Dates travel through the dataset and the URL as ISO 8601 date-only strings.

use chrono::NaiveDate;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields such as `2017-1-5`, so the shape is checked
/// first: ten ASCII characters, digits everywhere except `-` at offsets 4 and 7.
///
/// # Examples
///
/// ```
/// use hawaii_climate_api::utils::parse_iso_date;
///
/// assert!(parse_iso_date("2017-08-23").is_some());
/// assert!(parse_iso_date("2017-8-23").is_none());
/// assert!(parse_iso_date("2017-02-30").is_none());
/// ```
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
