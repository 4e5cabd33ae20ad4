//! Helper functions for turning SIPS portal text into typed values.
//!
//! This module provides:
//! - The two numeric conventions the portal mixes on one page
//! - Reading-date parsing and month-key formatting

use crate::model::NumericLocale;
use chrono::NaiveDate;

/// Format of reading dates on the portal (`dd/mm/yyyy`).
pub const READING_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of aggregate month keys (`MM/YY`).
pub const MONTH_KEY_FORMAT: &str = "%m/%y";

/// Parses a number written with `.` as thousands separator and `,` as decimal
/// separator (Spanish locale).
///
/// Empty text parses as `0`. Characters other than digits, separators and a
/// minus sign (units, non-breaking spaces) are ignored, as is text that still
/// fails to parse.
///
/// # Examples
///
/// ```
/// assert_eq!(parse_thousands_locale("1.162"), 1162.0);
/// assert_eq!(parse_thousands_locale("1.162,50"), 1162.5);
/// ```
pub fn parse_thousands_locale(text: &str) -> f64 {
    let normalized = numeric_chars(text).replace('.', "").replacen(',', ".", 1);
    to_f64(&normalized, text)
}

/// Parses a number written with `.` as decimal separator; commas are treated
/// as thousands separators and dropped.
///
/// Empty text parses as `0`.
///
/// # Examples
///
/// ```
/// assert_eq!(parse_decimals_locale("4.844"), 4.844);
/// assert_eq!(parse_decimals_locale("1,250.5"), 1250.5);
/// ```
pub fn parse_decimals_locale(text: &str) -> f64 {
    let normalized = numeric_chars(text).replace(',', "");
    to_f64(&normalized, text)
}

/// Dispatches to the parser for `locale`.
pub fn parse_locale_number(text: &str, locale: NumericLocale) -> f64 {
    match locale {
        NumericLocale::Thousands => parse_thousands_locale(text),
        NumericLocale::Decimals => parse_decimals_locale(text),
    }
}

fn numeric_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect()
}

fn to_f64(normalized: &str, original: &str) -> f64 {
    if normalized.is_empty() {
        return 0.0;
    }
    match normalized.parse::<f64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Treating unparseable number '{}' as 0: {}", original, e);
            0.0
        }
    }
}

/// Parses a `dd/mm/yyyy` reading date.
pub fn parse_reading_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), READING_DATE_FORMAT).ok()
}

/// Formats the `MM/YY` bucket key for `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_KEY_FORMAT).to_string()
}
