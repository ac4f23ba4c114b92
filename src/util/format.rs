//! Deterministic display formatting for numeric and date values
//!
//! Numbers are rendered with en-US conventions: `,` digit grouping, `.` as the
//! decimal separator, and half-away-from-zero rounding applied to the shortest
//! decimal representation of the value. The same `(value, decimal_places,
//! use_grouping)` triple always yields the same string.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::Locale;

/// Default display pattern for dates, e.g. `Jan 20, 2025`
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Source of the thousands separator
const GROUPING_LOCALE: Locale = Locale::en;

/// Fraction digits shown when a number has no fixed decimal-place count
const DEFAULT_MAX_FRACTION_DIGITS: usize = 3;

/// Format a number with optional fixed decimals and digit grouping.
///
/// With `decimal_places = None` up to three fraction digits are kept and
/// trailing zeros are dropped.
pub fn format_number(value: f64, decimal_places: Option<usize>, use_grouping: bool) -> String {
    match decimal_places {
        Some(places) => format_fixed(value, places, places, use_grouping),
        None => format_fixed(value, 0, DEFAULT_MAX_FRACTION_DIGITS, use_grouping),
    }
}

/// Format a monetary amount as `{symbol}{grouped number}` with fixed decimals
pub fn format_currency(value: f64, currency_symbol: &str, decimal_places: usize) -> String {
    format!(
        "{}{}",
        currency_symbol,
        format_fixed(value, decimal_places, decimal_places, true)
    )
}

/// Format a percentage as `{grouped number}%` with fixed decimals
pub fn format_percent(value: f64, decimal_places: usize) -> String {
    format!(
        "{}%",
        format_fixed(value, decimal_places, decimal_places, true)
    )
}

fn format_fixed(value: f64, min_fraction: usize, max_fraction: usize, use_grouping: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Display for f64 is the shortest round-trip representation and never
    // uses exponent notation.
    let repr = value.abs().to_string();
    let (int_digits, mut fraction) = round_decimal(&repr, max_fraction);

    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let integer = if use_grouping {
        group_digits(&int_digits)
    } else {
        int_digits.clone()
    };

    // Negative values keep their sign even when they round to zero (`-0.00`)
    let sign = if value.is_sign_negative() { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    }
}

/// Round a plain decimal string to `places` fraction digits (half away from zero).
///
/// Returns the integer digits and exactly `places` fraction digits.
fn round_decimal(repr: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr, ""));

    if frac_part.len() <= places {
        let mut fraction = frac_part.to_string();
        fraction.extend(std::iter::repeat('0').take(places - frac_part.len()));
        return (int_part.to_string(), fraction);
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();

    if frac_part.as_bytes()[places] >= b'5' {
        let mut idx = digits.len();
        loop {
            if idx == 0 {
                digits.insert(0, b'1');
                break;
            }
            idx -= 1;
            if digits[idx] == b'9' {
                digits[idx] = b'0';
            } else {
                digits[idx] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let integer = String::from_utf8_lossy(&digits[..split]).into_owned();
    let fraction = String::from_utf8_lossy(&digits[split..]).into_owned();
    (integer, fraction)
}

/// Insert the locale's thousands separator into a run of ASCII digits of any length
fn group_digits(digits: &str) -> String {
    let separator = GROUPING_LOCALE.separator();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, digit) in digits.char_indices() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Parse the longest leading floating-point literal in `input`.
///
/// Leading whitespace is skipped; trailing garbage is ignored. Returns `None`
/// when no digits are found.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digit_count += frac_end - frac_start;
        end = frac_end;
    }

    if digit_count == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let literal = s[..end].trim_end_matches('.');
    let literal = if literal.is_empty() || literal == "+" || literal == "-" {
        return None;
    } else {
        literal
    };

    literal.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Format a date with a strftime-style pattern.
///
/// A pattern chrono cannot parse, or one asking for fields a date does not
/// have (`%H`, `%M`, `%z`, ...), falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    let parsed = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    if parsed && write!(out, "{}", date.format_with_items(StrftimeItems::new(pattern))).is_ok() {
        return out;
    }
    tracing::warn!("Unusable date display format {:?}, using default", pattern);
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Parse a stored date value.
///
/// Accepts ISO dates (`2025-01-20`), RFC 3339 timestamps, naive ISO
/// date-times, `01/20/2025`, and `Jan 20, 2025`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    ["%m/%d/%Y", "%b %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Storage representation of a date (`yyyy-mm-dd`)
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
