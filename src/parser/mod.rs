//! Cell-level parsers for the tour spreadsheet export.
//!
//! Every parser here is total: malformed input degrades to a default value
//! and never fails the row.

use crate::constants::{CURRENCY_SYMBOLS, DEFAULT_MIN_PAX};
use crate::types::ChannelStatus;
use once_cell::sync::Lazy;
use regex::Regex;

static SIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+").expect("static regex is valid"));

/// Returns the trimmed cell at `index`, or an empty string for short rows.
pub fn text_cell(row: &[String], index: usize) -> String {
    row.get(index).map(|c| c.trim().to_string()).unwrap_or_default()
}

/// Parses a locale-formatted amount such as `US$1.234,56` into `1234.56`.
///
/// A `.` followed by exactly three digits is a thousands separator; a `,` is
/// the decimal point. Anything unparseable is `0.0`.
pub fn parse_currency(value: &str) -> f64 {
    let cleaned = strip_currency(value);
    if cleaned.is_empty() {
        return 0.0;
    }
    let without_thousands = strip_thousands_separators(&cleaned);
    parse_finite(&without_thousands.replace(',', "."))
}

/// Parses a comma-decimal multiplier such as `1,35`. Empty or symbol-only cells are `0.0`.
pub fn parse_factor(value: &str) -> f64 {
    let cleaned = strip_currency(value);
    if cleaned.is_empty() {
        return 0.0;
    }
    parse_finite(&cleaned.replace(',', "."))
}

/// Returns the first signed integer in the cell as text, e.g. `-US$4,00` gives `-4`.
///
/// Currency markers are removed first so a sign written before the symbol
/// stays attached to the digits. Whitespace is kept, so separate numbers
/// never merge.
pub fn extract_number(value: &str) -> String {
    let cleaned = strip_currency_markers(value);
    SIGNED_INTEGER
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parses a minimum passenger count. Only digits and `.`/`,` separators are
/// accepted; everything else falls back to 1.
pub fn parse_min_pax(value: &str) -> u32 {
    let trimmed = value.trim();
    let digits: String = trimmed.chars().filter(|c| *c != '.' && *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return DEFAULT_MIN_PAX;
    }

    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 => n.trunc() as u32,
        _ => DEFAULT_MIN_PAX,
    }
}

/// Splits an image cell on commas and newlines, keeping non-empty URLs in order.
pub fn parse_images(value: &str) -> Vec<String> {
    value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// A channel is active only when the cell reads `active` in any case.
pub fn channel_status(value: &str) -> ChannelStatus {
    if value.trim().to_lowercase() == "active" {
        ChannelStatus::Active
    } else {
        ChannelStatus::Inactive
    }
}

fn strip_currency_markers(value: &str) -> String {
    let mut cleaned = value.to_string();
    for symbol in CURRENCY_SYMBOLS {
        cleaned = cleaned.replace(symbol, "");
    }
    cleaned
}

fn strip_currency(value: &str) -> String {
    let mut cleaned = strip_currency_markers(value);
    cleaned.retain(|c| !c.is_whitespace());
    cleaned
}

/// Drops every `.` that introduces a full three-digit group.
fn strip_thousands_separators(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());

    for (i, c) in chars.iter().enumerate() {
        if *c == '.' && is_thousands_group(&chars[i + 1..]) {
            continue;
        }
        out.push(*c);
    }
    out
}

fn is_thousands_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && rest.get(3).map_or(true, |c| !c.is_ascii_digit())
}

fn parse_finite(value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}
