//! Partial-date canonicalization for AE timing variables.
//!
//! SDTM requires the ISO 8601 extended format with right truncation for
//! unknown components (SDTMIG v3.4 Section 4.4.1): `YYYY`, `YYYY-MM`, or
//! `YYYY-MM-DD`. Source exports instead carry compact digit runs
//! (`20230115`), numeric-typed columns with a trailing fraction
//! (`20230115.0`), or already-canonical strings.

use regex::Regex;
use std::sync::LazyLock;

/// The three canonical partial-date shapes. Digit-shape only: component
/// ranges are not checked, so `2023-13-01` matches. Canonicalization
/// deliberately preserves such values for traceability instead of
/// correcting them.
static PARTIAL_ISO_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^\d{4}$").expect("year pattern"),
        Regex::new(r"^\d{4}-\d{2}$").expect("year-month pattern"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("full date pattern"),
    ]
});

/// Precision of a canonical partial date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// Normalize one raw date value to a partial ISO 8601 string.
///
/// Empty input yields `""`. A trailing decimal fraction is stripped first.
/// Pure digit runs of length 8, 6, or 4 are sliced into `YYYY-MM-DD`,
/// `YYYY-MM`, or `YYYY`. Anything else, including already-canonical
/// values, passes through unchanged. Never fails; unrecognized shapes are
/// the validator's concern.
pub fn canonicalize_date(raw: &str) -> String {
    let mut value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    // Numeric-typed export columns arrive as e.g. "20230115.0".
    if let Some(dot) = value.rfind('.') {
        let fraction = &value[dot + 1..];
        if !fraction.is_empty() && fraction.bytes().all(|byte| byte.is_ascii_digit()) {
            value = &value[..dot];
        }
    }

    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        match value.len() {
            8 => return format!("{}-{}-{}", &value[..4], &value[4..6], &value[6..8]),
            6 => return format!("{}-{}", &value[..4], &value[4..6]),
            4 => return value.to_string(),
            _ => {}
        }
    }

    value.to_string()
}

/// True when `value` matches one of the three canonical shapes.
/// The validator checks the same patterns the canonicalizer targets.
pub fn is_partial_iso_date(value: &str) -> bool {
    PARTIAL_ISO_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(value))
}

/// Precision of a canonical value, `None` for anything non-canonical.
pub fn date_precision(value: &str) -> Option<DatePrecision> {
    if !is_partial_iso_date(value) {
        return None;
    }
    match value.len() {
        4 => Some(DatePrecision::Year),
        7 => Some(DatePrecision::Month),
        10 => Some(DatePrecision::Day),
        _ => None,
    }
}
