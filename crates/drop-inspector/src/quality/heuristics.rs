//! Named heuristics used by the quality detectors.
//!
//! Column-name predicates trim and lower-case the name first. Value predicates
//! expect already trimmed text.

use crate::utils::normalize_column_name;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Currency symbols recognised in numeric-looking text.
pub const CURRENCY_SYMBOLS: [char; 3] = ['€', '$', '£'];

const DATE_KEYWORDS: [&str; 6] = ["date", "fecha", "datetime", "timestamp", "created", "updated"];

const NUMERIC_KEYWORDS: [&str; 11] = [
    "price", "amount", "importe", "total", "qty", "quantity", "units", "discount", "pct",
    "percent", "%",
];

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("Invalid regex: email")
});

static DATE_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-/:\.]").expect("Invalid regex: date separator"));

static EU_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\d{1,3}(\.\d{3})+(,\d{1,2})?$").expect("Invalid regex: EU thousands"),
        Regex::new(r"\d+,\d{1,2}$").expect("Invalid regex: EU decimal comma"),
    ]
});

/// Full date-time layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, day-first before month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d %b %y",
    "%B %d, %Y",
    "%B %d %Y",
    "%Y-%b-%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

// =============================================================================
// Column Name Heuristics
// =============================================================================

pub fn looks_like_email_column(name: &str) -> bool {
    let name = normalize_column_name(name);
    name.contains("email") || name.ends_with("_mail") || name.ends_with("mail")
}

pub fn looks_like_date_column(name: &str) -> bool {
    let name = normalize_column_name(name);
    DATE_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

pub fn looks_like_numeric_column(name: &str) -> bool {
    let name = normalize_column_name(name);
    NUMERIC_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

// =============================================================================
// Value Heuristics
// =============================================================================

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Contains at least one of `-`, `/`, `:` or `.`.
pub fn looks_date_like(value: &str) -> bool {
    DATE_SEPARATOR_REGEX.is_match(value)
}

pub fn has_currency_symbol(value: &str, symbol: char) -> bool {
    value.contains(symbol)
}

pub fn has_percent_sign(value: &str) -> bool {
    value.contains('%')
}

/// Ends like `1.234.567`, `1.234,56` or `45,00`.
pub fn looks_like_eu_number(value: &str) -> bool {
    EU_NUMBER_PATTERNS.iter().any(|re| re.is_match(value))
}

/// Strip currency symbols, percent signs and spaces, drop `.` thousands
/// separators and turn a `,` decimal separator into `.`.
pub fn normalize_numeric_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != '%' && *c != ' ' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Parse text as a number after [`normalize_numeric_text`].
pub fn parse_numeric_text(value: &str) -> Option<f64> {
    normalize_numeric_text(value)
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
}

/// Parse a date, date-time or time of day, reading ambiguous numeric dates
/// day-first.
///
/// Bare times are anchored on 1970-01-01.
pub fn parse_datetime_dayfirst(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.naive_local());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt);
    }

    if let Some(date) = parse_compact_date(value).or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }) {
        return date.and_hms_opt(0, 0, 0);
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .and_then(|time| NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(time)))
}

/// `YYYYMMDD`.
fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
