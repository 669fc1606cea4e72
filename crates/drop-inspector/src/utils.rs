//! Shared utilities for the inspection engine.
//!
//! This module contains small helpers used across the profiler, the quality
//! analyzer and the loader.

use crate::table::DataKind;
use polars::prelude::*;

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole`, or 0.0 when `whole` is zero.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Render a percentage keeping at least one decimal (`20.0`, `12.35`).
pub fn format_pct(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Render a rate in `[0, 1]` as a percentage rounded to 2 decimals.
pub fn format_rate(rate: f64) -> String {
    format_pct(round_to(rate * 100.0, 2))
}

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Map a polars DataType onto the declared column kind.
pub fn kind_for_dtype(dtype: &DataType) -> DataKind {
    if is_integer_dtype(dtype) {
        DataKind::Integer
    } else if is_float_dtype(dtype) {
        DataKind::Float
    } else if matches!(dtype, DataType::Boolean) {
        DataKind::Boolean
    } else if matches!(dtype, DataType::String) {
        DataKind::Text
    } else {
        DataKind::Object
    }
}

// =============================================================================
// Column Name Utilities
// =============================================================================

/// Trimmed, lower-cased column name used by the name heuristics.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(0.98765, 3), 0.988);
        assert_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn test_ratio_zero_whole() {
        assert_eq!(ratio(5, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(20.0), "20.0");
        assert_eq!(format_pct(12.35), "12.35");
        assert_eq!(format_rate(0.1), "10.0");
        assert_eq!(format_rate(0.123456), "12.35");
    }

    #[test]
    fn test_kind_for_dtype() {
        assert_eq!(kind_for_dtype(&DataType::Int64), DataKind::Integer);
        assert_eq!(kind_for_dtype(&DataType::UInt8), DataKind::Integer);
        assert_eq!(kind_for_dtype(&DataType::Float32), DataKind::Float);
        assert_eq!(kind_for_dtype(&DataType::Boolean), DataKind::Boolean);
        assert_eq!(kind_for_dtype(&DataType::String), DataKind::Text);
        assert_eq!(kind_for_dtype(&DataType::Null), DataKind::Object);
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Contact_EMAIL "), "contact_email");
    }
}
