//! Column profiling.
//!
//! This module computes a fixed statistical profile for every column:
//! - Null rate and null percentage
//! - Distinct non-null values and cardinality
//! - Minimum and maximum for numeric and date/time columns
//!
//! It also carries the helpers behind the column-health view (sorting by
//! missingness, filtering by name).

mod statistics;

use crate::error::InspectorError;
use crate::table::{Column, Table};
use crate::types::ColumnProfile;
use crate::utils::round_to;
use tracing::{debug, warn};

/// Data profiler for per-column statistics.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a table, in column order.
    pub fn profile_table(table: &Table) -> Vec<ColumnProfile> {
        debug!("Profiling {} columns", table.width());
        table
            .columns()
            .iter()
            .map(|column| Self::profile_column(column, table.height()))
            .collect()
    }

    fn profile_column(column: &Column, row_count: usize) -> ColumnProfile {
        let null_rate = statistics::null_rate(column);
        let unique_count = column.unique_count();

        let (min, max) = match statistics::min_max(column) {
            Ok(Some((min, max))) => (Some(min), Some(max)),
            Ok(None) => (None, None),
            Err(e) => {
                let err = InspectorError::column_computation(column.name(), e);
                warn!("Skipping min/max: {}", err);
                (None, None)
            }
        };

        ColumnProfile {
            name: column.name().to_string(),
            dtype: column.kind(),
            null_rate,
            null_pct: round_to(null_rate * 100.0, 2),
            unique_count,
            cardinality: statistics::cardinality(unique_count, row_count),
            min,
            max,
        }
    }
}

/// Profile every column of a table.
pub fn profile(table: &Table) -> Vec<ColumnProfile> {
    DataProfiler::profile_table(table)
}

/// Columns ordered by descending null percentage; ties keep column order.
pub fn sort_by_missingness(profile: &[ColumnProfile]) -> Vec<ColumnProfile> {
    let mut sorted = profile.to_vec();
    sorted.sort_by(|a, b| b.null_pct.total_cmp(&a.null_pct));
    sorted
}

/// Columns whose name contains `query`, ignoring case. A blank query keeps all.
pub fn filter_columns(profile: &[ColumnProfile], query: &str) -> Vec<ColumnProfile> {
    let query = query.trim().to_lowercase();
    profile
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DataKind, Value};
    use pretty_assertions::assert_eq;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::from_values("id", vec![1i64, 2, 3, 4]),
            Column::from_values("Notes", vec![None, None, Some("x"), None]),
            Column::from_values("score", vec![Some(2.5f64), None, Some(7.0), Some(2.5)]),
        ])
        .unwrap()
    }

    // ==================== Profile computation ====================

    #[test]
    fn test_profile_values() {
        let profile = profile(&sample_table());
        assert_eq!(profile.len(), 3);

        let id = &profile[0];
        assert_eq!(id.dtype, DataKind::Integer);
        assert_eq!(id.null_rate, 0.0);
        assert_eq!(id.unique_count, 4);
        assert_eq!(id.cardinality, 1.0);
        assert_eq!(id.min, Some(Value::Integer(1)));
        assert_eq!(id.max, Some(Value::Integer(4)));

        let notes = &profile[1];
        assert_eq!(notes.null_rate, 0.75);
        assert_eq!(notes.null_pct, 75.0);
        assert_eq!(notes.cardinality, 0.25);
        assert_eq!(notes.min, None);

        let score = &profile[2];
        assert_eq!(score.unique_count, 2);
        assert_eq!(score.cardinality, 0.5);
        assert_eq!(score.min, Some(Value::Float(2.5)));
        assert_eq!(score.max, Some(Value::Float(7.0)));
    }

    #[test]
    fn test_profile_empty_table() {
        let table = Table::new(vec![Column::new("a", vec![])]).unwrap();
        let profile = profile(&table);
        assert_eq!(profile[0].null_rate, 0.0);
        assert_eq!(profile[0].cardinality, 0.0);
        assert_eq!(profile[0].min, None);
    }

    #[test]
    fn test_profile_swallows_min_max_failure() {
        let table = Table::new(vec![Column::with_kind(
            "price",
            DataKind::Float,
            vec![Value::Float(1.0), Value::text("n/a")],
        )])
        .unwrap();
        let profile = profile(&table);
        assert_eq!(profile[0].min, None);
        assert_eq!(profile[0].max, None);
        assert_eq!(profile[0].unique_count, 2);
    }

    #[test]
    fn test_null_pct_rounding() {
        let table = Table::new(vec![Column::from_values(
            "a",
            vec![None, Some(1i64), Some(2)],
        )])
        .unwrap();
        assert_eq!(profile(&table)[0].null_pct, 33.33);
    }

    // ==================== Column health helpers ====================

    #[test]
    fn test_sort_by_missingness_is_stable() {
        let sorted = sort_by_missingness(&profile(&sample_table()));
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", "score", "id"]);

        let table = Table::new(vec![
            Column::from_values("b", vec![1i64]),
            Column::from_values("a", vec![2i64]),
        ])
        .unwrap();
        let names: Vec<String> = sort_by_missingness(&profile(&table))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_filter_columns() {
        let profile = profile(&sample_table());
        let hits = filter_columns(&profile, "  NOTE ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Notes");
        assert_eq!(filter_columns(&profile, "").len(), 3);
        assert!(filter_columns(&profile, "zzz").is_empty());
    }
}
