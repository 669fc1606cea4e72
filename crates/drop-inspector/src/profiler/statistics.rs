//! Statistical helpers for column profiling.

use crate::table::{Column, DataKind, Value};
use crate::utils::{ratio, round_to};
use anyhow::{Result, anyhow, bail};
use std::cmp::Ordering;

/// Fraction of null cells; 0.0 for an empty column.
pub(crate) fn null_rate(column: &Column) -> f64 {
    ratio(column.null_count(), column.len())
}

/// `unique_count / row_count` rounded to 3 decimals; 0.0 for zero rows.
pub(crate) fn cardinality(unique_count: usize, row_count: usize) -> f64 {
    round_to(ratio(unique_count, row_count), 3)
}

/// Minimum and maximum of the non-null cells of a numeric or date/time column.
///
/// Returns `Ok(None)` for other kinds and for columns without values. A cell
/// whose kind contradicts the declared kind is an error.
pub(crate) fn min_max(column: &Column) -> Result<Option<(Value, Value)>> {
    let kind = column.kind();
    if !kind.is_numeric() && !kind.is_temporal() {
        return Ok(None);
    }

    let mut bounds: Option<(&Value, &Value)> = None;
    for value in column.non_null_values() {
        if !fits_kind(value, kind) {
            bail!(
                "cell '{}' does not match declared kind {}",
                value,
                kind.as_str()
            );
        }

        bounds = Some(match bounds {
            None => (value, value),
            Some((min, max)) => {
                let below = compare(value, min)? == Ordering::Less;
                let above = compare(value, max)? == Ordering::Greater;
                (if below { value } else { min }, if above { value } else { max })
            }
        });
    }

    Ok(bounds.map(|(min, max)| (min.clone(), max.clone())))
}

fn fits_kind(value: &Value, kind: DataKind) -> bool {
    match kind {
        DataKind::Integer => matches!(value, Value::Integer(_)),
        DataKind::Float => matches!(value, Value::Integer(_) | Value::Float(_)),
        DataKind::DateTime => matches!(value, Value::DateTime(_)),
        _ => false,
    }
}

fn compare(a: &Value, b: &Value) -> Result<Ordering> {
    a.try_cmp(b)
        .ok_or_else(|| anyhow!("cannot order '{}' against '{}'", a, b))
}
