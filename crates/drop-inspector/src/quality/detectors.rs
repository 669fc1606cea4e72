//! The fixed battery of quality detectors.
//!
//! Each detector is a pure function of the table, its profile and the shared
//! sampler. Per-column detectors skip empty columns and log and skip any column
//! whose evaluation fails.

use super::heuristics::{
    CURRENCY_SYMBOLS, has_currency_symbol, has_percent_sign, is_valid_email, looks_date_like,
    looks_like_date_column, looks_like_email_column, looks_like_eu_number,
    looks_like_numeric_column, parse_datetime_dayfirst, parse_numeric_text,
};
use super::sampling::Sampler;
use crate::error::InspectorError;
use crate::table::{Column, Table, ValueKind};
use crate::types::{ColumnProfile, Issue, Severity};
use crate::utils::{format_pct, format_rate, ratio};
use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, warn};

const PK_MAX_NULL_PCT: f64 = 1.0;
const PK_MIN_CARDINALITY: f64 = 0.98;
const HIGH_MISSING_PCT: f64 = 20.0;
const EMAIL_INVALID_RATE: f64 = 0.05;
const DATE_LIKE_RATE: f64 = 0.4;
const DATE_FAIL_RATE: f64 = 0.2;
const NUMERIC_PARSE_RATE: f64 = 0.6;
const CURRENCY_RATE: f64 = 0.05;
const PERCENT_RATE: f64 = 0.05;
const EU_NUMBER_RATE: f64 = 0.10;

// =============================================================================
// Aggregate Detectors
// =============================================================================

pub(crate) fn primary_key_candidates(profile: &[ColumnProfile]) -> Option<Issue> {
    let candidates: Vec<&str> = profile
        .iter()
        .filter(|p| {
            p.null_pct <= PK_MAX_NULL_PCT
                && p.cardinality >= PK_MIN_CARDINALITY
                && p.unique_count > 1
        })
        .map(|p| p.name.as_str())
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(Issue::new(
        Severity::Info,
        "Potential primary key columns detected",
        format!("Almost-unique with low nulls: {}", candidates.join(", ")),
        "Use one as a primary key (or combine multiple columns if needed).",
    ))
}

pub(crate) fn duplicate_rows(table: &Table) -> Option<Issue> {
    let count = table.duplicate_row_count();
    if count == 0 {
        return None;
    }

    Some(Issue::new(
        Severity::Warning,
        "Duplicate rows detected",
        format!("Found {} exact duplicate rows.", count),
        "Inspect duplicates; deduplicate or define a reliable key strategy.",
    ))
}

pub(crate) fn high_missingness(profile: &[ColumnProfile]) -> Option<Issue> {
    let mut flagged: Vec<(&str, f64)> = profile
        .iter()
        .filter(|p| p.null_pct >= HIGH_MISSING_PCT)
        .map(|p| (p.name.as_str(), p.null_pct))
        .collect();

    if flagged.is_empty() {
        return None;
    }

    flagged.sort_by(|a, b| b.1.total_cmp(&a.1));
    let formatted = flagged
        .iter()
        .map(|(name, pct)| format!("{} ({}%)", name, format_pct(*pct)))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Issue::new(
        Severity::Warning,
        "High missing values",
        format!("Columns with ≥20% nulls: {}", formatted),
        "Decide whether to impute, drop, or treat as optional. Validate upstream source if unexpected.",
    ))
}

pub(crate) fn mixed_types(table: &Table, sampler: &Sampler) -> Option<Issue> {
    let mixed: Vec<&str> = table
        .columns()
        .iter()
        .filter(|column| has_mixed_kinds(column, sampler))
        .map(Column::name)
        .collect();

    if mixed.is_empty() {
        return None;
    }

    Some(Issue::new(
        Severity::Critical,
        "Mixed types detected",
        format!("Columns likely contain mixed value types: {}", mixed.join(", ")),
        "Standardize formats and cast types. Mixed-type columns frequently break pipelines.",
    ))
}

fn has_mixed_kinds(column: &Column, sampler: &Sampler) -> bool {
    let kinds: HashSet<ValueKind> = sampler
        .sample(column)
        .into_iter()
        .filter_map(|value| value.kind())
        .collect();
    kinds.len() > 1
}

// =============================================================================
// Per-Column Detectors
// =============================================================================

pub(crate) fn invalid_emails(table: &Table, sampler: &Sampler) -> Vec<Issue> {
    scan_columns(
        table,
        |column| looks_like_email_column(column.name()),
        |column| {
            let texts = sampler.sample_texts(column)?;
            let invalid_rate = share(&texts, |text| !is_valid_email(text));
            debug!("Column '{}': invalid email rate {:.4}", column.name(), invalid_rate);

            if invalid_rate < EMAIL_INVALID_RATE {
                return Ok(None);
            }
            Ok(Some(Issue::new(
                Severity::Warning,
                format!("Invalid emails in `{}`", column.name()),
                format!("~{}% of sampled values look invalid.", format_rate(invalid_rate)),
                "Trim whitespace and validate formatting upstream. Consider rejecting invalid addresses at ingestion.",
            )))
        },
    )
}

pub(crate) fn date_parse_failures(table: &Table, sampler: &Sampler) -> Vec<Issue> {
    scan_columns(
        table,
        |column| looks_like_date_column(column.name()) && !column.kind().is_temporal(),
        |column| {
            let texts = sampler.sample_texts(column)?;
            let fail_rate = share(&texts, |text| parse_datetime_dayfirst(text).is_none());
            let date_like = share(&texts, looks_date_like);
            debug!(
                "Column '{}': date-like {:.4}, parse failures {:.4}",
                column.name(),
                date_like,
                fail_rate
            );

            if date_like < DATE_LIKE_RATE || fail_rate < DATE_FAIL_RATE {
                return Ok(None);
            }
            Ok(Some(Issue::new(
                Severity::Warning,
                format!("Date parsing issues in `{}`", column.name()),
                format!("~{}% of sampled values failed parsing.", format_rate(fail_rate)),
                "Standardize dates (ISO 8601). Avoid mixing formats and ensure consistent timezone handling.",
            )))
        },
    )
}

pub(crate) fn numeric_as_text(table: &Table, sampler: &Sampler) -> Vec<Issue> {
    scan_columns(
        table,
        |column| looks_like_numeric_column(column.name()) && !column.kind().is_numeric(),
        |column| {
            let texts = sampler.sample_texts(column)?;

            let has_currency = CURRENCY_SYMBOLS
                .iter()
                .any(|&symbol| share(&texts, |text| has_currency_symbol(text, symbol)) > CURRENCY_RATE);
            let has_percent = share(&texts, has_percent_sign) > PERCENT_RATE;
            let has_eu_number = share(&texts, looks_like_eu_number) > EU_NUMBER_RATE;
            let success = share(&texts, |text| parse_numeric_text(text).is_some());
            debug!("Column '{}': numeric parse success {:.4}", column.name(), success);

            let mut hints = Vec::new();
            if has_currency {
                hints.push("currency symbols");
            }
            if has_percent {
                hints.push("percent signs");
            }
            if has_eu_number {
                hints.push("EU number formatting");
            }

            if success < NUMERIC_PARSE_RATE || hints.is_empty() {
                return Ok(None);
            }
            Ok(Some(Issue::new(
                Severity::Warning,
                format!("Numeric-as-text in `{}`", column.name()),
                format!(
                    "Detected {}. ~{}% could be parsed after cleaning.",
                    hints.join(", "),
                    format_rate(success)
                ),
                "Normalize symbols/separators and cast to numeric types to avoid downstream bugs.",
            )))
        },
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Run `evaluate` over every non-empty column accepted by `applies`.
fn scan_columns<A, E>(table: &Table, applies: A, evaluate: E) -> Vec<Issue>
where
    A: Fn(&Column) -> bool,
    E: Fn(&Column) -> Result<Option<Issue>>,
{
    let mut issues = Vec::new();
    for column in table.columns() {
        if !applies(column) || column.non_null_count() == 0 {
            continue;
        }
        match evaluate(column) {
            Ok(Some(issue)) => issues.push(issue),
            Ok(None) => {}
            Err(e) => {
                let err = InspectorError::column_computation(column.name(), e);
                warn!("Skipping column: {}", err);
            }
        }
    }
    issues
}

/// Fraction of texts matching `predicate`.
fn share<P>(texts: &[String], predicate: P) -> f64
where
    P: Fn(&str) -> bool,
{
    ratio(texts.iter().filter(|text| predicate(text)).count(), texts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::profile;
    use crate::table::Value;
    use pretty_assertions::assert_eq;

    fn table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    fn text_column(name: &str, values: Vec<String>) -> Column {
        Column::from_values(name, values)
    }

    // ==================== Aggregate detectors ====================

    #[test]
    fn test_pk_candidate_unique_integers() {
        let t = table(vec![
            Column::from_values("id", (1..=100i64).collect::<Vec<_>>()),
            Column::from_values("group", (0..100i64).map(|i| i % 50).collect::<Vec<_>>()),
        ]);
        let issue = primary_key_candidates(&profile(&t)).unwrap();
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.details, "Almost-unique with low nulls: id");
    }

    #[test]
    fn test_pk_requires_more_than_one_unique() {
        let t = table(vec![Column::from_values("only", vec![7i64])]);
        assert!(primary_key_candidates(&profile(&t)).is_none());
    }

    #[test]
    fn test_duplicate_rows() {
        let t = table(vec![Column::from_values("a", vec![1i64, 1, 1, 2])]);
        let issue = duplicate_rows(&t).unwrap();
        assert_eq!(issue.details, "Found 2 exact duplicate rows.");
        assert!(duplicate_rows(&table(vec![Column::from_values("a", vec![1i64, 2])])).is_none());
    }

    #[test]
    fn test_high_missingness_sorted_descending() {
        let t = table(vec![
            Column::from_values("low", vec![Some(1i64), None, Some(1), Some(1), Some(1)]),
            Column::from_values("ok", vec![Some(1i64), Some(2), Some(3), Some(4), Some(5)]),
            Column::from_values("high", vec![None, None, None, Some(1i64), Some(2)]),
        ]);
        let issue = high_missingness(&profile(&t)).unwrap();
        assert_eq!(issue.details, "Columns with ≥20% nulls: high (60.0%), low (20.0%)");
    }

    #[test]
    fn test_mixed_types_detected() {
        let t = table(vec![
            Column::new("code", vec![Value::Integer(1), Value::text("A-2"), Value::Null]),
            Column::from_values("name", vec!["a", "b", "c"]),
        ]);
        let issue = mixed_types(&t, &Sampler::default()).unwrap();
        assert_eq!(issue.severity, Severity::Critical);
        assert!(issue.details.ends_with(": code"));
    }

    #[test]
    fn test_promoted_numbers_are_not_mixed() {
        let t = table(vec![Column::new(
            "n",
            vec![Value::Integer(1), Value::Float(2.5)],
        )]);
        assert!(mixed_types(&t, &Sampler::default()).is_none());
    }

    // ==================== Email detector ====================

    #[test]
    fn test_email_detector_fires_at_ten_percent() {
        let values: Vec<String> = (0..100)
            .map(|i| {
                if i % 10 == 0 {
                    format!("broken{}at-example", i)
                } else {
                    format!("user{}@example.com", i)
                }
            })
            .collect();
        let t = table(vec![text_column("contact_email", values)]);

        let issues = invalid_emails(&t, &Sampler::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Invalid emails in `contact_email`");
        assert_eq!(issues[0].details, "~10.0% of sampled values look invalid.");
    }

    #[test]
    fn test_email_detector_silent_for_valid() {
        let values: Vec<String> = (0..100).map(|i| format!("u{}@example.org", i)).collect();
        let t = table(vec![text_column("email", values)]);
        assert!(invalid_emails(&t, &Sampler::default()).is_empty());
    }

    #[test]
    fn test_email_detector_ignores_other_columns() {
        let t = table(vec![text_column("name", vec!["not an email".to_string(); 10])]);
        assert!(invalid_emails(&t, &Sampler::default()).is_empty());
    }

    // ==================== Date detector ====================

    #[test]
    fn test_date_detector_silent_for_iso() {
        let values: Vec<String> = (0..100)
            .map(|i| format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1))
            .collect();
        let t = table(vec![text_column("created_at", values)]);
        assert!(date_parse_failures(&t, &Sampler::default()).is_empty());
    }

    #[test]
    fn test_date_detector_fires_on_thirty_percent_garbage() {
        let values: Vec<String> = (0..100)
            .map(|i| {
                if i < 70 {
                    format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1)
                } else {
                    format!("??-{}-xx", i)
                }
            })
            .collect();
        let t = table(vec![text_column("created_at", values)]);
        let issues = date_parse_failures(&t, &Sampler::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Date parsing issues in `created_at`");
        assert_eq!(issues[0].details, "~30.0% of sampled values failed parsing.");
    }

    #[test]
    fn test_date_detector_fires_on_garbage() {
        let values: Vec<String> = (0..30).map(|i| format!("??-{}-xx", i)).collect();
        let t = table(vec![text_column("order_date", values)]);
        let issues = date_parse_failures(&t, &Sampler::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].details, "~100.0% of sampled values failed parsing.");
    }

    #[test]
    fn test_date_detector_needs_separators() {
        // Unparseable, but not date-like.
        let t = table(vec![text_column("updated", vec!["soon".to_string(); 10])]);
        assert!(date_parse_failures(&t, &Sampler::default()).is_empty());
    }

    #[test]
    fn test_date_detector_skips_datetime_columns() {
        let when = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let t = table(vec![Column::from_values("created", vec![when; 5])]);
        assert!(date_parse_failures(&t, &Sampler::default()).is_empty());
    }

    // ==================== Numeric-as-text detector ====================

    #[test]
    fn test_numeric_as_text_eu_and_currency() {
        let values: Vec<String> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    "1.234,56".to_string()
                } else {
                    "€45,00".to_string()
                }
            })
            .collect();
        let t = table(vec![text_column("total_amount", values)]);

        let issues = numeric_as_text(&t, &Sampler::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].details,
            "Detected currency symbols, EU number formatting. ~100.0% could be parsed after cleaning."
        );
    }

    #[test]
    fn test_numeric_as_text_percent() {
        let values: Vec<String> = (0..10).map(|i| format!("{}%", i * 5)).collect();
        let t = table(vec![text_column("discount_pct", values)]);
        let issues = numeric_as_text(&t, &Sampler::default());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].details.starts_with("Detected percent signs."));
    }

    #[test]
    fn test_numeric_as_text_silent_for_native_numbers() {
        let t = table(vec![Column::from_values("price", (1..=50i64).collect::<Vec<_>>())]);
        assert!(numeric_as_text(&t, &Sampler::default()).is_empty());
    }

    #[test]
    fn test_numeric_as_text_needs_hints() {
        let values: Vec<String> = (0..10).map(|i| format!("{}", i * 3)).collect();
        let t = table(vec![text_column("qty", values)]);
        assert!(numeric_as_text(&t, &Sampler::default()).is_empty());
    }

    // ==================== Shared behaviour ====================

    #[test]
    fn test_all_null_columns_skipped() {
        let t = table(vec![
            Column::with_kind("email", crate::table::DataKind::Text, vec![Value::Null; 4]),
            Column::with_kind("price", crate::table::DataKind::Text, vec![Value::Null; 4]),
        ]);
        let sampler = Sampler::default();
        assert!(invalid_emails(&t, &sampler).is_empty());
        assert!(numeric_as_text(&t, &sampler).is_empty());
        assert!(mixed_types(&t, &sampler).is_none());
    }

    #[test]
    fn test_share() {
        let texts = vec!["a".to_string(), "bb".to_string()];
        assert_eq!(share(&texts, |t| t.len() == 2), 0.5);
        assert_eq!(share(&[], |_| true), 0.0);
    }
}
