use super::detectors;
use super::sampling::Sampler;
use crate::table::Table;
use crate::types::{ColumnProfile, Issue};
use tracing::{debug, info};

/// Runs every detector over a table, in a fixed order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataQualityAnalyzer {
    sampler: Sampler,
}

impl DataQualityAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom sampler for the sampling detectors.
    ///
    /// A zero sample size is raised to 1 so the sampling detectors always
    /// see at least one value per non-empty column.
    pub fn with_sampling(sample_size: usize, seed: u64) -> Self {
        Self {
            sampler: Sampler::new(sample_size.max(1), seed),
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Detect quality issues.
    ///
    /// Issues come back in detector order: primary-key candidates, duplicate
    /// rows, high missingness, mixed types, then the per-column email, date
    /// and numeric-as-text checks.
    pub fn identify_issues(&self, table: &Table, profile: &[ColumnProfile]) -> Vec<Issue> {
        let mut issues = Vec::new();

        issues.extend(detectors::primary_key_candidates(profile));
        issues.extend(detectors::duplicate_rows(table));
        issues.extend(detectors::high_missingness(profile));
        issues.extend(detectors::mixed_types(table, &self.sampler));
        debug!("Aggregate detectors produced {} issues", issues.len());

        issues.extend(detectors::invalid_emails(table, &self.sampler));
        issues.extend(detectors::date_parse_failures(table, &self.sampler));
        issues.extend(detectors::numeric_as_text(table, &self.sampler));

        info!("Detected {} data quality issues", issues.len());
        issues
    }
}

/// Detect quality issues with the default sampler.
pub fn detect_issues(table: &Table, profile: &[ColumnProfile]) -> Vec<Issue> {
    DataQualityAnalyzer::new().identify_issues(table, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::profile;
    use crate::table::{Column, Value};
    use crate::types::Severity;

    fn sales_table() -> Table {
        let n = 40i64;
        Table::new(vec![
            Column::from_values("order_id", (1..=n).collect::<Vec<_>>()),
            Column::from_values(
                "customer_email",
                (0..n)
                    .map(|i| {
                        if i % 4 == 0 {
                            "nobody".to_string()
                        } else {
                            format!("c{}@shop.io", i)
                        }
                    })
                    .collect::<Vec<_>>(),
            ),
            Column::from_values(
                "notes",
                (0..n)
                    .map(|i| if i % 2 == 0 { None } else { Some("ok") })
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "code",
                (0..n)
                    .map(|i| {
                        if i % 3 == 0 {
                            Value::Integer(i)
                        } else {
                            Value::text(format!("C{}", i))
                        }
                    })
                    .collect(),
            ),
        ])
        .unwrap()
    }

    // ==================== Ordering ====================

    #[test]
    fn test_issue_order_follows_detector_order() {
        let table = sales_table();
        let issues = detect_issues(&table, &profile(&table));
        let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "Potential primary key columns detected",
                "High missing values",
                "Mixed types detected",
                "Invalid emails in `customer_email`",
            ]
        );
        assert_eq!(issues[2].severity, Severity::Critical);
    }

    #[test]
    fn test_pk_details_list_unique_columns() {
        let table = sales_table();
        let issues = detect_issues(&table, &profile(&table));
        assert_eq!(issues[0].details, "Almost-unique with low nulls: order_id, code");
    }

    #[test]
    fn test_custom_sampling_is_used() {
        let analyzer = DataQualityAnalyzer::with_sampling(10, 7);
        assert_eq!(analyzer.sampler().size(), 10);
        assert_eq!(analyzer.sampler().seed(), 7);

        let table = sales_table();
        let issues = analyzer.identify_issues(&table, &profile(&table));
        assert!(!issues.is_empty());
    }

    #[test]
    fn test_zero_sample_size_is_raised() {
        let analyzer = DataQualityAnalyzer::with_sampling(0, 42);
        assert_eq!(analyzer.sampler().size(), 1);

        let table = Table::new(vec![Column::from_values("email", vec!["nobody"; 5])]).unwrap();
        let issues = analyzer.identify_issues(&table, &profile(&table));
        assert!(
            issues
                .iter()
                .any(|issue| issue.details == "~100.0% of sampled values look invalid.")
        );
    }

    #[test]
    fn test_empty_table_has_no_issues() {
        let table = Table::new(vec![Column::new("email", vec![])]).unwrap();
        assert!(detect_issues(&table, &profile(&table)).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let table = sales_table();
        let p = profile(&table);
        assert_eq!(detect_issues(&table, &p), detect_issues(&table, &p));
    }
}
