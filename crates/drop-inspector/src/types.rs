use crate::table::{DataKind, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-column statistical profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: DataKind,
    /// Fraction of null cells, in `[0, 1]`.
    pub null_rate: f64,
    /// `null_rate * 100`, rounded to 2 decimals.
    #[serde(rename = "null_%")]
    pub null_pct: f64,
    /// Distinct non-null values.
    pub unique_count: usize,
    /// `unique_count / row_count`, rounded to 3 decimals.
    pub cardinality: f64,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected data-quality issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub details: String,
    pub suggestion: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        details: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            details: details.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Dataset-level counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_cells_total: usize,
    pub duplicate_rows_total: usize,
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

/// The exportable inspection report.
///
/// The serialized shape (`dataset`, `profile`, `issues`) is the export
/// contract and must stay stable field for field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub dataset: DatasetSummary,
    pub profile: Vec<ColumnProfile>,
    pub issues: Vec<Issue>,
}

impl Report {
    /// Issues of one severity, in emission order.
    pub fn issues_with(&self, severity: Severity) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for issue in &self.issues {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Two-space indented JSON, as written to the exported report file.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
