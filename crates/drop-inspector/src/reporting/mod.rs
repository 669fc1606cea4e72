//! Report assembly and export.
//!
//! [`build_report`] combines dataset counts, the column profile and the
//! detected issues into one [`Report`]. [`ReportGenerator`] writes the report
//! JSON and the cleaned CSV to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use drop_inspector::reporting::{ReportGenerator, build_report};
//!
//! let report = build_report(&table, profile, issues);
//! println!("{}", report.to_json_pretty()?);
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_all(&report, &cleaned)?;
//! ```

mod export;
mod generator;

pub use export::{table_to_csv, table_to_dataframe};
pub use generator::{ExportPaths, ReportGenerator};

use crate::table::Table;
use crate::types::{ColumnProfile, DatasetSummary, Issue, Report};

/// Assemble the exportable report.
pub fn build_report(table: &Table, profile: Vec<ColumnProfile>, issues: Vec<Issue>) -> Report {
    Report {
        dataset: DatasetSummary {
            rows: table.height(),
            columns: table.width(),
            missing_cells_total: table.missing_cells_total(),
            duplicate_rows_total: table.duplicate_row_count(),
        },
        profile,
        issues,
    }
}
