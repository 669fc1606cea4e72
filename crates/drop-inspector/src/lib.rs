//! Data Drop Inspector Library
//!
//! Data-quality inspection for tabular "data drops" (CSV and XLSX files).
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Loading**: CSV through Polars, XLSX through calamine, into a tagged [`Table`]
//! - **Safe Cleaning**: name and text trimming, placeholder nulls, exact-duplicate removal
//! - **Profiling**: null rate, distinct values, cardinality, min/max per column
//! - **Issue Detection**: a fixed battery of heuristic detectors with severities
//! - **Reporting**: one serializable [`Report`], plus JSON and cleaned-CSV export
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use drop_inspector::{InspectionConfig, Inspector, load_path};
//!
//! let table = load_path("sales.xlsx")?;
//!
//! let config = InspectionConfig::builder()
//!     .sample_size(2000)
//!     .drop_exact_duplicates(true)
//!     .output_dir("output")
//!     .build()?;
//!
//! let inspector = Inspector::new(config);
//! let inspection = inspector.inspect(&table)?;
//!
//! for issue in &inspection.report.issues {
//!     println!("[{}] {}: {}", issue.severity, issue.title, issue.details);
//! }
//!
//! inspector.export(&inspection)?;
//! ```
//!
//! # Building Blocks
//!
//! Each stage is also available on its own:
//!
//! ```rust,ignore
//! use drop_inspector::{build_report, clean, detect_issues, load, profile};
//!
//! let table = load(&bytes, "drop.csv")?;
//! let profile = profile(&table);
//! let issues = detect_issues(&table, &profile);
//! let report = build_report(&table, profile, issues);
//! let cleaned = clean(&table, true);
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, clean};
pub use config::{ConfigValidationError, InspectionConfig, InspectionConfigBuilder};
pub use error::{InspectorError, Result as InspectorResult, ResultExt};
pub use loader::{FileFormat, load, load_path};
pub use pipeline::{Inspection, Inspector};
pub use profiler::{DataProfiler, filter_columns, profile, sort_by_missingness};
pub use quality::{DataQualityAnalyzer, Sampler, detect_issues};
pub use reporting::{ExportPaths, ReportGenerator, build_report, table_to_csv};
pub use table::{Column, DataKind, Table, Value, ValueKind};
pub use types::{ColumnProfile, DatasetSummary, Issue, Report, Severity, SeverityCounts};
