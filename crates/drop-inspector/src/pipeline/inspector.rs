//! One inspection run: profile, detect, assemble, clean.

use crate::cleaner::DataCleaner;
use crate::config::InspectionConfig;
use crate::error::Result;
use crate::profiler::DataProfiler;
use crate::quality::DataQualityAnalyzer;
use crate::reporting::{ExportPaths, ReportGenerator, build_report};
use crate::table::Table;
use crate::types::Report;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of [`Inspector::inspect`].
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Report computed on the table as loaded.
    pub report: Report,
    /// Safe-cleaned copy of the table.
    pub cleaned: Table,
    /// Human-readable list of the cleaning steps that changed something.
    pub cleaning_actions: Vec<String>,
}

/// Runs the inspection workflow over a loaded table.
///
/// # Example
///
/// ```rust,ignore
/// use drop_inspector::{InspectionConfig, Inspector, load_path};
///
/// let table = load_path("sales.csv")?;
/// let inspection = Inspector::new(InspectionConfig::default()).inspect(&table)?;
/// println!("{}", inspection.report.to_json_pretty()?);
/// ```
#[derive(Debug, Clone)]
pub struct Inspector {
    config: InspectionConfig,
    analyzer: DataQualityAnalyzer,
    cleaner: DataCleaner,
}

// Inspections may be handed to a worker thread by the caller.
static_assertions::assert_impl_all!(Inspector: Send, Sync);
static_assertions::assert_impl_all!(Inspection: Send);

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectionConfig::default())
    }
}

impl Inspector {
    pub fn new(config: InspectionConfig) -> Self {
        let analyzer = DataQualityAnalyzer::with_sampling(config.sample_size, config.sample_seed);
        let cleaner = DataCleaner::new(config.drop_exact_duplicates);
        Self {
            config,
            analyzer,
            cleaner,
        }
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    /// Profile the table, detect issues, assemble the report and clean a copy.
    ///
    /// The report always describes the table as given, never the cleaned copy.
    pub fn inspect(&self, table: &Table) -> Result<Inspection> {
        self.config.validate()?;
        let start_time = Instant::now();

        info!(
            "Starting inspection of {} rows x {} columns",
            table.height(),
            table.width()
        );

        let profile = DataProfiler::profile_table(table);
        debug!("Profiled {} columns", profile.len());

        let issues = self.analyzer.identify_issues(table, &profile);
        let report = build_report(table, profile, issues);

        let (cleaned, cleaning_actions) = self.cleaner.perform_safe_cleaning(table);

        info!(
            "Inspection finished in {} ms: {} issues, {} rows after cleaning",
            start_time.elapsed().as_millis(),
            report.issues.len(),
            cleaned.height()
        );

        Ok(Inspection {
            report,
            cleaned,
            cleaning_actions,
        })
    }

    /// Write the report and the cleaned table into the configured directory.
    pub fn export(&self, inspection: &Inspection) -> Result<ExportPaths> {
        ReportGenerator::from_config(&self.config).write_all(&inspection.report, &inspection.cleaned)
    }
}
