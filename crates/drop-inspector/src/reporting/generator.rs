use super::export::table_to_csv;
use crate::config::{DEFAULT_CLEANED_FILE_NAME, DEFAULT_REPORT_FILE_NAME, InspectionConfig};
use crate::error::{InspectorError, Result, ResultExt};
use crate::table::Table;
use crate::types::Report;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the report JSON and the cleaned CSV into an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    report_file_name: String,
    cleaned_file_name: String,
}

/// Paths written by [`ReportGenerator::write_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub report: PathBuf,
    pub cleaned: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(PathBuf::from("output"))
    }
}

impl ReportGenerator {
    /// Create a generator with the default file names.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            cleaned_file_name: DEFAULT_CLEANED_FILE_NAME.to_string(),
        }
    }

    pub fn from_config(config: &InspectionConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            report_file_name: config.report_file_name.clone(),
            cleaned_file_name: config.cleaned_file_name.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_report(&self, report: &Report) -> Result<PathBuf> {
        let json = report.to_json_pretty()?;
        let path = self.output_dir.join(&self.report_file_name);
        self.write_file(&path, json.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    /// Write the cleaned table as CSV.
    pub fn write_cleaned(&self, cleaned: &Table) -> Result<PathBuf> {
        let csv = table_to_csv(cleaned)?;
        let path = self.output_dir.join(&self.cleaned_file_name);
        self.write_file(&path, csv.as_bytes())?;

        info!("Cleaned dataset saved: {}", path.display());
        Ok(path)
    }

    pub fn write_all(&self, report: &Report, cleaned: &Table) -> Result<ExportPaths> {
        Ok(ExportPaths {
            report: self.write_report(report)?,
            cleaned: self.write_cleaned(cleaned)?,
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .map_err(InspectorError::from)
            .context(format!("Failed to create {}", self.output_dir.display()))?;

        let mut file = File::create(path)
            .map_err(InspectorError::from)
            .context(format!("Failed to create {}", path.display()))?;
        file.write_all(contents)?;
        Ok(())
    }
}
