//! Configuration types for an inspection run.
//!
//! This module provides configuration options using the builder pattern.
//! Detector thresholds are fixed; only sampling, safe-clean behaviour and
//! export locations are configurable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default cap on sampled non-null values per column.
pub const DEFAULT_SAMPLE_SIZE: usize = 2000;

/// Default seed for the deterministic sampler.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Default file name of the exported JSON report.
pub const DEFAULT_REPORT_FILE_NAME: &str = "data_drop_report.json";

/// Default file name of the exported cleaned CSV.
pub const DEFAULT_CLEANED_FILE_NAME: &str = "cleaned_dataset.csv";

/// Configuration for an inspection run.
///
/// Use [`InspectionConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use drop_inspector::config::InspectionConfig;
///
/// let config = InspectionConfig::builder()
///     .sample_size(500)
///     .drop_exact_duplicates(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Maximum number of non-null values sampled per column by the detectors.
    /// Default: 2000
    pub sample_size: usize,

    /// Seed for the sampler. A fixed seed keeps repeated runs identical.
    /// Default: 42
    pub sample_seed: u64,

    /// Whether safe cleaning drops exact duplicate rows.
    /// Default: true
    pub drop_exact_duplicates: bool,

    /// Output directory for the exported report and cleaned data.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// File name of the exported JSON report.
    /// Default: "data_drop_report.json"
    pub report_file_name: String,

    /// File name of the exported cleaned CSV.
    /// Default: "cleaned_dataset.csv"
    pub cleaned_file_name: String,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_seed: DEFAULT_SAMPLE_SEED,
            drop_exact_duplicates: true,
            output_dir: PathBuf::from("output"),
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            cleaned_file_name: DEFAULT_CLEANED_FILE_NAME.to_string(),
        }
    }
}

impl InspectionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> InspectionConfigBuilder {
        InspectionConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(self.sample_size));
        }

        if self.report_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName(
                "report_file_name".to_string(),
            ));
        }

        if self.cleaned_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName(
                "cleaned_file_name".to_string(),
            ));
        }

        Ok(())
    }

    /// Full path of the exported report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }

    /// Full path of the exported cleaned CSV.
    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    #[error("File name for '{0}' must not be empty")]
    EmptyFileName(String),
}

impl From<ConfigValidationError> for crate::error::InspectorError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InspectorError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`InspectionConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct InspectionConfigBuilder {
    sample_size: Option<usize>,
    sample_seed: Option<u64>,
    drop_exact_duplicates: Option<bool>,
    output_dir: Option<PathBuf>,
    report_file_name: Option<String>,
    cleaned_file_name: Option<String>,
}

impl InspectionConfigBuilder {
    /// Set the per-column sampling cap used by every detector.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Set the sampler seed.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Enable or disable exact-duplicate removal during safe cleaning.
    pub fn drop_exact_duplicates(mut self, drop: bool) -> Self {
        self.drop_exact_duplicates = Some(drop);
        self
    }

    /// Set the output directory for exports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = Some(name.into());
        self
    }

    pub fn cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = Some(name.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `InspectionConfig` or an error if validation fails.
    pub fn build(self) -> Result<InspectionConfig, ConfigValidationError> {
        let config = InspectionConfig {
            sample_size: self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            sample_seed: self.sample_seed.unwrap_or(DEFAULT_SAMPLE_SEED),
            drop_exact_duplicates: self.drop_exact_duplicates.unwrap_or(true),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("output")),
            report_file_name: self
                .report_file_name
                .unwrap_or_else(|| DEFAULT_REPORT_FILE_NAME.to_string()),
            cleaned_file_name: self
                .cleaned_file_name
                .unwrap_or_else(|| DEFAULT_CLEANED_FILE_NAME.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
