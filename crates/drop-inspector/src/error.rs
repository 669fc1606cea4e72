//! Custom error types for the inspection engine.
//!
//! This module provides the error hierarchy using `thiserror`.
//!
//! Load-time failures (`UnsupportedFormat`, `MalformedInput`) are fatal to the
//! load operation and surfaced to the caller. Per-column failures
//! (`ColumnComputation`) are recovered where they happen and never abort a run.
//! Errors are serializable so a front end can display them.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the inspection engine.
#[derive(Error, Debug)]
pub enum InspectorError {
    /// File extension is not one of the supported formats.
    #[error("Unsupported file type '{0}'. Please upload a CSV or XLSX.")]
    UnsupportedFormat(String),

    /// The file has a supported extension but could not be parsed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A single column could not be processed by one profiling or detection step.
    #[error("Computation failed for column '{column}': {reason}")]
    ColumnComputation { column: String, reason: String },

    /// Columns of a table do not share a common length.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Exporting the report or the cleaned table failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InspectorError>,
    },
}

impl InspectorError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InspectorError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wrap a per-column failure so it can be logged uniformly.
    pub fn column_computation(column: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        InspectorError::ColumnComputation {
            column: column.into(),
            reason: reason.to_string(),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::ColumnComputation { .. } => "COLUMN_COMPUTATION_FAILED",
            Self::InvalidTable(_) => "INVALID_TABLE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Export(_) => "EXPORT_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was raised while loading the input file.
    pub fn is_load_error(&self) -> bool {
        match self {
            Self::UnsupportedFormat(_) | Self::MalformedInput(_) => true,
            Self::WithContext { source, .. } => source.is_load_error(),
            _ => false,
        }
    }

    /// Check if this error is recovered locally by skipping a column.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ColumnComputation { .. })
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InspectorError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InspectorError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InspectorError::Polars(e).with_context(context))
    }
}
