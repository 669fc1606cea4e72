//! Dataset loading.
//!
//! Turns an uploaded byte stream into a [`Table`]. The format is chosen from
//! the file name extension; parse failures surface as
//! [`InspectorError::MalformedInput`].

mod csv;
mod xlsx;

pub use csv::CSV_NULL_TOKENS;

use crate::error::{InspectorError, Result, ResultExt};
use crate::table::Table;
use std::path::Path;
use tracing::{debug, info};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a file name (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn from_filename(filename: &str) -> Result<Self> {
        let name = filename.trim().to_lowercase();
        if name.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if name.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else {
            Err(InspectorError::UnsupportedFormat(filename.trim().to_string()))
        }
    }
}

/// Load a dataset from raw bytes.
///
/// A successfully parsed file with no data rows yields an empty table, not
/// an error.
pub fn load(bytes: &[u8], filename: &str) -> Result<Table> {
    let format = FileFormat::from_filename(filename)?;
    debug!("Loading '{}' as {:?} ({} bytes)", filename, format, bytes.len());

    let table = match format {
        FileFormat::Csv => csv::read_csv(bytes)?,
        FileFormat::Xlsx => xlsx::read_xlsx(bytes)?,
    };

    info!(
        "Dataset loaded: {} rows x {} columns",
        table.height(),
        table.width()
    );
    Ok(table)
}

/// Load a dataset from a file on disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    // Reject unknown extensions before touching the file.
    FileFormat::from_filename(&filename)?;

    let bytes = std::fs::read(path)
        .map_err(InspectorError::from)
        .context(format!("Failed to read {}", path.display()))?;
    load(&bytes, &filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataKind;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_filename("data.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_filename("DATA.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_filename("  report.XlSx  ").unwrap(),
            FileFormat::Xlsx
        );
    }

    #[test]
    fn test_unsupported_formats() {
        for name in ["data.json", "data.xls", "data", "data.csv.gz", "csv"] {
            let err = FileFormat::from_filename(name).unwrap_err();
            assert!(
                matches!(err, InspectorError::UnsupportedFormat(_)),
                "{} should be unsupported",
                name
            );
        }
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = load(b"a,b\n1,2\n", "data.txt").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_load_csv_bytes() {
        let table = load(b"id,name\n1,Ann\n2,Bob\n", "people.csv").unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.columns()[0].kind(), DataKind::Integer);
        assert_eq!(table.columns()[1].kind(), DataKind::Text);
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = load_path("/definitely/not/here/data.csv").unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_load_path_checks_extension_first() {
        let err = load_path("/definitely/not/here/data.parquet").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }
}
