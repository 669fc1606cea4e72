//! Table export through polars.

use crate::error::{InspectorError, Result};
use crate::table::Table;
use polars::prelude::*;

/// Convert a table into a polars frame of string columns.
///
/// Cells are rendered the same way the report renders them; nulls stay null.
/// Fails when two columns share a name.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|col| {
            let values: Vec<Option<String>> = col.values().iter().map(|v| v.render()).collect();
            Column::from(Series::new(col.name().into(), values))
        })
        .collect();

    DataFrame::new(columns)
        .map_err(|e| InspectorError::Export(format!("Cannot build frame for export: {}", e)))
}

/// Render a table as CSV text with a header row, preserving column order.
///
/// Header names are written as given, so repeated names survive the export.
/// Polars frames need unique names, so both the header and the body are
/// written from frames with positional column names.
pub fn table_to_csv(table: &Table) -> Result<String> {
    if table.width() == 0 {
        return Ok(String::new());
    }

    let header: Vec<Column> = table
        .column_names()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            Column::from(Series::new(positional_name(idx).into(), vec![name.to_string()]))
        })
        .collect();
    let body: Vec<Column> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            let values: Vec<Option<String>> = col.values().iter().map(|v| v.render()).collect();
            Column::from(Series::new(positional_name(idx).into(), values))
        })
        .collect();

    let mut buffer: Vec<u8> = Vec::new();
    for columns in [header, body] {
        let mut df = DataFrame::new(columns)
            .map_err(|e| InspectorError::Export(format!("Cannot build frame for export: {}", e)))?;
        write_rows(&mut buffer, &mut df)?;
    }

    String::from_utf8(buffer)
        .map_err(|e| InspectorError::Export(format!("CSV output is not UTF-8: {}", e)))
}

fn positional_name(idx: usize) -> String {
    format!("col_{}", idx)
}

fn write_rows(buffer: &mut Vec<u8>, df: &mut DataFrame) -> Result<()> {
    CsvWriter::new(buffer)
        .include_header(false)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .map_err(|e| InspectorError::Export(format!("Failed to write CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(vec![
            crate::table::Column::from_values("id", vec![1i64, 2]),
            crate::table::Column::from_values("price", vec![Some(3.0f64), None]),
            crate::table::Column::from_values("name", vec!["Smith, J", "Ann"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_to_csv() {
        let csv = table_to_csv(&table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["id,price,name", "1,3.0,\"Smith, J\"", "2,,Ann"]);
    }

    #[test]
    fn test_header_only_export() {
        let empty = table().head(0);
        let csv = table_to_csv(&empty).unwrap();
        assert_eq!(csv.trim_end(), "id,price,name");
    }

    #[test]
    fn test_dataframe_keeps_nulls() {
        let df = table_to_dataframe(&table()).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("price").unwrap().null_count(), 1);
    }

    #[test]
    fn test_duplicate_names_survive_export() {
        let t = Table::new(vec![
            crate::table::Column::from_values(" a", vec![1i64, 3]),
            crate::table::Column::from_values("a", vec![2i64, 4]),
        ])
        .unwrap();
        let cleaned = crate::cleaner::clean(&t, true);
        assert_eq!(cleaned.column_names(), vec!["a", "a"]);

        let csv = table_to_csv(&cleaned).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["a,a", "1,2", "3,4"]);
    }

    #[test]
    fn test_header_names_are_quoted() {
        let t = Table::new(vec![
            crate::table::Column::from_values("last, first", vec!["Smith, J"]),
            crate::table::Column::from_values("id", vec![1i64]),
        ])
        .unwrap();
        let csv = table_to_csv(&t).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["\"last, first\",id", "\"Smith, J\",1"]);
    }

    #[test]
    fn test_no_columns_export_is_empty() {
        assert_eq!(table_to_csv(&Table::default()).unwrap(), "");
    }

    #[test]
    fn test_dataframe_rejects_duplicate_names() {
        let t = Table::new(vec![
            crate::table::Column::from_values("a", vec![1i64]),
            crate::table::Column::from_values("a", vec![2i64]),
        ])
        .unwrap();
        let err = table_to_dataframe(&t).unwrap_err();
        assert_eq!(err.error_code(), "EXPORT_FAILED");
    }
}
