//! CSV reading through polars.
//!
//! Column types are inferred over the full file, so every CSV column comes
//! back with a single uniform kind. Date-like strings stay text.

use crate::error::{InspectorError, Result};
use crate::table::{Column, DataKind, Table, Value};
use crate::utils::kind_for_dtype;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use tracing::debug;

/// Cell contents treated as missing while parsing. Empty fields are always
/// missing.
pub const CSV_NULL_TOKENS: [&str; 10] = [
    "NA", "N/A", "n/a", "NULL", "null", "NaN", "nan", "None", "#N/A", "<NA>",
];

pub(crate) fn read_csv(bytes: &[u8]) -> Result<Table> {
    let null_values = NullValues::AllColumns(
        CSV_NULL_TOKENS
            .iter()
            .map(|&token| PlSmallStr::from(token))
            .collect(),
    );

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| InspectorError::MalformedInput(format!("Failed to parse CSV: {}", e)))?;

    debug!("CSV parsed into {} x {} frame", df.height(), df.width());
    dataframe_to_table(&df)
}

/// Convert a polars frame into a tagged [`Table`].
pub(crate) fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let columns = df
        .get_columns()
        .iter()
        .map(|col| series_to_column(col.as_materialized_series()))
        .collect::<Result<Vec<_>>>()?;
    Table::new(columns)
}

fn series_to_column(series: &Series) -> Result<Column> {
    let name = series.name().to_string();

    let (kind, values): (DataKind, Vec<Value>) = match kind_for_dtype(series.dtype()) {
        DataKind::Integer => {
            let casted = series.cast(&DataType::Int64)?;
            let values = casted.i64()?.into_iter().map(Value::from).collect();
            (DataKind::Integer, values)
        }
        DataKind::Float => {
            let casted = series.cast(&DataType::Float64)?;
            let values = casted.f64()?.into_iter().map(Value::from).collect();
            (DataKind::Float, values)
        }
        DataKind::Boolean => {
            let values = series.bool()?.into_iter().map(Value::from).collect();
            (DataKind::Boolean, values)
        }
        // Strings and anything polars could only infer loosely are kept as text.
        _ => {
            let casted = series.cast(&DataType::String)?;
            let values = casted.str()?.into_iter().map(Value::from).collect();
            (DataKind::Text, values)
        }
    };

    Ok(Column::with_kind(name, kind, values))
}
