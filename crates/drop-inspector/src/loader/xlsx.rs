//! XLSX reading through calamine.
//!
//! Only the first worksheet is read; its first row is the header. Cells keep
//! their own types, so one column may end up holding several kinds.

use crate::error::{InspectorError, Result};
use crate::table::{Column, Table, Value};
use calamine::{Data, DataType, Range, Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

/// Largest integral float that is still converted to an integer cell.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub(crate) fn read_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<Cursor<Vec<u8>>> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| InspectorError::MalformedInput(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InspectorError::MalformedInput("No worksheet found".to_string()))?
        .map_err(|e| InspectorError::MalformedInput(format!("Failed to read Excel range: {}", e)))?;

    debug!(
        "Worksheet range is {} rows x {} columns",
        range.height(),
        range.width()
    );
    range_to_table(&range)
}

fn range_to_table(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(idx, cell))
        .collect();

    let capacity = range.height().saturating_sub(1);
    let mut cells: Vec<Vec<Value>> = vec![Vec::with_capacity(capacity); names.len()];
    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(idx).map(cell_to_value).unwrap_or(Value::Null));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Table::new(columns)
}

fn header_name(idx: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", idx),
        other => {
            let name = other.to_string();
            if name.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name
            }
        }
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Integer(*i),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
            Value::Integer(*f as i64)
        }
        Data::Float(f) => Value::from_float(*f),
        Data::Bool(b) => Value::Boolean(*b),
        Data::String(s) => Value::Text(s.clone()),
        other => other
            .as_datetime()
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(other.to_string())),
    }
}
