//! In-memory table model with explicitly tagged cell values.
//!
//! Every cell carries its own [`Value`] tag, so a column can hold heterogeneous
//! values under one declared [`DataKind`]. That heterogeneity is itself a
//! detectable quality issue (see the mixed-types detector).

use crate::error::{InspectorError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Format used when rendering date/time cells as text.
pub const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Cell Values
// =============================================================================

/// A single cell value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text(String),
}

/// The tag of a non-null [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    DateTime,
    Text,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::DateTime => "datetime",
            ValueKind::Text => "text",
        }
    }
}

impl Value {
    /// Build a float cell; NaN is stored as a null.
    pub fn from_float(value: f64) -> Self {
        if value.is_nan() {
            Value::Null
        } else {
            Value::Float(value)
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The tag of this value, or `None` for nulls.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Integer(_) => Some(ValueKind::Integer),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::DateTime(_) => Some(ValueKind::DateTime),
            Value::Text(_) => Some(ValueKind::Text),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of integer and float cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Render the value as text, the way it would appear in an exported CSV.
    ///
    /// Returns `None` for nulls.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::Boolean(b) => Some(b.to_string()),
            Value::DateTime(dt) => Some(dt.format(DATETIME_DISPLAY_FORMAT).to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }

    /// Order two values of a comparable kind.
    ///
    /// Integers and floats compare numerically with each other; date/times
    /// compare with date/times. Anything else is unorderable.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}

/// Floats keep a trailing `.0` when integral so they stay distinguishable from integers.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Bit pattern used for float equality and hashing; `-0.0` equals `0.0`.
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => float_key(*f).hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::DateTime(dt) => dt.hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

/// Values serialize to their natural JSON form; date/times as ISO 8601 strings.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Declared Column Types
// =============================================================================

/// The declared (resolved) storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Integer,
    Float,
    Boolean,
    DateTime,
    Text,
    /// Heterogeneous or unresolvable content.
    Object,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Integer => "integer",
            DataKind::Float => "float",
            DataKind::Boolean => "boolean",
            DataKind::DateTime => "datetime",
            DataKind::Text => "text",
            DataKind::Object => "object",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataKind::Integer | DataKind::Float)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, DataKind::DateTime)
    }

    /// Text and catch-all columns are the ones safe cleaning touches.
    pub fn is_textual(&self) -> bool {
        matches!(self, DataKind::Text | DataKind::Object)
    }

    /// Resolve the declared kind of a column from its cells.
    ///
    /// A single tag wins outright, integers mixed only with floats resolve to
    /// float, and anything else (including an all-null column) is `Object`.
    pub fn resolve(values: &[Value]) -> DataKind {
        let kinds: HashSet<ValueKind> = values.iter().filter_map(Value::kind).collect();

        if kinds.len() == 1 {
            return match kinds.into_iter().next() {
                Some(ValueKind::Integer) => DataKind::Integer,
                Some(ValueKind::Float) => DataKind::Float,
                Some(ValueKind::Boolean) => DataKind::Boolean,
                Some(ValueKind::DateTime) => DataKind::DateTime,
                Some(ValueKind::Text) => DataKind::Text,
                None => DataKind::Object,
            };
        }

        if kinds.len() == 2
            && kinds.contains(&ValueKind::Integer)
            && kinds.contains(&ValueKind::Float)
        {
            return DataKind::Float;
        }

        DataKind::Object
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Columns
// =============================================================================

/// A named column of cells with a declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: DataKind,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, resolving its declared kind from the cells.
    ///
    /// Integer cells in a column that resolves to float are promoted to floats.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let kind = DataKind::resolve(&values);
        let values = if kind == DataKind::Float {
            values
                .into_iter()
                .map(|v| match v {
                    Value::Integer(i) => Value::Float(i as f64),
                    other => other,
                })
                .collect()
        } else {
            values
        };

        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a column with an explicitly declared kind.
    pub fn with_kind(name: impl Into<String>, kind: DataKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Convenience constructor from anything convertible into [`Value`].
    pub fn from_values<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn non_null_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Number of distinct non-null values.
    pub fn unique_count(&self) -> usize {
        self.non_null_values().collect::<HashSet<_>>().len()
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }
}

// =============================================================================
// Tables
// =============================================================================

/// An ordered collection of equally long columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(InspectorError::InvalidTable(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name(),
                    bad.len(),
                    expected
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// All cells of one row, in column order.
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// Marks every row that exactly repeats an earlier row.
    pub fn duplicate_mask(&self) -> Vec<bool> {
        let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(self.height());
        (0..self.height())
            .map(|idx| !seen.insert(self.row(idx)))
            .collect()
    }

    /// Count of rows that exactly repeat an earlier row.
    pub fn duplicate_row_count(&self) -> usize {
        self.duplicate_mask().into_iter().filter(|dup| *dup).count()
    }

    /// Total null cells across all columns.
    pub fn missing_cells_total(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let keep: Vec<bool> = (0..self.height()).map(|idx| idx < n).collect();
        self.filter_rows(&keep)
    }

    /// Keep the rows whose mask entry is `true`.
    pub(crate) fn filter_rows(&self, keep: &[bool]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let values = col
                    .values
                    .iter()
                    .zip(keep)
                    .filter(|(_, kept)| **kept)
                    .map(|(v, _)| v.clone())
                    .collect();
                Column::with_kind(col.name.clone(), col.kind, values)
            })
            .collect();
        Table { columns }
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }
}
