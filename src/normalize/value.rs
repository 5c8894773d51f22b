//! Untyped snapshot values and rows.

use std::collections::HashMap;

use rusqlite::types::Value as SqlValue;

/// A loosely-typed scalar as read from a snapshot cell.
///
/// `List` covers sources that already hand over a native sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    List(Vec<RawValue>),
}

impl RawValue {
    /// True for values that carry nothing: null, `""`, zero, NaN, empty blobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Integer(n) => *n == 0,
            Self::Real(r) => *r == 0.0 || r.is_nan(),
            Self::Text(text) => text.is_empty(),
            Self::Blob(bytes) => bytes.is_empty(),
            Self::List(_) => false,
        }
    }

    /// String form of the value, `None` for null and undecodable blobs.
    #[must_use]
    pub fn text_form(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Integer(n) => Some(n.to_string()),
            Self::Real(r) => Some(r.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Blob(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::List(items) => Some(
                items
                    .iter()
                    .map(|item| item.text_form().unwrap_or_else(|| "null".to_string()))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

impl From<SqlValue> for RawValue {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => Self::Null,
            SqlValue::Integer(n) => Self::Integer(n),
            SqlValue::Real(r) => Self::Real(r),
            SqlValue::Text(text) => Self::Text(text),
            SqlValue::Blob(bytes) => Self::Blob(bytes),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One snapshot row: column name to untyped value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    columns: HashMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        self.columns.insert(column.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.columns.get(column)
    }

    /// First candidate column holding a non-empty value.
    #[must_use]
    pub fn first_present(&self, candidates: &[&str]) -> Option<&RawValue> {
        candidates
            .iter()
            .filter_map(|column| self.columns.get(*column))
            .find(|value| !value.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}
