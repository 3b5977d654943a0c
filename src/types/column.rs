use chrono::NaiveDateTime;
use std::fmt;

/// Data type of a log column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

/// A column name and the rule for parsing its raw fields.
///
/// All input fields are strings. Integer and real columns yield `None` on any
/// non-numeric input, including the empty strings both vendors write during
/// sensor or GPS dropout. Text columns are only trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Fallback definition for header names not in a vendor registry.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Parse one raw field according to this column's type.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        match self.column_type {
            ColumnType::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
            ColumnType::Real => trimmed.parse::<f64>().ok().map(Value::Real),
            ColumnType::Text => Some(Value::Text(trimmed.to_string())),
        }
    }
}

/// One parsed cell of a result table.
///
/// Absent values (missing or unparseable sensor data) are represented by the
/// surrounding `Option`, not by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Numeric view of the value, covering both integer and real columns.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}
