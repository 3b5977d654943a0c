use std::fmt;

/// Custom error types for flight log parsing
#[derive(Debug)]
pub enum FdrError {
    /// I/O errors
    Io(std::io::Error),
    /// CSV record errors from the underlying reader
    Csv(csv::Error),
    /// Unrecognized or structurally invalid file format
    Format(String),
    /// A requested column is not present in the file and is not a virtual column
    ColumnNotFound(String),
    /// A data row is malformed beyond an expected absent value
    Parse(String),
}

impl fmt::Display for FdrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FdrError::Io(err) => write!(f, "I/O error: {}", err),
            FdrError::Csv(err) => write!(f, "CSV error: {}", err),
            FdrError::Format(msg) => write!(f, "Format error: {}", msg),
            FdrError::ColumnNotFound(name) => write!(f, "Column not found: {}", name),
            FdrError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FdrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FdrError::Io(err) => Some(err),
            FdrError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FdrError {
    fn from(err: std::io::Error) -> Self {
        FdrError::Io(err)
    }
}

impl From<csv::Error> for FdrError {
    fn from(err: csv::Error) -> Self {
        FdrError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, FdrError>;
