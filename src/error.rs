use thiserror::Error;

/// Error type for every fallible operation in the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Columns '{first}' and '{second}' do not share a parent")]
    ParentMismatch { first: String, second: String },

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Column path selected more than once: {0}")]
    DuplicateColumnPath(String),

    #[error("Column '{0}' is not a column group")]
    NotAColumnGroup(String),

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Type mismatch in '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Cast error: {0}")]
    Cast(String),

    #[error("No common numeric type: {0}")]
    NoCommonNumericType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid regex: {0}")]
    InvalidRegex(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Coarse classification of [`Error`], matching how callers are expected to recover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A selector or path did not resolve against the column tree
    Resolution,
    /// A non-null reduction was asked of an empty input
    EmptyResult,
    /// Row counts or column lengths do not line up
    Shape,
    /// A cast, subtype check or numeric unification failed
    Type,
    /// An argument was out of its valid domain
    Input,
    /// Reading or decoding configuration failed
    Io,
}

impl Error {
    /// Returns the taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ColumnNotFound(_)
            | Error::ParentMismatch { .. }
            | Error::DuplicateColumnPath(_)
            | Error::NotAColumnGroup(_) => ErrorKind::Resolution,
            Error::EmptyResult(_) => ErrorKind::EmptyResult,
            Error::DuplicateColumnName(_)
            | Error::IndexOutOfBounds { .. }
            | Error::InconsistentRowCount { .. } => ErrorKind::Shape,
            Error::TypeMismatch { .. } | Error::Cast(_) | Error::NoCommonNumericType(_) => {
                ErrorKind::Type
            }
            Error::InvalidInput(_) | Error::InvalidRegex(_) => ErrorKind::Input,
            Error::Config(_) | Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidRegex(err.to_string())
    }
}
