use thiserror::Error;

/// Errors raised while building or combining feature blocks
///
/// Every variant aborts the current computation; no partially computed
/// matrix is ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Missing column(s): {}", .0.join(", "))]
    MissingColumn(Vec<String>),

    #[error("Invalid window for {name}: {value} (must be a positive integer)")]
    InvalidWindow { name: String, value: i64 },

    #[error("Index mismatch: {0}")]
    IndexMismatch(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid value in column {column} at row {row}: {value}")]
    InvalidValue {
        column: String,
        row: usize,
        value: f64,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

impl FeatureError {
    /// Missing-column error for a single name
    pub fn missing(name: impl Into<String>) -> Self {
        FeatureError::MissingColumn(vec![name.into()])
    }

    /// Rejects a non-positive window parameter
    pub fn check_window(name: &str, value: usize) -> Result<usize> {
        if value == 0 {
            return Err(FeatureError::InvalidWindow {
                name: name.to_string(),
                value: 0,
            });
        }
        Ok(value)
    }
}

pub type Result<T> = std::result::Result<T, FeatureError>;
