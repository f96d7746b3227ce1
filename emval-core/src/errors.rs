use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum EmvalError {
    /// A required field could not be parsed or violates its constraint.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// CSV export was requested before any successful calculation.
    #[error("nothing to export: calculate a record first")]
    EmptyRecord,
    #[error("dataset error: {0}")]
    Dataset(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EmvalError {
    /// Shorthand for [`EmvalError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EmvalError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type for `Result<T, EmvalError>`.
pub type EmvalResult<T> = Result<T, EmvalError>;
