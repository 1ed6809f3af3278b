use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Discord snowflakes are stored as strings; a row that fails to parse back
    /// into a `u64` indicates corrupted or hand-edited data.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored column holds a value outside its valid range.
    #[error("Invalid stored value '{value}' in column {column}")]
    InvalidStoredValue { column: String, value: String },
}

impl InternalError {
    pub fn invalid_value(column: &str, value: impl ToString) -> Self {
        InternalError::InvalidStoredValue {
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
