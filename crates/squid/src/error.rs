//! Error types for squid

use thiserror::Error;

/// Result type alias for squid operations
pub type SquidResult<T> = Result<T, SquidError>;

/// Errors raised while composing fragments or executing the resulting query.
#[derive(Debug, Error)]
pub enum SquidError {
    /// Identifier contains a double quote (or is otherwise unusable)
    #[error("Invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A row passed to `spread_insert` has a different number of columns than the first row
    #[error("Column mismatch in row {row}: expected {expected} columns, found {found}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row passed to `spread_insert` has no value for a column of the first row
    #[error("Missing value for column '{column}' in row {row}")]
    MissingColumnValue { row: usize, column: String },

    /// A spread helper was given nothing to expand
    #[error("{0} requires at least one column value")]
    EmptyRecord(&'static str),

    /// Literal segments and interpolated values do not alternate
    #[error("Template expects {} values for {texts} text segments, got {values}", .texts.saturating_sub(1))]
    TemplateArity { texts: usize, values: usize },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl SquidError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            reason,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error was raised while building a fragment, as opposed to running it.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. }
                | Self::ColumnMismatch { .. }
                | Self::MissingColumnValue { .. }
                | Self::EmptyRecord(_)
                | Self::TemplateArity { .. }
        )
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for SquidError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
