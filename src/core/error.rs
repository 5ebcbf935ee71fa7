//! Typed errors for the view pipeline
//!
//! The pipeline itself never fails once it is wired: empty results and
//! out-of-range pages are ordinary states. Errors only surface when a view
//! is built from untyped input (field names, raw values, query parameters,
//! configuration) or when the record source cannot deliver its records.
//!
//! # Example
//!
//! ```rust,ignore
//! match SortKey::<ReservationField>::parse("amount:desc") {
//!     Err(ViewError::UnknownField { resource, field }) => {
//!         eprintln!("{resource} has no sortable field {field}");
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ViewError>;

/// The error type of the view pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// A field name that the record type does not expose
    #[error("unknown field '{field}' for {resource}")]
    UnknownField {
        resource: &'static str,
        field: String,
    },

    /// A predicate applied to a field whose kind does not support it
    #[error("{predicate} filter is not supported on field '{field}'")]
    UnsupportedPredicate {
        field: &'static str,
        predicate: &'static str,
    },

    /// A raw value that could not be interpreted for its field
    #[error("invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Malformed query parameters (filter JSON, sort expression)
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The record source failed to deliver records
    #[error("failed to load records: {0}")]
    Load(String),

    /// Configuration could not be parsed or validated
    #[error("configuration error: {0}")]
    Config(String),
}

impl ViewError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::UnknownField { .. } => "UNKNOWN_FIELD",
            ViewError::UnsupportedPredicate { .. } => "UNSUPPORTED_PREDICATE",
            ViewError::InvalidValue { .. } => "INVALID_VALUE",
            ViewError::InvalidQuery(_) => "INVALID_QUERY",
            ViewError::Load(_) => "LOAD_FAILED",
            ViewError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the error comes from wiring the view rather than from I/O
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ViewError::Load(_))
    }

    pub(crate) fn invalid_value(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ViewError::InvalidValue {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::InvalidQuery(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViewError {
    fn from(err: serde_yaml::Error) -> Self {
        ViewError::Config(err.to_string())
    }
}
