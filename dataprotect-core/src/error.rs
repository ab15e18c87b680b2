//! Unified error type definition

use thiserror::Error;

// Re-export library error types
pub use dataprotect_provider::{ApiError, TaskError};

use crate::diagnostics::Diagnostic;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// An attribute failed local validation; no API call was made.
    #[error("Invalid value for '{field}': {detail}")]
    Validation { field: String, detail: String },

    /// The object does not exist where existence is required (import, read-back).
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    /// An import identifier could not be parsed.
    #[error("Invalid import id '{id}': {detail}")]
    InvalidImportId { id: String, detail: String },

    /// The backend accepted an operation but its response lacks data needed to continue.
    #[error("Incomplete response: {0}")]
    IncompleteResponse(String),

    /// A deferred operation did not complete.
    #[error("{context}: {source}")]
    Task {
        /// What was being waited for, phrased as a diagnostic summary.
        context: String,
        #[source]
        source: TaskError,
    },

    /// Control-plane API error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    pub(crate) fn validation(field: &str, detail: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn task(context: impl Into<String>, source: TaskError) -> Self {
        Self::Task {
            context: context.into(),
            source,
        }
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::NotFound { .. } | Self::InvalidImportId { .. } => true,
            Self::Task { source, .. } => matches!(
                source,
                TaskError::TaskFailed { .. } | TaskError::Cancelled { .. }
            ),
            Self::Api(e) => e.is_expected(),
            Self::IncompleteResponse(_) => false,
        }
    }

    /// Whether the API reported the addressed object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Convert into the diagnostic shown to the user.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Task { context, source } => Diagnostic::error(context, source.to_string()),
            Self::Validation { .. } => Diagnostic::error("Invalid attribute value", self.to_string()),
            Self::NotFound { .. } => Diagnostic::error("Object not found", self.to_string()),
            Self::InvalidImportId { .. } => {
                Diagnostic::error("Invalid import identifier", self.to_string())
            }
            Self::IncompleteResponse(_) => {
                Diagnostic::error("Unexpected control-plane response", self.to_string())
            }
            Self::Api(e) => Diagnostic::error("Control-plane API request failed", e.to_string()),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
