//! Unified error handling for cleandroid core.
//!
//! Wraps domain and application errors behind one type with a display
//! category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cleandroid core operations.
#[derive(Debug, Error, Clone)]
pub enum CleandroidError {
    /// Errors from the domain layer (catalog lookups, document structure).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, file discovery, parse failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CleandroidError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `cleandroid config list` to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in cleandroid".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Parse => ErrorCategory::Parse,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Parse,
    NotFound,
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CleandroidResult<T> = Result<T, CleandroidError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn parse_failures_keep_their_category() {
        let err: CleandroidError = ApplicationError::ParseFailed {
            path: PathBuf::from("app/src/main/AndroidManifest.xml"),
            source: DomainError::MissingAnchor {
                document: "AndroidManifest.xml",
                anchor: "</manifest>",
            },
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert!(err.to_string().contains("</manifest>"));
    }

    #[test]
    fn domain_category_is_mapped() {
        let err: CleandroidError = DomainError::PackageNotDeclared.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.suggestions().is_empty());
    }
}
