//! Application layer errors.
//!
//! These errors represent failures in orchestration: I/O, locating project
//! files, and documents that could not be patched. Catalog and document rules
//! are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, ProjectFile};
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A project file was not found at its conventional path or by search.
    #[error("Could not find the {file} under {}", root.display())]
    FileNotFound { file: ProjectFile, root: PathBuf },

    /// Search found more than one candidate and none is conventional.
    #[error("Found {} candidates for the {file}", candidates.len())]
    AmbiguousFile {
        file: ProjectFile,
        candidates: Vec<PathBuf>,
    },

    /// The document does not have the expected structure; nothing was written.
    #[error("Failed to parse {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// The project root does not exist or is not a directory.
    #[error("Not a project directory: {}", path.display())]
    NotAProject { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::FileNotFound { file, .. } => {
                let mut hints: Vec<String> = file
                    .conventional_paths()
                    .iter()
                    .map(|p| format!("Expected at: {p}"))
                    .collect();
                hints.push("Run the command from the Android project root, or pass the root path".into());
                hints
            }
            Self::AmbiguousFile { candidates, .. } => {
                let mut hints: Vec<String> = candidates
                    .iter()
                    .map(|c| format!("Candidate: {}", c.display()))
                    .collect();
                hints.push("Move the intended file to its conventional location".into());
                hints
            }
            Self::ParseFailed { source, .. } => source.suggestions(),
            Self::NotAProject { .. } => vec![
                "Pass the path of an Android project root".into(),
                "The directory must contain an `app` module".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::FileNotFound { .. } | Self::NotAProject { .. } => ErrorCategory::NotFound,
            Self::AmbiguousFile { .. } => ErrorCategory::Validation,
            Self::ParseFailed { .. } => ErrorCategory::Parse,
        }
    }
}
