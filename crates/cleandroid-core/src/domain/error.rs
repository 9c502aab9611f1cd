// ============================================================================
// domain/error.rs - DOCUMENT AND CATALOG ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so services can wrap them with the offending path)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors (document structure not as expected)
    // ========================================================================
    #[error("{document}: expected anchor `{anchor}` was not found")]
    MissingAnchor {
        document: &'static str,
        anchor: &'static str,
    },

    #[error("{document} is malformed: {reason}")]
    MalformedDocument {
        document: &'static str,
        reason: String,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("No applicationId or namespace declared in the module build script")]
    PackageNotDeclared,

    #[error("Unknown {kind} '{name}'")]
    UnknownCatalogEntry { kind: &'static str, name: String },

    #[error("Duplicate path in layout: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingAnchor { document, anchor } => vec![
                format!("{document} must contain `{anchor}`"),
                "Check that the file is complete and not truncated".into(),
                "No changes were written to the file".into(),
            ],
            Self::MalformedDocument { document, .. } => vec![
                format!("Fix the syntax of {document} and re-run"),
                "No changes were written to the file".into(),
            ],
            Self::InvalidPackageName { .. } => vec![
                "Package names are dot-separated Java identifiers".into(),
                "Example: com.example.myapp".into(),
            ],
            Self::PackageNotDeclared => vec![
                "Pass the package explicitly with --package com.example.app".into(),
                "Or declare `applicationId` / `namespace` in app/build.gradle(.kts)".into(),
            ],
            Self::UnknownCatalogEntry { kind, .. } => vec![
                format!("Run `cleandroid list` to see every known {kind}"),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingAnchor { .. } | Self::MalformedDocument { .. } => ErrorCategory::Parse,
            Self::InvalidPackageName { .. } | Self::UnknownCatalogEntry { .. } => {
                ErrorCategory::Validation
            }
            Self::PackageNotDeclared => ErrorCategory::NotFound,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Parse,
    NotFound,
    Internal,
}
