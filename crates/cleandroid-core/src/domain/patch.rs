use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::domain::DomainError;

/// Progress of one document through a patch run.
///
/// `NotStarted -> Read -> Patched -> Written`, or `Read -> FailedParse`.
/// A run that has nothing to add, or runs dry, stops at `Patched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStage {
    NotStarted,
    Read,
    Patched,
    Written,
    FailedParse,
}

impl PatchStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Written | Self::FailedParse)
    }
}

impl fmt::Display for PatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::Read => "read",
            Self::Patched => "patched",
            Self::Written => "written",
            Self::FailedParse => "failed to parse",
        };
        f.write_str(s)
    }
}

/// Lines a patcher inserted or found already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub added: Vec<String>,
    pub already_present: Vec<String>,
}

impl PatchReport {
    /// `true` when the document did not change.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
    }

    pub(crate) fn record(&mut self, line: String, present: bool) {
        if present {
            self.already_present.push(line);
        } else {
            self.added.push(line);
        }
    }
}

/// Where dependency declarations go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyMethod {
    /// Versioned coordinates directly in the module build script.
    GradleDirect,
    /// `[versions]` / `[libraries]` entries in `gradle/libs.versions.toml`.
    VersionCatalog,
}

impl DependencyMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GradleDirect => "gradle",
            Self::VersionCatalog => "catalog",
        }
    }
}

impl fmt::Display for DependencyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradle" | "gradle-direct" | "direct" => Ok(Self::GradleDirect),
            "catalog" | "version-catalog" | "toml" => Ok(Self::VersionCatalog),
            _ => Err(DomainError::UnknownCatalogEntry {
                kind: "dependency method",
                name: s.to_string(),
            }),
        }
    }
}
