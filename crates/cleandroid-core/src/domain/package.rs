use std::{fmt, path::PathBuf, str::FromStr, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

use crate::domain::DomainError;

/// A validated Java/Kotlin package name such as `com.example.app`.
///
/// Invariant: one or more dot-separated identifiers, each starting with an
/// ASCII letter or `_` and continuing with ASCII alphanumerics or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let invalid = |reason: &str| DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        for segment in name.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(invalid("empty segment between dots")),
                Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                    return Err(invalid("segments must start with a letter or '_'"));
                }
                Some(_) => {}
            }
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("segments may only contain letters, digits and '_'"));
            }
        }

        Ok(Self(name.to_string()))
    }

    /// Read the package from a module build script: `applicationId` first,
    /// then `namespace`. Both Kotlin (`= "…"`) and Groovy (`'…'`) forms are
    /// accepted.
    pub fn from_build_script(script: &str) -> Result<Self, DomainError> {
        for pattern in [application_id_pattern(), namespace_pattern()] {
            if let Some(caps) = pattern.captures(script) {
                return Self::parse(&caps[1]);
            }
        }
        Err(DomainError::PackageNotDeclared)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `com.example.app` → `com/example/app`
    pub fn to_relative_path(&self) -> PathBuf {
        self.0.split('.').collect()
    }
}

fn application_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?m)^\s*applicationId\s*=?\s*["']([^"']+)["']"#)
            .expect("applicationId pattern is valid")
    })
}

fn namespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?m)^\s*namespace\s*=?\s*["']([^"']+)["']"#)
            .expect("namespace pattern is valid")
    })
}

impl FromStr for PackageName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
