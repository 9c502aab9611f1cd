use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Source root for Kotlin/Java code, relative to the project root.
pub const SOURCE_ROOT: &str = "app/src/main/java";

/// A file inside an Android project the tool reads or patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectFile {
    Manifest,
    BuildScript,
    VersionCatalog,
}

impl ProjectFile {
    /// Conventional locations, relative to the project root, in order of
    /// preference.
    pub fn conventional_paths(self) -> &'static [&'static str] {
        match self {
            Self::Manifest => &["app/src/main/AndroidManifest.xml"],
            Self::BuildScript => &["app/build.gradle.kts", "app/build.gradle"],
            Self::VersionCatalog => &["gradle/libs.versions.toml"],
        }
    }

    /// Directory searched when no conventional path exists.
    pub fn search_root(self) -> &'static str {
        match self {
            Self::Manifest | Self::BuildScript => "app",
            Self::VersionCatalog => "gradle",
        }
    }

    /// Whether a path found during a search is a candidate for this file.
    pub fn matches(self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        match self {
            // Only the main source set; debug/release overlays are not the target.
            Self::Manifest => {
                name == "AndroidManifest.xml"
                    && path
                        .parent()
                        .and_then(|p| p.file_name())
                        .is_some_and(|p| p == "main")
            }
            Self::BuildScript => name == "build.gradle.kts" || name == "build.gradle",
            Self::VersionCatalog => name.ends_with(".versions.toml"),
        }
    }

    pub fn source_root(project_root: &Path) -> PathBuf {
        project_root.join(SOURCE_ROOT)
    }
}

impl fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Manifest => "AndroidManifest.xml",
            Self::BuildScript => "module build script",
            Self::VersionCatalog => "version catalog",
        };
        f.write_str(s)
    }
}
