//! Static catalogs: architecture layers, permission categories and
//! dependency entries.
//!
//! Everything here is `static` data. Nothing is computed at runtime, so the
//! whole catalog can be audited by reading this file top to bottom.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::domain::{DomainError, gradle::GradleDialect};

// ── Layers ────────────────────────────────────────────────────────────────────

/// One of the three Clean Architecture partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Domain,
    Data,
    Presentation,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Domain, Layer::Data, Layer::Presentation];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Data => "data",
            Self::Presentation => "presentation",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folder layout and README text for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub name: Layer,
    /// Relative to the layer directory, in creation order.
    pub subfolders: &'static [&'static str],
    pub readme: &'static str,
}

static LAYERS: [LayerSpec; 3] = [
    LayerSpec {
        name: Layer::Domain,
        subfolders: &["model", "repository", "usecase"],
        readme: "# Domain layer\n\n\
                 This layer contains business logic and domain models. It has no \
                 dependency on Android framework classes.\n\n\
                 - `model`: Core business objects.\n\
                 - `repository`: Repository interfaces implemented by the data layer.\n\
                 - `usecase`: Operations the application can perform.\n",
    },
    LayerSpec {
        name: Layer::Data,
        subfolders: &["local", "remote", "repository"],
        readme: "# Data layer\n\n\
                 This layer handles data operations and implements the domain \
                 repository interfaces.\n\n\
                 - `local`: Local data sources, like a Room database.\n\
                 - `remote`: Remote data sources, like Retrofit APIs.\n\
                 - `repository`: Repository implementations combining the sources.\n",
    },
    LayerSpec {
        name: Layer::Presentation,
        subfolders: &["ui", "viewmodel"],
        readme: "# Presentation layer\n\n\
                 This layer manages the UI and user interaction.\n\n\
                 - `ui`: Activities, Fragments, and Composables.\n\
                 - `viewmodel`: ViewModels holding UI state.\n",
    },
];

/// All layers, in generation order.
pub fn layers() -> &'static [LayerSpec] {
    &LAYERS
}

// ── Permissions ───────────────────────────────────────────────────────────────

/// Name of a permission category.
///
/// Categories are cumulative: every level contains the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Basic,
    Beginner,
    Intermediate,
    Advanced,
}

impl PermissionLevel {
    pub const ALL: [PermissionLevel; 4] = [
        PermissionLevel::Basic,
        PermissionLevel::Beginner,
        PermissionLevel::Intermediate,
        PermissionLevel::Advanced,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// The catalog entry for this level.
    pub fn category(self) -> &'static PermissionCategory {
        &PERMISSION_CATEGORIES[self as usize]
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownCatalogEntry {
                kind: "permission category",
                name: s.to_string(),
            })
    }
}

/// A named set of Android permission identifiers.
///
/// Identifiers without a dot are short names under `android.permission.`;
/// identifiers containing a dot are used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCategory {
    pub name: PermissionLevel,
    pub permissions: &'static [&'static str],
}

// Indexed by `PermissionLevel as usize`.
static PERMISSION_CATEGORIES: [PermissionCategory; 4] = [
    PermissionCategory {
        name: PermissionLevel::Basic,
        permissions: &[
            "INTERNET",
            "ACCESS_NETWORK_STATE",
            "ACCESS_WIFI_STATE",
            "READ_EXTERNAL_STORAGE",
        ],
    },
    PermissionCategory {
        name: PermissionLevel::Beginner,
        permissions: &[
            "INTERNET",
            "ACCESS_NETWORK_STATE",
            "ACCESS_WIFI_STATE",
            "READ_EXTERNAL_STORAGE",
            "CAMERA",
            "ACCESS_FINE_LOCATION",
            "BLUETOOTH",
        ],
    },
    PermissionCategory {
        name: PermissionLevel::Intermediate,
        permissions: &[
            "INTERNET",
            "ACCESS_NETWORK_STATE",
            "ACCESS_WIFI_STATE",
            "READ_EXTERNAL_STORAGE",
            "CAMERA",
            "ACCESS_FINE_LOCATION",
            "BLUETOOTH",
            "READ_SMS",
            "WRITE_SETTINGS",
            "BLUETOOTH_ADMIN",
            "ACCESS_COARSE_LOCATION",
        ],
    },
    PermissionCategory {
        name: PermissionLevel::Advanced,
        permissions: &[
            "INTERNET",
            "ACCESS_NETWORK_STATE",
            "ACCESS_WIFI_STATE",
            "READ_EXTERNAL_STORAGE",
            "CAMERA",
            "ACCESS_FINE_LOCATION",
            "BLUETOOTH",
            "READ_SMS",
            "WRITE_SETTINGS",
            "BLUETOOTH_ADMIN",
            "ACCESS_COARSE_LOCATION",
            "USE_BIOMETRIC",
            "INSTALL_PACKAGES",
            "REQUEST_INSTALL_PACKAGES",
        ],
    },
];

/// All permission categories, from `basic` to `advanced`.
pub fn permission_categories() -> &'static [PermissionCategory] {
    &PERMISSION_CATEGORIES
}

// ── Dependencies ──────────────────────────────────────────────────────────────

/// Gradle configuration a dependency is declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    Implementation,
    Kapt,
}

impl Configuration {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implementation => "implementation",
            Self::Kapt => "kapt",
        }
    }
}

/// A Gradle plugin that ships alongside a library in the version catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPlugin {
    pub alias: &'static str,
    pub id: &'static str,
}

/// One library the tool knows how to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    /// Library alias, also used as the `[libraries]` key.
    pub library: &'static str,
    pub group: &'static str,
    pub artifact: &'static str,
    pub version: &'static str,
    /// `[versions]` key. Shared by artifacts released together.
    pub version_key: &'static str,
    pub configuration: Configuration,
    pub plugin: Option<CatalogPlugin>,
}

impl DependencyEntry {
    /// `group:artifact:version`
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Declaration line for the module build script, without indentation.
    pub fn gradle_line(&self, dialect: GradleDialect) -> String {
        let configuration = self.configuration.as_str();
        match dialect {
            GradleDialect::Kotlin => format!("{configuration}(\"{}\")", self.coordinates()),
            GradleDialect::Groovy => format!("{configuration} '{}'", self.coordinates()),
        }
    }

    /// `[versions]` line, e.g. `glide = "4.16.0"`.
    pub fn catalog_version_line(&self) -> String {
        format!("{} = \"{}\"", self.version_key, self.version)
    }

    /// `[libraries]` line referencing [`Self::catalog_version_line`].
    pub fn catalog_declaration_line(&self) -> String {
        format!(
            "{} = {{ module = \"{}:{}\", version.ref = \"{}\" }}",
            self.library, self.group, self.artifact, self.version_key
        )
    }

    /// `[plugins]` line, when the library comes with a Gradle plugin.
    pub fn catalog_plugin_line(&self) -> Option<String> {
        self.plugin.as_ref().map(|plugin| {
            format!(
                "{} = {{ id = \"{}\", version.ref = \"{}\" }}",
                plugin.alias, plugin.id, self.version_key
            )
        })
    }
}

static DEPENDENCY_ENTRIES: [DependencyEntry; 10] = [
    DependencyEntry {
        library: "glide",
        group: "com.github.bumptech.glide",
        artifact: "glide",
        version: "4.16.0",
        version_key: "glide",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "lifecycle-runtime-ktx",
        group: "androidx.lifecycle",
        artifact: "lifecycle-runtime-ktx",
        version: "2.6.1",
        version_key: "lifecycle",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "lifecycle-viewmodel-ktx",
        group: "androidx.lifecycle",
        artifact: "lifecycle-viewmodel-ktx",
        version: "2.6.1",
        version_key: "lifecycle",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "hilt-android",
        group: "com.google.dagger",
        artifact: "hilt-android",
        version: "2.51.1",
        version_key: "hilt",
        configuration: Configuration::Implementation,
        plugin: Some(CatalogPlugin {
            alias: "dagger-hilt-android",
            id: "com.google.dagger.hilt.android",
        }),
    },
    DependencyEntry {
        library: "hilt-compiler",
        group: "com.google.dagger",
        artifact: "hilt-compiler",
        version: "2.51.1",
        version_key: "hilt",
        configuration: Configuration::Kapt,
        plugin: None,
    },
    DependencyEntry {
        library: "retrofit",
        group: "com.squareup.retrofit2",
        artifact: "retrofit",
        version: "2.9.0",
        version_key: "retrofit",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "okhttp",
        group: "com.squareup.okhttp3",
        artifact: "okhttp",
        version: "4.11.0",
        version_key: "okhttp",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "room-runtime",
        group: "androidx.room",
        artifact: "room-runtime",
        version: "2.6.0",
        version_key: "room",
        configuration: Configuration::Implementation,
        plugin: None,
    },
    DependencyEntry {
        library: "room-compiler",
        group: "androidx.room",
        artifact: "room-compiler",
        version: "2.6.0",
        version_key: "room",
        configuration: Configuration::Kapt,
        plugin: None,
    },
    DependencyEntry {
        library: "kotlinx-coroutines-android",
        group: "org.jetbrains.kotlinx",
        artifact: "kotlinx-coroutines-android",
        version: "1.7.3",
        version_key: "coroutines",
        configuration: Configuration::Implementation,
        plugin: None,
    },
];

/// All dependency entries, in insertion order.
pub fn dependency_entries() -> &'static [DependencyEntry] {
    &DEPENDENCY_ENTRIES
}

/// Look up a dependency entry by its library alias.
pub fn find_dependency(library: &str) -> Result<&'static DependencyEntry, DomainError> {
    let wanted = library.trim().to_ascii_lowercase();
    DEPENDENCY_ENTRIES
        .iter()
        .find(|entry| entry.library == wanted)
        .ok_or_else(|| DomainError::UnknownCatalogEntry {
            kind: "library",
            name: library.to_string(),
        })
}
