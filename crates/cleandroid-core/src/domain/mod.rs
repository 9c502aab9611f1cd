//! Core domain layer for cleandroid.
//!
//! Pure logic with no I/O: the static catalogs, the layout plan, and the
//! text patchers for manifests, build scripts and version catalogs. Reading
//! and writing files goes through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Patchers take and mutate a [`TextDocument`]
//! - **Deterministic**: Same input document and selection, same output

pub mod catalog;
pub mod document;
pub mod error;
pub mod gradle;
pub mod layout;
pub mod manifest;
pub mod package;
pub mod patch;
pub mod project_file;
pub mod version_catalog;

pub use catalog::{
    CatalogPlugin, Configuration, DependencyEntry, Layer, LayerSpec, PermissionCategory,
    PermissionLevel, dependency_entries, find_dependency, layers, permission_categories,
};
pub use document::TextDocument;
pub use error::{DomainError, ErrorCategory};
pub use gradle::GradleDialect;
pub use layout::{LayoutEntry, ProjectLayout, README_FILE, ReadmeToWrite};
pub use package::PackageName;
pub use patch::{DependencyMethod, PatchReport, PatchStage};
pub use project_file::{ProjectFile, SOURCE_ROOT};
