//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cleandroid-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::ProjectFile;
use crate::error::CleandroidResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cleandroid_adapters::filesystem::LocalFilesystem` (production)
/// - `cleandroid_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()>;

    /// Replace the contents of a file.
    ///
    /// Implementations must not leave a partially written file behind.
    fn write_file(&self, path: &Path, content: &str) -> CleandroidResult<()>;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> CleandroidResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for finding project files.
///
/// Implemented by `cleandroid_adapters::locator::WalkdirLocator`.
pub trait ProjectLocator: Send + Sync {
    /// Resolve `file` under `root`: the conventional path if it exists,
    /// otherwise the single candidate found by a deterministic search.
    fn locate(&self, root: &Path, file: ProjectFile) -> CleandroidResult<PathBuf>;
}
