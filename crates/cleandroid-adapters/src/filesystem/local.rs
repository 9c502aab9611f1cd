//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use cleandroid_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CleandroidError, CleandroidResult},
};
use tempfile::NamedTempFile;
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    /// Writes a temp file next to `path` and renames it over the target, so
    /// readers see either the old or the new content.
    fn write_file(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temp file"))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write file"))?;

        // Keep the original file mode; temp files are created 0600.
        if let Ok(metadata) = std::fs::metadata(path) {
            std::fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| map_io_error(path, e, "copy permissions"))?;
        }

        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        trace!(path = %path.display(), bytes = content.len(), "file written");
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CleandroidError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AndroidManifest.xml");
        std::fs::write(&path, "old content that is longer").unwrap();

        LocalFilesystem::new().write_file(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.gradle");
        std::fs::write(&path, "x").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        LocalFilesystem::new().write_file(&path, "y").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn missing_parent_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("README.md");

        let err = LocalFilesystem::new().write_file(&path, "x").unwrap_err();
        assert!(matches!(
            err,
            CleandroidError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope"))
            .is_err());
    }
}
