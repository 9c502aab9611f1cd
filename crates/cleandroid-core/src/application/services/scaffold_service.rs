//! Scaffold Service - generates the Clean Architecture folder layout.
//!
//! This service coordinates the generation workflow:
//! 1. Plan the layout for the package and layers
//! 2. Create every missing directory
//! 3. Write every missing README
//!
//! Existing directories and READMEs are left alone, so re-running converges.
//! There is no rollback: on an I/O failure, whatever was created stays.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{LayerSpec, LayoutEntry, PackageName, ProjectLayout},
    error::CleandroidResult,
};

/// What a generation run did, or would do on a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub created_dirs: Vec<PathBuf>,
    pub existing_dirs: Vec<PathBuf>,
    pub written_readmes: Vec<PathBuf>,
    /// READMEs that already existed and were not touched.
    pub preserved_readmes: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn is_noop(&self) -> bool {
        self.created_dirs.is_empty() && self.written_readmes.is_empty()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Materialize `<source_root>/<package path>/<layer>/...` for `layers`.
    #[instrument(
        skip_all,
        fields(
            source_root = %source_root.display(),
            package = %package,
            dry_run = dry_run
        )
    )]
    pub fn generate(
        &self,
        source_root: &Path,
        package: &PackageName,
        layers: &[LayerSpec],
        dry_run: bool,
    ) -> CleandroidResult<GenerationReport> {
        let layout = ProjectLayout::plan(package, layers)?;
        info!(entries = layout.entry_count(), "Layout planned");

        let mut report = GenerationReport::default();

        for entry in layout.entries() {
            let path = source_root.join(entry.path());
            match entry {
                LayoutEntry::Directory(_) => {
                    if self.filesystem.is_dir(&path) {
                        debug!(path = %path.display(), "directory exists");
                        report.existing_dirs.push(path);
                        continue;
                    }
                    if !dry_run {
                        self.filesystem.create_dir_all(&path)?;
                    }
                    report.created_dirs.push(path);
                }
                LayoutEntry::Readme(readme) => {
                    if self.filesystem.exists(&path) {
                        debug!(path = %path.display(), "README preserved");
                        report.preserved_readmes.push(path);
                        continue;
                    }
                    if !dry_run {
                        self.filesystem.write_file(&path, readme.content)?;
                    }
                    report.written_readmes.push(path);
                }
            }
        }

        info!(
            created = report.created_dirs.len(),
            readmes = report.written_readmes.len(),
            "Scaffold completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        application::{
            ApplicationError, ports::MockFilesystem, services::test_support::FakeFs,
        },
        domain::layers,
        error::ErrorCategory,
    };

    const ROOT: &str = "app/src/main/java";

    fn package() -> PackageName {
        PackageName::parse("com.example.app").unwrap()
    }

    #[test]
    fn generates_every_directory_and_readme() {
        let fs = Arc::new(FakeFs::default());
        let service = ScaffoldService::new(Box::new(Arc::clone(&fs)));

        let report = service
            .generate(Path::new(ROOT), &package(), layers(), false)
            .unwrap();

        assert_eq!(report.created_dirs.len(), 11);
        assert_eq!(report.written_readmes.len(), 3);
        assert!(fs.is_dir(Path::new("app/src/main/java/com/example/app/presentation/viewmodel")));
        assert!(
            fs.file("app/src/main/java/com/example/app/domain/README.md")
                .unwrap()
                .starts_with("# Domain layer")
        );
    }

    #[test]
    fn second_run_changes_nothing() {
        let fs = Arc::new(FakeFs::default());
        let service = ScaffoldService::new(Box::new(Arc::clone(&fs)));

        service.generate(Path::new(ROOT), &package(), layers(), false).unwrap();
        let writes = fs.write_count();
        let report = service
            .generate(Path::new(ROOT), &package(), layers(), false)
            .unwrap();

        assert!(report.is_noop());
        assert_eq!(report.preserved_readmes.len(), 3);
        assert_eq!(fs.write_count(), writes);
    }

    #[test]
    fn edited_readme_is_never_overwritten() {
        let edited = "app/src/main/java/com/example/app/domain/README.md";
        let fs = Arc::new(FakeFs::default().with_file(edited, "my notes"));
        let service = ScaffoldService::new(Box::new(Arc::clone(&fs)));

        let report = service
            .generate(Path::new(ROOT), &package(), layers(), false)
            .unwrap();

        assert_eq!(fs.file(edited).as_deref(), Some("my notes"));
        assert_eq!(report.preserved_readmes, vec![PathBuf::from(edited)]);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let fs = Arc::new(FakeFs::default());
        let service = ScaffoldService::new(Box::new(Arc::clone(&fs)));

        let report = service
            .generate(Path::new(ROOT), &package(), layers(), true)
            .unwrap();

        assert_eq!(report.written_readmes.len(), 3);
        assert_eq!(fs.write_count(), 0);
        assert!(!fs.is_dir(Path::new(ROOT)));
    }

    #[test]
    fn io_failure_aborts_the_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all().times(1).returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Read-only file system".into(),
            }
            .into())
        });

        let err = ScaffoldService::new(Box::new(fs))
            .generate(Path::new(ROOT), &package(), layers(), false)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
