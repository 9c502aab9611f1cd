//! Project Service - resolves paths and facts about an Android project.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProjectLocator},
    },
    domain::{DependencyMethod, PackageName, ProjectFile},
    error::{CleandroidError, CleandroidResult},
};

pub struct ProjectService {
    filesystem: Box<dyn Filesystem>,
    locator: Box<dyn ProjectLocator>,
}

impl ProjectService {
    pub fn new(filesystem: Box<dyn Filesystem>, locator: Box<dyn ProjectLocator>) -> Self {
        Self {
            filesystem,
            locator,
        }
    }

    /// Fail early when `root` is not a directory.
    pub fn ensure_project(&self, root: &Path) -> CleandroidResult<()> {
        if self.filesystem.is_dir(root) {
            Ok(())
        } else {
            Err(ApplicationError::NotAProject {
                path: root.to_path_buf(),
            }
            .into())
        }
    }

    pub fn locate(&self, root: &Path, file: ProjectFile) -> CleandroidResult<PathBuf> {
        let path = self.locator.locate(root, file)?;
        debug!(%file, path = %path.display(), "located");
        Ok(path)
    }

    /// Package name declared by the app module's build script.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn detect_package(&self, root: &Path) -> CleandroidResult<PackageName> {
        let script = self.locate(root, ProjectFile::BuildScript)?;
        let text = self.filesystem.read_to_string(&script)?;
        let package = PackageName::from_build_script(&text)?;
        info!(%package, "package detected");
        Ok(package)
    }

    /// Pick the dependency method and the file it edits.
    ///
    /// With no explicit method, the version catalog is used when the project
    /// has one and the module build script otherwise.
    #[instrument(skip_all, fields(root = %root.display(), requested = ?requested))]
    pub fn resolve_method(
        &self,
        root: &Path,
        requested: Option<DependencyMethod>,
    ) -> CleandroidResult<(DependencyMethod, PathBuf)> {
        let method = match requested {
            Some(method) => method,
            None => match self.locator.locate(root, ProjectFile::VersionCatalog) {
                Ok(path) => {
                    info!(method = %DependencyMethod::VersionCatalog, "version catalog found");
                    return Ok((DependencyMethod::VersionCatalog, path));
                }
                Err(CleandroidError::Application(ApplicationError::FileNotFound { .. })) => {
                    info!(method = %DependencyMethod::GradleDirect, "no version catalog");
                    DependencyMethod::GradleDirect
                }
                Err(e) => return Err(e),
            },
        };

        let file = match method {
            DependencyMethod::GradleDirect => ProjectFile::BuildScript,
            DependencyMethod::VersionCatalog => ProjectFile::VersionCatalog,
        };
        Ok((method, self.locate(root, file)?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{application::services::test_support::FakeFs, domain::DomainError};

    /// Resolves conventional paths that exist in the fake filesystem.
    struct ConventionalLocator(Arc<FakeFs>);

    impl ProjectLocator for ConventionalLocator {
        fn locate(&self, root: &Path, file: ProjectFile) -> CleandroidResult<PathBuf> {
            file.conventional_paths()
                .iter()
                .map(|p| root.join(p))
                .find(|p| self.0.exists(p))
                .ok_or_else(|| {
                    ApplicationError::FileNotFound {
                        file,
                        root: root.to_path_buf(),
                    }
                    .into()
                })
        }
    }

    fn service(fs: FakeFs) -> ProjectService {
        let fs = Arc::new(fs);
        ProjectService::new(
            Box::new(Arc::clone(&fs)),
            Box::new(ConventionalLocator(fs)),
        )
    }

    const KTS: &str = "proj/app/build.gradle.kts";

    #[test]
    fn package_comes_from_build_script() {
        let svc = service(FakeFs::default().with_file(
            KTS,
            "android {\n    namespace = \"com.example.demo\"\n}\n",
        ));
        let package = svc.detect_package(Path::new("proj")).unwrap();
        assert_eq!(package.as_str(), "com.example.demo");
    }

    #[test]
    fn undeclared_package_is_reported() {
        let svc = service(FakeFs::default().with_file(KTS, "dependencies {}\n"));
        let err = svc.detect_package(Path::new("proj")).unwrap_err();
        assert!(matches!(
            err,
            CleandroidError::Domain(DomainError::PackageNotDeclared)
        ));
    }

    #[test]
    fn auto_method_prefers_the_catalog() {
        let svc = service(
            FakeFs::default()
                .with_file(KTS, "")
                .with_file("proj/gradle/libs.versions.toml", ""),
        );
        let (method, path) = svc.resolve_method(Path::new("proj"), None).unwrap();
        assert_eq!(method, DependencyMethod::VersionCatalog);
        assert_eq!(path, PathBuf::from("proj/gradle/libs.versions.toml"));
    }

    #[test]
    fn auto_method_falls_back_to_gradle() {
        let svc = service(FakeFs::default().with_file(KTS, ""));
        let (method, path) = svc.resolve_method(Path::new("proj"), None).unwrap();
        assert_eq!(method, DependencyMethod::GradleDirect);
        assert_eq!(path, PathBuf::from(KTS));
    }

    #[test]
    fn explicit_catalog_without_file_is_not_found() {
        let svc = service(FakeFs::default().with_file(KTS, ""));
        let err = svc
            .resolve_method(Path::new("proj"), Some(DependencyMethod::VersionCatalog))
            .unwrap_err();
        assert!(matches!(
            err,
            CleandroidError::Application(ApplicationError::FileNotFound {
                file: ProjectFile::VersionCatalog,
                ..
            })
        ));
    }

    #[test]
    fn missing_root_is_not_a_project() {
        let svc = service(FakeFs::default());
        assert!(svc.ensure_project(Path::new("nowhere")).is_err());
    }
}
