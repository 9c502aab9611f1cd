//! Dependency Service - adds library declarations to the module build script
//! or the version catalog.

use std::path::Path;

use tracing::instrument;

use crate::{
    application::{ports::Filesystem, services::patching::patch_document},
    domain::{DependencyEntry, DependencyMethod, GradleDialect, gradle, version_catalog},
    error::CleandroidResult,
};

use super::PatchOutcome;

pub struct DependencyService {
    filesystem: Box<dyn Filesystem>,
}

impl DependencyService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Add `entries` to the file at `path`.
    ///
    /// `path` must be the module build script for
    /// [`DependencyMethod::GradleDirect`] and the version catalog for
    /// [`DependencyMethod::VersionCatalog`]. The Gradle dialect follows the
    /// file extension.
    #[instrument(
        skip_all,
        fields(
            file = %path.display(),
            method = %method,
            entries = entries.len(),
            dry_run = dry_run
        )
    )]
    pub fn add_dependencies(
        &self,
        path: &Path,
        entries: &[&DependencyEntry],
        method: DependencyMethod,
        dry_run: bool,
    ) -> CleandroidResult<PatchOutcome> {
        patch_document(self.filesystem.as_ref(), path, dry_run, |document| match method {
            DependencyMethod::GradleDirect => {
                gradle::add_dependencies(document, entries, GradleDialect::from_path(path))
            }
            DependencyMethod::VersionCatalog => version_catalog::add_dependencies(document, entries),
        })
    }
}
