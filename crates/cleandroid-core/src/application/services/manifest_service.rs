//! Manifest Service - adds permission declarations to `AndroidManifest.xml`.

use std::path::Path;

use tracing::instrument;

use crate::{
    application::{ports::Filesystem, services::patching::patch_document},
    domain::{PermissionCategory, manifest},
    error::CleandroidResult,
};

use super::PatchOutcome;

pub struct ManifestService {
    filesystem: Box<dyn Filesystem>,
}

impl ManifestService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Declare every permission of the selected categories that the manifest
    /// does not declare yet.
    #[instrument(
        skip_all,
        fields(
            manifest = %path.display(),
            categories = ?categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            dry_run = dry_run
        )
    )]
    pub fn add_permissions(
        &self,
        path: &Path,
        categories: &[&PermissionCategory],
        dry_run: bool,
    ) -> CleandroidResult<PatchOutcome> {
        patch_document(self.filesystem.as_ref(), path, dry_run, |document| {
            manifest::add_permissions(document, categories)
        })
    }
}
