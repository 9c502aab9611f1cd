//! Read → patch → write, shared by the document services.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainError, PatchReport, PatchStage, TextDocument},
    error::CleandroidResult,
};

/// Result of one patch run over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub path: PathBuf,
    /// `Written` if the file changed on disk, `Patched` for a no-op or dry run.
    pub stage: PatchStage,
    pub report: PatchReport,
}

impl PatchOutcome {
    pub fn was_written(&self) -> bool {
        self.stage == PatchStage::Written
    }
}

/// Run `patch` over the document at `path`.
///
/// The file is rewritten in one whole-file write, and only when the patch
/// added something and this is not a dry run. A patch error leaves the file
/// untouched and is reported as [`ApplicationError::ParseFailed`].
pub(crate) fn patch_document<F>(
    filesystem: &dyn Filesystem,
    path: &Path,
    dry_run: bool,
    patch: F,
) -> CleandroidResult<PatchOutcome>
where
    F: FnOnce(&mut TextDocument) -> Result<PatchReport, DomainError>,
{
    debug!(stage = %PatchStage::NotStarted, path = %path.display());

    let text = filesystem.read_to_string(path)?;
    let mut document = TextDocument::parse(&text);
    debug!(stage = %PatchStage::Read, lines = document.len());

    let report = match patch(&mut document) {
        Ok(report) => report,
        Err(source) => {
            warn!(stage = %PatchStage::FailedParse, error = %source, "patch aborted");
            return Err(ApplicationError::ParseFailed {
                path: path.to_path_buf(),
                source,
            }
            .into());
        }
    };

    let outcome = |stage| PatchOutcome {
        path: path.to_path_buf(),
        stage,
        report: report.clone(),
    };

    if report.is_noop() {
        info!(present = report.already_present.len(), "already up to date");
        return Ok(outcome(PatchStage::Patched));
    }
    if dry_run {
        info!(added = report.added.len(), "dry run, not writing");
        return Ok(outcome(PatchStage::Patched));
    }

    filesystem.write_file(path, &document.render())?;
    info!(stage = %PatchStage::Written, added = report.added.len());
    Ok(outcome(PatchStage::Written))
}
