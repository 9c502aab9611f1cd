//! Project file discovery.
//!
//! Resolution order for each file:
//! 1. The conventional paths (`app/src/main/AndroidManifest.xml`, ...), in
//!    order of preference. The first that exists wins.
//! 2. A walk of the file's search root (`app/` or `gradle/`), sorted by file
//!    name so the result does not depend on directory order. Exactly one
//!    candidate must be found; several is an ambiguity error.

use std::path::{Path, PathBuf};

use cleandroid_core::{
    application::{ApplicationError, ports::ProjectLocator},
    domain::ProjectFile,
    error::CleandroidResult,
};
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories never searched: build outputs and IDE/VCS state.
const SKIPPED_DIRS: &[&str] = &["build", ".gradle", ".git", ".idea", ".cxx", "node_modules"];

/// Maximum depth below the search root.
const MAX_DEPTH: usize = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirLocator;

impl WalkdirLocator {
    pub fn new() -> Self {
        Self
    }

    fn search(&self, root: &Path, file: ProjectFile) -> Vec<PathBuf> {
        let search_root = root.join(file.search_root());
        if !search_root.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&search_root)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && file.matches(entry.path()))
            .map(DirEntry::into_path)
            .collect()
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

impl ProjectLocator for WalkdirLocator {
    #[instrument(skip_all, fields(root = %root.display(), file = %file))]
    fn locate(&self, root: &Path, file: ProjectFile) -> CleandroidResult<PathBuf> {
        if let Some(path) = file
            .conventional_paths()
            .iter()
            .map(|p| root.join(p))
            .find(|p| p.is_file())
        {
            debug!(path = %path.display(), "conventional location");
            return Ok(path);
        }

        let mut candidates = self.search(root, file);
        debug!(count = candidates.len(), "searched");

        match candidates.len() {
            0 => Err(ApplicationError::FileNotFound {
                file,
                root: root.to_path_buf(),
            }
            .into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(ApplicationError::AmbiguousFile { file, candidates }.into()),
        }
    }
}
