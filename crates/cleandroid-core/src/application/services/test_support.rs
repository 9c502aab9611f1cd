//! Minimal in-memory `Filesystem` for service tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::CleandroidResult,
};

#[derive(Debug, Default)]
pub(crate) struct FakeFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    pub(crate) writes: Mutex<usize>,
}

impl FakeFs {
    pub(crate) fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub(crate) fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub(crate) fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        *self.writes.lock().unwrap() += 1;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

/// Shares one `FakeFs` between a service and the test body.
impl Filesystem for std::sync::Arc<FakeFs> {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        self.as_ref().create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        self.as_ref().write_file(path, content)
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        self.as_ref().read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.as_ref().is_dir(path)
    }
}
