use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::{DomainError, LayerSpec, PackageName};

/// File name of the per-layer documentation file.
pub const README_FILE: &str = "README.md";

/// Directories and README files to materialize under a source root.
///
/// All paths are relative to the source root (`app/src/main/java`). It
/// contains no I/O, only the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub(crate) entries: Vec<LayoutEntry>,
}

impl ProjectLayout {
    /// Plan `<package path>/<layer>/<subfolder>` for every layer, plus
    /// `<package path>/<layer>/README.md`.
    ///
    /// Per layer, the layer directory comes first, then its README, then the
    /// subfolders in catalog order.
    pub fn plan(package: &PackageName, layers: &[LayerSpec]) -> Result<Self, DomainError> {
        let base = package.to_relative_path();
        let mut entries = Vec::new();

        for layer in layers {
            let layer_dir = base.join(layer.name.as_str());
            entries.push(LayoutEntry::Directory(layer_dir.clone()));
            entries.push(LayoutEntry::Readme(ReadmeToWrite {
                path: layer_dir.join(README_FILE),
                content: layer.readme,
            }));
            for sub in layer.subfolders {
                entries.push(LayoutEntry::Directory(layer_dir.join(sub)));
            }
        }

        let layout = Self { entries };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            let path_str = path.display().to_string();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed { path: path_str });
            }
            if !seen.insert(path_str.clone()) {
                return Err(DomainError::DuplicatePath { path: path_str });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    #[cfg(test)]
    fn directories(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter().filter_map(|e| match e {
            LayoutEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    #[cfg(test)]
    fn readmes(&self) -> impl Iterator<Item = &ReadmeToWrite> {
        self.entries.iter().filter_map(|e| match e {
            LayoutEntry::Readme(r) => Some(r),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    Directory(PathBuf),
    Readme(ReadmeToWrite),
}

impl LayoutEntry {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Directory(path) => path,
            Self::Readme(readme) => &readme.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeToWrite {
    pub path: PathBuf,
    pub content: &'static str,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::catalog::layers;

    fn package() -> PackageName {
        PackageName::parse("com.example.app").unwrap()
    }

    #[test]
    fn plan_covers_every_layer_and_subfolder() {
        let layout = ProjectLayout::plan(&package(), layers()).unwrap();

        let dirs: Vec<_> = layout.directories().cloned().collect();
        let base = Path::new("com/example/app");
        for layer in layers() {
            assert!(dirs.contains(&base.join(layer.name.as_str())));
            for sub in layer.subfolders {
                assert!(dirs.contains(&base.join(layer.name.as_str()).join(sub)), "{sub}");
            }
        }
        assert_eq!(layout.readmes().count(), 3);
        // 3 layer dirs + 8 subfolders + 3 readmes
        assert_eq!(layout.entry_count(), 14);
    }

    #[test]
    fn layer_directory_precedes_its_readme() {
        let layout = ProjectLayout::plan(&package(), layers()).unwrap();
        assert_eq!(
            layout.entries()[0],
            LayoutEntry::Directory(PathBuf::from("com/example/app/domain"))
        );
        assert_eq!(
            layout.entries()[1].path(),
            &PathBuf::from("com/example/app/domain/README.md")
        );
    }

    #[test]
    fn readme_content_comes_from_the_layer() {
        let layout = ProjectLayout::plan(&package(), layers()).unwrap();
        let data = layout
            .readmes()
            .find(|r| r.path.ends_with("data/README.md"))
            .unwrap();
        assert!(data.content.starts_with("# Data layer"));
    }

    #[test]
    fn duplicate_layers_are_rejected() {
        let twice = [layers()[0].clone(), layers()[0].clone()];
        assert!(matches!(
            ProjectLayout::plan(&package(), &twice),
            Err(DomainError::DuplicatePath { .. })
        ));
    }
}
