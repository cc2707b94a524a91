//! Filename index: basename -> path of a file holding that name.
//!
//! Built with one walk over the source tree. When several files share a
//! basename the one visited last wins, silently. The walk follows the
//! directory listing order, which is neither sorted nor stable across runs,
//! so callers must not rely on *which* duplicate ends up in the index; the
//! number of overwritten entries is kept only so it can be logged.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::ReplicateError;

#[derive(Debug, Default, Clone)]
pub struct FilenameIndex {
    entries: HashMap<OsString, PathBuf>,
    collisions: usize,
}

impl FilenameIndex {
    /// Walk `root` and index every regular file. Any traversal error aborts
    /// the build; no partial index is returned.
    pub fn build(root: &Path) -> Result<Self, ReplicateError> {
        let mut index = FilenameIndex::default();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| ReplicateError::traversal("source root", root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_os_string();
            match index.entries.entry(name) {
                Entry::Occupied(mut slot) => {
                    debug!(
                        name = %slot.key().to_string_lossy(),
                        previous = %slot.get().display(),
                        current = %entry.path().display(),
                        "duplicate basename; keeping the later one"
                    );
                    slot.insert(entry.into_path());
                    index.collisions += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry.into_path());
                }
            }
        }
        info!(
            root = %root.display(),
            files = index.entries.len(),
            collisions = index.collisions,
            "Indexed source tree"
        );
        Ok(index)
    }

    /// Path currently recorded for `name`, if any.
    pub fn get<S: AsRef<OsStr> + ?Sized>(&self, name: &S) -> Option<&Path> {
        self.entries.get(name.as_ref()).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many entries were overwritten by a later file with the same basename.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_os_str(), v.as_path()))
    }
}

/// Build a [`FilenameIndex`] over `root`.
pub fn build_index(root: &Path) -> Result<FilenameIndex, ReplicateError> {
    FilenameIndex::build(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn every_basename_maps_to_its_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("1.png").touch().unwrap();
        temp.child("a/2.png").touch().unwrap();
        temp.child("a/b/c/3.png").touch().unwrap();
        temp.child("empty_dir").create_dir_all().unwrap();

        let index = build_index(temp.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.collisions(), 0);
        assert_eq!(index.get("2.png"), Some(temp.child("a/2.png").path()));
        assert_eq!(index.get("3.png"), Some(temp.child("a/b/c/3.png").path()));
        // directories are not indexed
        assert!(index.get("a").is_none());
        assert!(index.get("empty_dir").is_none());
        for (name, path) in index.iter() {
            assert_eq!(path.file_name(), Some(name));
        }
    }

    #[test]
    fn duplicate_basename_keeps_one_valid_path() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("x/dup.png").write_str("x").unwrap();
        temp.child("y/dup.png").write_str("y").unwrap();

        let index = build_index(temp.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.collisions(), 1);
        let got = index.get("dup.png").unwrap();
        assert!(
            got == temp.child("x/dup.png").path() || got == temp.child("y/dup.png").path(),
            "unexpected path {}",
            got.display()
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Photo.PNG").touch().unwrap();
        let index = build_index(temp.path()).unwrap();
        assert!(index.get("photo.png").is_none());
        assert!(index.get("Photo.PNG").is_some());
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = build_index(&temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, ReplicateError::Traversal { .. }));
    }
}
