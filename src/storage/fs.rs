//! Real filesystem storage backed by `std::fs`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::{trace, warn};

use super::Storage;
use crate::errors::{OrdirError, Result};

/// Storage implementation operating directly on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>> {
        let rd = fs::read_dir(dir).map_err(|e| OrdirError::storage("list", dir, e))?;
        let mut names = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| OrdirError::storage("list", dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    // Non-UTF8 names cannot be renumbered; leave them alone.
                    warn!(dir = %dir.display(), name = ?raw, "Skipping entry with non-UTF8 name");
                }
            }
        }
        trace!(dir = %dir.display(), count = names.len(), "listed entries");
        Ok(names)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        // std::fs::rename silently replaces files and empty directories.
        if fs::symlink_metadata(to).is_ok() {
            return Err(OrdirError::storage(
                "rename",
                to,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }
        fs::rename(from, to).map_err(|e| OrdirError::storage("rename", from, e))
    }

    fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| OrdirError::storage("create_file", path, e))?;
        f.write_all(contents)
            .map_err(|e| OrdirError::storage("create_file", path, e))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| OrdirError::storage("create_dir", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| OrdirError::storage("remove_file", path, e))
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path).map_err(|e| OrdirError::storage("remove_dir", path, e))
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        let meta = fs::metadata(path).map_err(|e| OrdirError::storage("stat", path, e))?;
        Ok(meta.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn rename_refuses_existing_destination() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("1-a").create_dir_all().unwrap();
        dir.child("2-a").create_dir_all().unwrap();

        let err = FsStorage
            .rename(&dir.path().join("2-a"), &dir.path().join("1-a"))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::AlreadyExists));
        assert!(dir.path().join("2-a").is_dir());
    }

    #[test]
    fn create_and_remove_roundtrip() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.path().join("1-notes.md");
        let sub = dir.path().join("2-assets");

        FsStorage.create_file(&file, b"").unwrap();
        FsStorage.create_dir(&sub).unwrap();
        assert!(!FsStorage.is_dir(&file).unwrap());
        assert!(FsStorage.is_dir(&sub).unwrap());

        let mut names = FsStorage.list_entries(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["1-notes.md", "2-assets"]);

        FsStorage.remove_file(&file).unwrap();
        FsStorage.remove_dir(&sub).unwrap();
        assert!(FsStorage.list_entries(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn remove_dir_is_not_recursive() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("1-full/inner.txt").touch().unwrap();
        let err = FsStorage.remove_dir(&dir.path().join("1-full")).unwrap_err();
        assert!(matches!(err, OrdirError::Storage { op: "remove_dir", .. }));
        assert!(dir.path().join("1-full/inner.txt").exists());
    }

    #[test]
    fn list_missing_dir_is_storage_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = FsStorage.list_entries(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }
}
