//! Storage port.
//! The ordering engine never touches the filesystem directly; every listing,
//! rename, create and delete goes through a `Storage` implementation.
//!
//! - `FsStorage` maps calls onto `std::fs`.
//! - `MemStorage` keeps an in-memory tree for tests and embedders.

mod fs;
pub mod memory;

pub use fs::FsStorage;
pub use memory::MemStorage;

use crate::errors::Result;
use std::path::Path;

/// Abstract interface for the directory operations ordir needs.
///
/// All methods take `&self`; implementations that need mutation use interior
/// mutability. Calls are independent and non-transactional.
pub trait Storage {
    /// Names (not paths) of the entries directly inside `dir`, in no particular order.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>>;

    /// Rename `from` to `to`. Fails if `to` already exists.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Create a new file with the given contents. Fails if `path` exists.
    fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Create a single directory (parent must exist).
    fn create_dir(&self, path: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove an empty directory. Never recursive.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    fn is_dir(&self, path: &Path) -> Result<bool>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>> {
        (**self).list_entries(dir)
    }
    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).rename(from, to)
    }
    fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        (**self).create_file(path, contents)
    }
    fn create_dir(&self, path: &Path) -> Result<()> {
        (**self).create_dir(path)
    }
    fn remove_file(&self, path: &Path) -> Result<()> {
        (**self).remove_file(path)
    }
    fn remove_dir(&self, path: &Path) -> Result<()> {
        (**self).remove_dir(path)
    }
    fn is_dir(&self, path: &Path) -> Result<bool> {
        (**self).is_dir(path)
    }
}
