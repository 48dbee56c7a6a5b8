//! In-memory storage for tests and dry experiments.
//!
//! Paths are kept in a `BTreeMap`, so listings come back sorted by name. Every
//! successful mutating call is appended to a journal that tests can inspect.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::Storage;
use crate::errors::{OrdirError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// In-memory storage backend.
///
/// Uses `RefCell` for interior mutability since ordir is single-threaded, so
/// the `Storage` trait can take `&self` everywhere.
#[derive(Debug)]
pub struct MemStorage {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    journal: RefCell<Vec<String>>,
    fail_after: Cell<Option<usize>>,
}

impl Default for MemStorage {
    fn default() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: RefCell::new(nodes),
            journal: RefCell::new(Vec::new()),
            fail_after: Cell::new(None),
        }
    }
}

fn io_err(kind: io::ErrorKind, msg: &str) -> io::Error {
    io::Error::new(kind, msg.to_string())
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and all missing ancestors. Not journaled.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut nodes = self.nodes.borrow_mut();
        for anc in path.as_ref().ancestors() {
            if anc.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(anc.to_path_buf()).or_insert(Node::Dir);
        }
        drop(nodes);
        self
    }

    /// Create a file (and missing parent directories). Not journaled.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &[u8]) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        self
    }

    /// Sorted entry names of `dir`; empty when `dir` does not exist.
    pub fn names(&self, dir: impl AsRef<Path>) -> Vec<String> {
        self.list_entries(dir.as_ref()).unwrap_or_default()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow().contains_key(path.as_ref())
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.nodes.borrow().get(path.as_ref()), Some(Node::File(_)))
    }

    /// Contents of a file, if `path` is a file.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Mutations applied so far, oldest first.
    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    /// Let `n` more mutations succeed, then fail every following one.
    /// `None` disables the simulation.
    pub fn set_fail_after(&self, n: Option<usize>) {
        self.fail_after.set(n);
    }

    /// Make every mutating call fail (or stop doing so).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.fail_after.set(if simulate { Some(0) } else { None });
    }

    fn begin_mutation(&self, op: &'static str, path: &Path) -> Result<()> {
        match self.fail_after.get() {
            Some(0) => Err(OrdirError::storage(
                op,
                path,
                io_err(io::ErrorKind::Other, "simulated write error"),
            )),
            Some(n) => {
                self.fail_after.set(Some(n - 1));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record(&self, line: String) {
        self.journal.borrow_mut().push(line);
    }

    fn ensure_parent_dir(&self, op: &'static str, path: &Path) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        match self.nodes.borrow().get(parent) {
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(OrdirError::storage(
                op,
                path,
                io_err(io::ErrorKind::NotADirectory, "parent is not a directory"),
            )),
            None => Err(OrdirError::storage(
                op,
                path,
                io_err(io::ErrorKind::NotFound, "parent directory does not exist"),
            )),
        }
    }

    fn ensure_vacant(&self, op: &'static str, path: &Path) -> Result<()> {
        if self.exists(path) {
            return Err(OrdirError::storage(
                op,
                path,
                io_err(io::ErrorKind::AlreadyExists, "path already exists"),
            ));
        }
        Ok(())
    }

    fn node(&self, op: &'static str, path: &Path) -> Result<Node> {
        self.nodes
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| OrdirError::storage(op, path, io_err(io::ErrorKind::NotFound, "no such entry")))
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.nodes
            .borrow()
            .keys()
            .any(|k| k.parent() == Some(dir) && k.as_path() != dir)
    }
}

impl Storage for MemStorage {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>> {
        match self.node("list", dir)? {
            Node::Dir => {}
            Node::File(_) => {
                return Err(OrdirError::storage(
                    "list",
                    dir,
                    io_err(io::ErrorKind::NotADirectory, "not a directory"),
                ));
            }
        }
        let nodes = self.nodes.borrow();
        Ok(nodes
            .keys()
            .filter(|k| k.parent() == Some(dir) && k.as_path() != dir)
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.node("rename", from)?;
        self.ensure_vacant("rename", to)?;
        self.ensure_parent_dir("rename", to)?;
        if to.starts_with(from) {
            return Err(OrdirError::storage(
                "rename",
                to,
                io_err(io::ErrorKind::InvalidInput, "cannot move a directory into itself"),
            ));
        }
        self.begin_mutation("rename", from)?;

        let mut nodes = self.nodes.borrow_mut();
        let moved: Vec<PathBuf> = nodes.keys().filter(|k| k.starts_with(from)).cloned().collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let rel = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new = if rel.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rel)
                };
                nodes.insert(new, node);
            }
        }
        drop(nodes);
        self.record(format!("rename {} -> {}", from.display(), to.display()));
        Ok(())
    }

    fn create_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.ensure_vacant("create_file", path)?;
        self.ensure_parent_dir("create_file", path)?;
        self.begin_mutation("create_file", path)?;
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        self.record(format!("create_file {}", path.display()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        self.ensure_vacant("create_dir", path)?;
        self.ensure_parent_dir("create_dir", path)?;
        self.begin_mutation("create_dir", path)?;
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
        self.record(format!("create_dir {}", path.display()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if let Node::Dir = self.node("remove_file", path)? {
            return Err(OrdirError::storage(
                "remove_file",
                path,
                io_err(io::ErrorKind::IsADirectory, "is a directory"),
            ));
        }
        self.begin_mutation("remove_file", path)?;
        self.nodes.borrow_mut().remove(path);
        self.record(format!("remove_file {}", path.display()));
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        if let Node::File(_) = self.node("remove_dir", path)? {
            return Err(OrdirError::storage(
                "remove_dir",
                path,
                io_err(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        if self.has_children(path) {
            return Err(OrdirError::storage(
                "remove_dir",
                path,
                io_err(io::ErrorKind::DirectoryNotEmpty, "directory not empty"),
            ));
        }
        self.begin_mutation("remove_dir", path)?;
        self.nodes.borrow_mut().remove(path);
        self.record(format!("remove_dir {}", path.display()));
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        Ok(matches!(self.node("stat", path)?, Node::Dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_is_sorted_and_direct_children_only() {
        let mem = MemStorage::new();
        mem.add_dir("/tmp/b/nested");
        mem.add_file("/tmp/a.txt", b"x");
        mem.add_dir("/tmp/c");
        assert_eq!(mem.names("/tmp"), vec!["a.txt", "b", "c"]);
    }

    #[test]
    fn rename_moves_subtree() {
        let mem = MemStorage::new();
        mem.add_file("/tmp/1-a/inner.txt", b"hi");
        mem.rename(Path::new("/tmp/1-a"), Path::new("/tmp/2-a")).unwrap();
        assert!(!mem.exists("/tmp/1-a"));
        assert_eq!(mem.contents("/tmp/2-a/inner.txt"), Some(b"hi".to_vec()));
        assert_eq!(mem.journal(), vec!["rename /tmp/1-a -> /tmp/2-a"]);
    }

    #[test]
    fn rename_onto_existing_fails_without_journal() {
        let mem = MemStorage::new();
        mem.add_dir("/tmp/1-a");
        mem.add_dir("/tmp/2-a");
        let err = mem
            .rename(Path::new("/tmp/2-a"), Path::new("/tmp/1-a"))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::AlreadyExists));
        assert!(mem.journal().is_empty());
    }

    #[test]
    fn remove_dir_requires_empty() {
        let mem = MemStorage::new();
        mem.add_file("/tmp/1-a/x", b"");
        let err = mem.remove_dir(Path::new("/tmp/1-a")).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::DirectoryNotEmpty));
    }

    #[test]
    fn fail_after_lets_some_mutations_through() {
        let mem = MemStorage::new();
        mem.add_dir("/tmp");
        mem.set_fail_after(Some(1));
        mem.create_dir(Path::new("/tmp/1-a")).unwrap();
        assert!(mem.create_dir(Path::new("/tmp/2-b")).is_err());
        mem.set_fail_after(None);
        mem.create_dir(Path::new("/tmp/2-b")).unwrap();
        assert_eq!(mem.names("/tmp"), vec!["1-a", "2-b"]);
    }
}
