//! Core library for `ordir`.
//!
//! Keeps a flat directory ordered by numeral prefixes (`01-intro`,
//! `02-setup`, ...). Every operation scans the directory, edits the sequence
//! in memory and applies the minimal set of renames through a [`Storage`]
//! implementation, so the engine runs the same against the real filesystem
//! ([`FsStorage`]) and an in-memory tree ([`MemStorage`]).
//!
//! ```
//! use ordir::{EntryKind, MemStorage, OrderedDir};
//! use std::path::Path;
//!
//! let mem = MemStorage::new();
//! mem.add_dir("/book/1-intro").add_dir("/book/2-outro");
//!
//! let dir = OrderedDir::new(&mem);
//! dir.insert(Path::new("/book"), "setup", EntryKind::Directory, Some(2))?;
//! assert_eq!(mem.names("/book"), vec!["1-intro", "2-setup", "3-outro"]);
//! # Ok::<(), ordir::OrdirError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ordering;
pub mod output;
pub mod platform;
pub mod storage;

pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor, Config, LogLevel,
};
pub use errors::{OrdirError, Result};
pub use ordering::{Action, Entry, EntryKind, Listing, OrderedDir};
pub use storage::{FsStorage, MemStorage, Storage};
