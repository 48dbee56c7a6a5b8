//! Mutation operations on an ordered directory.
//! Each call scans fresh, edits the working sequence in memory, plans the
//! renumbering and applies it through the storage port.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

use super::entry::{Entry, EntryKind};
use super::listing::Listing;
use super::plan::{plan, staging_name, Action};
use super::scan::scan;
use crate::errors::{OrdirError, Result};
use crate::storage::Storage;

/// Entry point for working with numerically prefixed directories.
///
/// Not safe for concurrent use on the same directory: a scan can go stale if
/// another writer renames entries before this call's renames land.
#[derive(Debug, Clone)]
pub struct OrderedDir<S> {
    storage: S,
    dry_run: bool,
}

impl<S: Storage> OrderedDir<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            dry_run: false,
        }
    }

    /// Plan and log actions without mutating storage.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Entries of `dir`, ordered entries first by numeral.
    pub fn scan(&self, dir: &Path) -> Result<Listing> {
        scan(&self.storage, dir)
    }

    /// Number `listing` contiguously inside `dir`.
    ///
    /// Unordered entries are left alone unless `include_unordered` is set.
    pub fn reorder(&self, dir: &Path, listing: Listing, include_unordered: bool) -> Result<Vec<Action>> {
        let occupied = occupied_names(&listing);
        let sequence = if include_unordered {
            listing
        } else {
            listing.ordered_only()
        };
        self.run(dir, &sequence, &occupied)
    }

    /// Create `name` as a new entry at 1-based `position` (append when
    /// `None` or 0) and renumber the ordered entries around it.
    pub fn insert(
        &self,
        dir: &Path,
        name: &str,
        kind: EntryKind,
        position: Option<usize>,
    ) -> Result<Vec<Action>> {
        let listing = self.scan(dir)?;
        let occupied = occupied_names(&listing);
        let mut sequence = listing.ordered_only();
        let placeholder = Entry::placeholder(name, kind);
        match position {
            Some(p) if p > 0 => sequence.insert_at(p, placeholder),
            _ => sequence.push(placeholder),
        }
        debug!(dir = %dir.display(), name, %kind, ?position, "insert");
        self.run(dir, &sequence, &occupied)
    }

    /// Move the entry stored as `current_name` to 1-based `position`.
    ///
    /// An unordered entry can be looked up but is never renamed; the ordered
    /// entries are renumbered as they stand.
    pub fn move_entry(&self, dir: &Path, current_name: &str, position: usize) -> Result<Vec<Action>> {
        let mut listing = self.scan(dir)?;
        let occupied = occupied_names(&listing);
        let entry = listing.take(current_name).ok_or_else(|| not_found(dir, current_name))?;
        let ordered = entry.is_ordered();

        let mut sequence = listing.ordered_only();
        if ordered {
            sequence.insert_at(position, entry);
        }
        debug!(dir = %dir.display(), name = current_name, position, ordered, "move");
        self.run(dir, &sequence, &occupied)
    }

    /// Delete the entry stored as `current_name` and close the gap it leaves.
    ///
    /// Siblings are renumbered first; the entry itself is removed last, as a
    /// directory (must be empty) or a file depending on what it is.
    pub fn remove(&self, dir: &Path, current_name: &str) -> Result<Vec<Action>> {
        let mut listing = self.scan(dir)?;
        let entry = listing.take(current_name).ok_or_else(|| not_found(dir, current_name))?;
        let target = dir.join(current_name);
        let is_dir = self.storage.is_dir(&target)?;

        let occupied = occupied_names(&listing);
        let mut actions = plan(dir, &listing.ordered_only(), &occupied);

        // A sibling may be headed for the name the removed entry still holds.
        let mut doomed = target.clone();
        if actions.iter().any(|a| a.target() == target.as_path()) {
            let mut taken = occupied;
            taken.insert(current_name.to_string());
            let parked = dir.join(staging_name(0, entry.name(), &taken));
            actions.insert(
                0,
                Action::Rename {
                    from: target.clone(),
                    to: parked.clone(),
                },
            );
            doomed = parked;
        }
        actions.push(if is_dir {
            Action::RemoveDir { path: doomed }
        } else {
            Action::RemoveFile { path: doomed }
        });

        debug!(dir = %dir.display(), name = current_name, is_dir, "remove");
        self.apply(&actions)?;
        Ok(actions)
    }

    /// Renumber `dir` as it is: close gaps, resolve duplicates, repad.
    pub fn fix(&self, dir: &Path, include_unordered: bool) -> Result<Vec<Action>> {
        let listing = self.scan(dir)?;
        debug!(dir = %dir.display(), include_unordered, "fix");
        self.reorder(dir, listing, include_unordered)
    }

    fn run(&self, dir: &Path, sequence: &Listing, occupied: &BTreeSet<String>) -> Result<Vec<Action>> {
        let actions = plan(dir, sequence, occupied);
        self.apply(&actions)?;
        Ok(actions)
    }

    fn apply(&self, actions: &[Action]) -> Result<()> {
        for action in actions {
            if self.dry_run {
                info!(%action, "dry-run: would apply");
                continue;
            }
            action.apply(&self.storage)?;
            info!(%action, "applied");
        }
        Ok(())
    }
}

fn not_found(dir: &Path, name: &str) -> OrdirError {
    OrdirError::NotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    }
}

fn occupied_names(listing: &Listing) -> BTreeSet<String> {
    listing.names().into_iter().map(str::to_string).collect()
}

