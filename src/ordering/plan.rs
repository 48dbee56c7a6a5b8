//! Reorder planning.
//!
//! Turns a working sequence into the storage actions needed to number it
//! `1..=N` with a uniform zero-pad width. Entries whose numeral string is
//! already right get no action.
//!
//! Renames run in sequence order. When a target name is currently held by a
//! different entry (duplicate base names such as `01-a` and `1-a`), every
//! rename is staged through a hidden temporary name first so nothing is
//! clobbered.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::entry::{Entry, EntryKind};
use super::listing::Listing;
use crate::errors::Result;
use crate::storage::Storage;

/// One storage mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Rename { from: PathBuf, to: PathBuf },
    CreateFile { path: PathBuf },
    CreateDir { path: PathBuf },
    RemoveFile { path: PathBuf },
    RemoveDir { path: PathBuf },
}

impl Action {
    /// Path this action produces or deletes.
    pub fn target(&self) -> &Path {
        match self {
            Action::Rename { to, .. } => to,
            Action::CreateFile { path }
            | Action::CreateDir { path }
            | Action::RemoveFile { path }
            | Action::RemoveDir { path } => path,
        }
    }

    pub fn apply<S: Storage>(&self, storage: &S) -> Result<()> {
        match self {
            Action::Rename { from, to } => storage.rename(from, to),
            Action::CreateFile { path } => storage.create_file(path, b""),
            Action::CreateDir { path } => storage.create_dir(path),
            Action::RemoveFile { path } => storage.remove_file(path),
            Action::RemoveDir { path } => storage.remove_dir(path),
        }
    }
}

fn file_name(p: &Path) -> std::borrow::Cow<'_, str> {
    p.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| p.to_string_lossy())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Rename { from, to } => {
                write!(f, "rename '{}' -> '{}'", file_name(from), file_name(to))
            }
            Action::CreateFile { path } => write!(f, "create file '{}'", file_name(path)),
            Action::CreateDir { path } => write!(f, "create dir '{}'", file_name(path)),
            Action::RemoveFile { path } => write!(f, "remove file '{}'", file_name(path)),
            Action::RemoveDir { path } => write!(f, "remove dir '{}'", file_name(path)),
        }
    }
}

/// Digits needed to write every numeral in `1..=count`, i.e.
/// `ceil(log10(count + 1))`. Zero for an empty sequence.
pub fn pad_width(count: usize) -> usize {
    count.checked_ilog10().map_or(0, |d| d as usize + 1)
}

/// `numeral` left-padded with zeros to `width`.
pub fn render_numeral(numeral: usize, width: usize) -> String {
    format!("{numeral:0width$}")
}

/// Hidden name used to park an entry while others move past it.
pub(crate) fn staging_name(index: usize, name: &str, occupied: &BTreeSet<String>) -> String {
    let pid = std::process::id();
    let mut candidate = format!(".ordir-{pid}-{index}-{name}");
    let mut n = 1u32;
    while occupied.contains(&candidate) {
        candidate = format!(".ordir-{pid}-{index}-{n}-{name}");
        n += 1;
    }
    candidate
}

enum Step<'a> {
    Rename { from: &'a str, to: String },
    Create { to: String, kind: EntryKind },
}

/// Plan the actions that number `sequence` contiguously inside `dir`.
///
/// `sequence` must already be filtered down to the entries to number.
/// `occupied` holds every name currently present in `dir`, including entries
/// that are not being numbered.
pub fn plan(dir: &Path, sequence: &Listing, occupied: &BTreeSet<String>) -> Vec<Action> {
    let width = pad_width(sequence.len());
    if width == 0 {
        debug!(dir = %dir.display(), "nothing to number");
        return Vec::new();
    }

    let steps: Vec<Step<'_>> = sequence
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let numeral = render_numeral(i + 1, width);
            if entry.order_string() == Some(numeral.as_str()) {
                return None;
            }
            let to = format!("{numeral}-{}", entry.name());
            Some(match entry {
                Entry::Placeholder { kind, .. } => Step::Create { to, kind: *kind },
                Entry::Ordered { file_name, .. } | Entry::Unordered { file_name } => Step::Rename {
                    from: file_name.as_str(),
                    to,
                },
            })
        })
        .collect();

    let collides = steps.iter().any(|s| match s {
        Step::Rename { to, .. } | Step::Create { to, .. } => occupied.contains(to),
    });

    debug!(
        dir = %dir.display(),
        count = sequence.len(),
        width,
        changes = steps.len(),
        staged = collides,
        "planned reorder"
    );

    let mut actions = Vec::with_capacity(steps.len() * if collides { 2 } else { 1 });
    let mut staged: Vec<Option<String>> = Vec::with_capacity(steps.len());
    if collides {
        let mut taken = occupied.clone();
        for (i, step) in steps.iter().enumerate() {
            match step {
                Step::Rename { from, .. } => {
                    let tmp = staging_name(i, from, &taken);
                    taken.insert(tmp.clone());
                    actions.push(Action::Rename {
                        from: dir.join(from),
                        to: dir.join(&tmp),
                    });
                    staged.push(Some(tmp));
                }
                Step::Create { .. } => staged.push(None),
            }
        }
    } else {
        staged.resize(steps.len(), None);
    }

    for (step, tmp) in steps.into_iter().zip(staged) {
        match step {
            Step::Rename { from, to } => actions.push(Action::Rename {
                from: dir.join(tmp.as_deref().unwrap_or(from)),
                to: dir.join(to),
            }),
            Step::Create { to, kind } => {
                let path = dir.join(to);
                actions.push(match kind {
                    EntryKind::File => Action::CreateFile { path },
                    EntryKind::Directory => Action::CreateDir { path },
                });
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&str]) -> (Listing, BTreeSet<String>) {
        let listing: Listing = names.iter().map(|n| Entry::parse(n)).collect::<Vec<_>>().into();
        let occupied = names.iter().map(|s| s.to_string()).collect();
        (listing, occupied)
    }

    #[test]
    fn pad_width_matches_digit_count() {
        assert_eq!(pad_width(0), 0);
        assert_eq!(pad_width(1), 1);
        assert_eq!(pad_width(9), 1);
        assert_eq!(pad_width(10), 2);
        assert_eq!(pad_width(99), 2);
        assert_eq!(pad_width(100), 3);
    }

    #[test]
    fn render_pads_with_zeros() {
        assert_eq!(render_numeral(3, 2), "03");
        assert_eq!(render_numeral(10, 2), "10");
        assert_eq!(render_numeral(7, 1), "7");
    }

    #[test]
    fn correct_numbering_plans_nothing() {
        let (l, occ) = seq(&["1-a", "2-b", "3-c"]);
        assert!(plan(Path::new("/d"), &l, &occ).is_empty());
    }

    #[test]
    fn empty_sequence_plans_nothing() {
        assert!(plan(Path::new("/d"), &Listing::default(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn gaps_are_closed_in_order() {
        let (l, occ) = seq(&["2-bar", "4-baz"]);
        let actions = plan(Path::new("/d"), &l, &occ);
        assert_eq!(
            actions,
            vec![
                Action::Rename {
                    from: "/d/2-bar".into(),
                    to: "/d/1-bar".into()
                },
                Action::Rename {
                    from: "/d/4-baz".into(),
                    to: "/d/2-baz".into()
                },
            ]
        );
    }

    #[test]
    fn same_value_different_padding_is_renamed() {
        let (l, occ) = seq(&["01-a", "2-b"]);
        let actions = plan(Path::new("/d"), &l, &occ);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].to_string(), "rename '01-a' -> '1-a'");
    }

    #[test]
    fn placeholders_are_created_by_kind() {
        let (mut l, occ) = seq(&["1-a"]);
        l.push(Entry::placeholder("v1.2", EntryKind::Directory));
        l.push(Entry::placeholder("notes", EntryKind::File));
        let actions = plan(Path::new("/d"), &l, &occ);
        assert_eq!(
            actions,
            vec![
                Action::CreateDir {
                    path: "/d/2-v1.2".into()
                },
                Action::CreateFile {
                    path: "/d/3-notes".into()
                },
            ]
        );
    }

    #[test]
    fn duplicate_base_names_are_staged() {
        let (l, occ) = seq(&["01-a", "1-a"]);
        let actions = plan(Path::new("/d"), &l, &occ);
        // 01-a -> 1-a would land on the second entry; both moves go through temps.
        assert_eq!(actions.len(), 4);
        for a in &actions[..2] {
            let name = a.target().file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with(".ordir-"), "expected staging name, got {name}");
        }
        assert_eq!(actions[2].target(), Path::new("/d/1-a"));
        assert_eq!(actions[3].target(), Path::new("/d/2-a"));
    }

    #[test]
    fn staging_name_avoids_occupied() {
        let mut occ = BTreeSet::new();
        let first = staging_name(0, "a", &occ);
        occ.insert(first.clone());
        let second = staging_name(0, "a", &occ);
        assert_ne!(first, second);
    }
}
