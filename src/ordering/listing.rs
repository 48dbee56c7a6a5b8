//! Working sequence of entries.
//! Position in a `Listing` is the only thing that decides target numbering.

use super::entry::Entry;

/// Owned, ordered list of entries supporting positional edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    entries: Vec<Entry>,
}

impl Listing {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Insert so `entry` lands at 1-based `position`, before whatever is
    /// there now. 0 puts it first; anything past the end appends.
    pub fn insert_at(&mut self, position: usize, entry: Entry) {
        let index = position.saturating_sub(1).min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// 0-based index of the entry currently stored under `file_name`.
    pub fn position_of(&self, file_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.current_name() == Some(file_name))
    }

    /// Remove and return the entry currently stored under `file_name`.
    pub fn take(&mut self, file_name: &str) -> Option<Entry> {
        self.position_of(file_name).map(|i| self.entries.remove(i))
    }

    /// Keep only entries that carry (or will carry) a numeral prefix.
    pub fn ordered_only(self) -> Self {
        Self {
            entries: self.entries.into_iter().filter(Entry::is_ordered).collect(),
        }
    }

    /// Current storage names, skipping placeholders.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().filter_map(Entry::current_name).collect()
    }
}

impl From<Vec<Entry>> for Listing {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl IntoIterator for Listing {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::entry::EntryKind;

    fn listing(names: &[&str]) -> Listing {
        names.iter().map(|n| Entry::parse(n)).collect::<Vec<_>>().into()
    }

    fn base_names(l: &Listing) -> Vec<&str> {
        l.iter().map(Entry::name).collect()
    }

    #[test]
    fn insert_at_is_one_based_insert_before() {
        let mut l = listing(&["1-a", "2-b", "3-c"]);
        l.insert_at(2, Entry::placeholder("new", EntryKind::File));
        assert_eq!(base_names(&l), vec!["a", "new", "b", "c"]);
    }

    #[test]
    fn insert_at_clamps_both_ends() {
        let mut l = listing(&["1-a", "2-b"]);
        l.insert_at(0, Entry::placeholder("front", EntryKind::File));
        l.insert_at(99, Entry::placeholder("back", EntryKind::File));
        assert_eq!(base_names(&l), vec!["front", "a", "b", "back"]);
    }

    #[test]
    fn take_matches_exact_current_name() {
        let mut l = listing(&["1-a", "2-b", "notes"]);
        assert!(l.take("b").is_none());
        let taken = l.take("2-b").unwrap();
        assert_eq!(taken.name(), "b");
        assert_eq!(l.names(), vec!["1-a", "notes"]);
        assert_eq!(l.take("notes").map(|e| e.is_ordered()), Some(false));
    }

    #[test]
    fn ordered_only_keeps_placeholders() {
        let mut l = listing(&["1-a", "notes"]);
        l.push(Entry::placeholder("new", EntryKind::Directory));
        let ordered = l.ordered_only();
        assert_eq!(base_names(&ordered), vec!["a", "new"]);
    }
}
