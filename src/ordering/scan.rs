//! Directory scanner: list a directory and classify its entries.

use std::path::Path;
use tracing::debug;

use super::entry::Entry;
use super::listing::Listing;
use crate::errors::Result;
use crate::storage::Storage;

/// Read `dir` and return its entries sorted by numeral.
///
/// Ordered entries come first in ascending numeric order; unordered entries
/// follow. The sort is stable, so ties (`01-a` next to `1-b`) and unordered
/// entries keep the order storage listed them in.
pub fn scan<S: Storage + ?Sized>(storage: &S, dir: &Path) -> Result<Listing> {
    let mut entries: Vec<Entry> = storage
        .list_entries(dir)?
        .iter()
        .map(|name| Entry::parse(name))
        .collect();
    entries.sort_by(|a, b| match (a.ordinal(), b.ordinal()) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let ordered = entries.iter().filter(|e| e.is_ordered()).count();
    debug!(
        dir = %dir.display(),
        total = entries.len(),
        ordered,
        "scanned directory"
    );
    Ok(Listing::new(entries))
}
