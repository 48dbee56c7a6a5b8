//! Ordered-directory engine.
//! Scanning, planning and the insert/move/remove/fix operations built on them.

mod entry;
mod listing;
mod ops;
mod plan;
mod scan;

pub use entry::{Entry, EntryKind, Ordinal};
pub use listing::Listing;
pub use ops::OrderedDir;
pub use plan::{pad_width, plan, render_numeral, Action};
pub use scan::scan;
