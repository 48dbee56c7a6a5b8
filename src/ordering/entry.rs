//! Entry model: one item of a directory listing at a point in time.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<digits>-<name>`; the name may itself contain `-` or `.`.
static ORDERED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-(.*)$").expect("ordered-name pattern compiles"));

/// What to create for a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryKind {
    #[value(alias = "f")]
    File,
    #[value(name = "dir", aliases = ["d", "directory"])]
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Directory => f.write_str("dir"),
        }
    }
}

/// Numeral prefix exactly as written on disk.
///
/// Compares by numeric value (leading zeros ignored), so `9` < `10` and
/// `01` == `1`, without any width limit.
#[derive(Debug, Clone, Eq)]
pub struct Ordinal(String);

impl Ordinal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }

    /// Numeric value, when it fits in a u64.
    pub fn value(&self) -> Option<u64> {
        self.significant().parse().ok()
    }
}

impl PartialEq for Ordinal {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One positionable item of a working sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// On storage, name carries a numeral prefix.
    Ordered {
        file_name: String,
        ordinal: Ordinal,
        name: String,
    },
    /// On storage, no prefix. Only numbered when explicitly requested.
    Unordered { file_name: String },
    /// Not yet on storage; created with a prefix by the reorder pass.
    Placeholder { name: String, kind: EntryKind },
}

impl Entry {
    /// Classify a name found on storage.
    pub fn parse(file_name: &str) -> Self {
        match ORDERED_NAME.captures(file_name) {
            Some(caps) => Entry::Ordered {
                file_name: file_name.to_string(),
                ordinal: Ordinal(caps[1].to_string()),
                name: caps[2].to_string(),
            },
            None => Entry::Unordered {
                file_name: file_name.to_string(),
            },
        }
    }

    pub fn placeholder(name: impl Into<String>, kind: EntryKind) -> Self {
        Entry::Placeholder {
            name: name.into(),
            kind,
        }
    }

    /// Base name without any numeral prefix.
    pub fn name(&self) -> &str {
        match self {
            Entry::Ordered { name, .. } | Entry::Placeholder { name, .. } => name,
            Entry::Unordered { file_name } => file_name,
        }
    }

    /// Name on storage right now; `None` for placeholders.
    pub fn current_name(&self) -> Option<&str> {
        match self {
            Entry::Ordered { file_name, .. } | Entry::Unordered { file_name } => Some(file_name),
            Entry::Placeholder { .. } => None,
        }
    }

    /// Literal digit run, for ordered entries.
    pub fn order_string(&self) -> Option<&str> {
        match self {
            Entry::Ordered { ordinal, .. } => Some(ordinal.as_str()),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> Option<&Ordinal> {
        match self {
            Entry::Ordered { ordinal, .. } => Some(ordinal),
            _ => None,
        }
    }

    /// Parsed numeral value; `None` means "sorts last".
    pub fn order(&self) -> Option<u64> {
        self.ordinal().and_then(Ordinal::value)
    }

    /// True when the entry has, or is meant to receive, a numeral prefix.
    pub fn is_ordered(&self) -> bool {
        !matches!(self, Entry::Unordered { .. })
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Ordered { file_name, .. } => f.write_str(file_name),
            Entry::Unordered { file_name } => write!(f, "{file_name} (unordered)"),
            Entry::Placeholder { name, kind } => write!(f, "{name} (new {kind})"),
        }
    }
}
