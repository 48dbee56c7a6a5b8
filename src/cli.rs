//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Global flags override values loaded from config.xml.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::ordering::EntryKind;

/// Keep numerically prefixed directory entries contiguously ordered.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Keep numerically prefixed directory entries (01-intro, 02-setup, ...) in order"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Explicit config file (otherwise ORDIR_CONFIG or the OS default location).
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Dry-run: print planned renames but do not modify the filesystem.
    #[arg(
        long,
        global = true,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where ordir will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by ordir and exit")]
    pub print_config: bool,

    /// Write a commented template config to the config location, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List entries in numbering order.
    List {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
    /// Create a new entry at a position and renumber the rest.
    Insert {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Base name without numeral prefix (e.g. `setup` or `notes.md`).
        name: String,
        /// Create a file or a directory.
        #[arg(long, short = 'k', value_enum)]
        kind: EntryKind,
        /// 1-based position; appended when omitted.
        #[arg(long, short = 'p')]
        position: Option<usize>,
    },
    /// Move an existing entry to a new 1-based position.
    Move {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Current full name on disk (e.g. `03-setup`).
        name: String,
        position: usize,
    },
    /// Delete an entry (empty directories only) and close the gap.
    Remove {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Current full name on disk.
        name: String,
    },
    /// Renumber a directory: close gaps, resolve duplicates, repad.
    Fix {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Also number entries that have no prefix yet.
        #[arg(long, short = 'a')]
        all: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(Command::Fix { all: true, .. }) = &self.command {
            cfg.include_unordered = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
