//! Terminal output for the ordir binary.
//!
//! Status messages carry a short label (`info:`, `ok:` on stdout; `warn:`,
//! `error:` on stderr). Action and listing lines are printed bare so they can
//! be piped. Colors are used only when stdout is a TTY.

use owo_colors::OwoColorize;

use crate::ordering::{Action, Entry};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn status(label: &str, paint: fn(&str) -> String, msg: &str, to_stderr: bool) {
    let label = if is_tty() { paint(label) } else { label.to_string() };
    if to_stderr {
        eprintln!("{label} {msg}");
    } else {
        println!("{label} {msg}");
    }
}

pub fn print_info(msg: &str) {
    status("info:", |s| s.cyan().bold().to_string(), msg, false);
}

pub fn print_warn(msg: &str) {
    status("warn:", |s| s.yellow().bold().to_string(), msg, true);
}

pub fn print_error(msg: &str) {
    status("error:", |s| s.red().bold().to_string(), msg, true);
}

pub fn print_success(msg: &str) {
    status("ok:", |s| s.green().bold().to_string(), msg, false);
}

/// One line per action; dry-run lines are prefixed so scripts can tell them apart.
pub fn print_action(action: &Action, dry_run: bool) {
    match (dry_run, is_tty()) {
        (true, true) => println!("{} {}", "would".yellow(), action),
        (true, false) => println!("would {}", action),
        (false, _) => println!("{}", action),
    }
}

/// Plain listing line: the current name, with unordered entries dimmed.
pub fn print_entry(entry: &Entry) {
    let name = entry.current_name().unwrap_or_else(|| entry.name());
    if entry.is_ordered() || !is_tty() {
        println!("{}", name);
    } else {
        println!("{}", name.dimmed());
    }
}
