//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches the subcommand
//! against the real filesystem.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use ordir::cli::{Args, Command};
use ordir::config::{create_template_config, default_config_path, load_config};
use ordir::output as out;
use ordir::{Action, Config, FsStorage, OrderedDir, OrdirError};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config location questions are answered before logging init
    if args.print_config {
        let path = match &args.config {
            Some(p) => p.clone(),
            None => default_config_path()?,
        };
        out::print_info(&format!("ordir config path:\n  {}\n", path.display()));
        if path.exists() {
            out::print_info("A config file exists at that location.");
        } else {
            out::print_info("No config file exists there yet. Run with --init-config to create a template.");
        }
        return Ok(());
    }

    if args.init_config {
        let path = match &args.config {
            Some(p) => p.clone(),
            None => default_config_path()?,
        };
        if path.exists() {
            out::print_warn(&format!("Config already exists, leaving it alone: {}", path.display()));
            return Ok(());
        }
        create_template_config(&path)?;
        out::print_success(&format!("A template ordir config was written to: {}", path.display()));
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; run `ordir --help` for usage");
    };

    // CLI flags win over config.xml values
    let mut cfg: Config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    // Guard must live until exit so the file appender flushes
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!(?args, ?cfg, "starting ordir");

    let result = dispatch(&command, &cfg);
    if let Err(e) = &result {
        match e.downcast_ref::<OrdirError>() {
            Some(err @ OrdirError::NotFound { name, dir }) => {
                error!(code = err.code(), kind = "not_found", name = %name, dir = %dir.display(), "Operation failed")
            }
            Some(err @ OrdirError::Storage { op, path, source }) => {
                error!(code = err.code(), kind = "storage", op = *op, path = %path.display(), error = %source, "Operation failed")
            }
            Some(err) => error!(code = err.code(), error = %err, "Operation failed"),
            None => error!(error = ?e, "Operation failed"),
        }
    }
    result
}

fn dispatch(command: &Command, cfg: &Config) -> Result<()> {
    let ordered = OrderedDir::new(FsStorage::new()).dry_run(cfg.dry_run);

    let actions = match command {
        Command::List { dir } => {
            ensure_dir(dir)?;
            for entry in ordered.scan(dir)?.iter() {
                out::print_entry(entry);
            }
            return Ok(());
        }
        Command::Insert {
            dir,
            name,
            kind,
            position,
        } => {
            ensure_dir(dir)?;
            ordered.insert(dir, name, *kind, *position)?
        }
        Command::Move {
            dir,
            name,
            position,
        } => {
            ensure_dir(dir)?;
            ordered.move_entry(dir, name, *position)?
        }
        Command::Remove { dir, name } => {
            ensure_dir(dir)?;
            ordered.remove(dir, name)?
        }
        Command::Fix { dir, .. } => {
            ensure_dir(dir)?;
            ordered.fix(dir, cfg.include_unordered)?
        }
    };

    report(&actions, cfg.dry_run);
    Ok(())
}

fn report(actions: &[Action], dry_run: bool) {
    if actions.is_empty() {
        out::print_info("Already in order; nothing to do.");
        return;
    }
    for action in actions {
        out::print_action(action, dry_run);
    }
    info!(count = actions.len(), dry_run, "Operation completed");
}

/// Fail early with a readable message instead of a raw list error.
fn ensure_dir(dir: &Path) -> Result<()> {
    let meta = std::fs::metadata(dir).with_context(|| format!("cannot access '{}'", dir.display()))?;
    if !meta.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    Ok(())
}
