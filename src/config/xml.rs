//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Unknown fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::CONFIG_ENV;
use crate::errors::OrdirError;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "include_unordered", default, deserialize_with = "de_bool_trimmed_opt")]
    include_unordered: Option<bool>,
    #[serde(rename = "dry_run", default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
}

// Accept surrounding whitespace around true/false
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected true or false, got '{s}'"))),
    }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(OrdirError::Config)?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.include_unordered = parsed.include_unordered.unwrap_or(false);
    cfg.dry_run = parsed.dry_run.unwrap_or(false);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents).map_err(|e| {
        OrdirError::Config(format!("parse config xml '{}': {e}", path.display()))
    })?;
    xml_to_config(parsed).with_context(|| format!("config xml '{}'", path.display()))
}

/// Resolve and load the effective config file.
///
/// - `explicit` (from `--config`) or `$ORDIR_CONFIG` must exist.
/// - The default location is optional; a missing file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let env_set = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path()?, env_set),
    };

    if !path.exists() {
        if required {
            return Err(OrdirError::Config(format!(
                "config file does not exist: {}",
                path.display()
            ))
            .into());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }

    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}

/// Write the commented template config to `path`.
/// Refuses to write through a symlinked ancestor or over an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let content = "<!--\n  ordir configuration (XML)\n\n    log_level          -> quiet | normal | info | debug\n    log_file           -> path to log file (optional; stderr still used)\n    include_unordered  -> `fix` also numbers entries without a prefix (true/false)\n    dry_run            -> only print what would be renamed (true/false)\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <include_unordered>false</include_unordered>\n  <dry_run>false</dry_run>\n</config>\n";

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
