//! XML config parsing without touching user state.

use std::fs;
use tempfile::tempdir;

use ordir::{load_config, load_config_from_xml_path, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let log_file = td.path().join("ordir.log");

    let xml = format!(
        r#"
<config>
  <log_level>info</log_level>
  <log_file>{}</log_file>
  <include_unordered>true</include_unordered>
  <dry_run> false </dry_run>
</config>
"#,
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert!(cfg.include_unordered);
    assert!(!cfg.dry_run);
}

#[test]
fn missing_fields_take_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>normal</log_level></config>").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg, ordir::Config::default());
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><download_base>/x</download_base></config>").unwrap();

    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(err.to_string().contains("parse config xml"), "{err:#}");
}

#[test]
fn invalid_level_is_config_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>loud</log_level></config>").unwrap();

    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(
        err.chain()
            .any(|e| matches!(e.downcast_ref::<ordir::OrdirError>(), Some(ordir::OrdirError::Config(_)))),
        "{err:#}"
    );
}

#[test]
fn malformed_xml_is_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>info</config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn explicit_missing_config_is_error() {
    let td = tempdir().unwrap();
    let err = load_config(Some(td.path().join("absent.xml").as_path())).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{err:#}");
}
