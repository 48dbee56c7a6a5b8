use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use ordir::config::CONFIG_ENV;
use ordir::{default_config_path, load_config, LogLevel};

#[test]
#[serial]
fn env_var_selects_config_file() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom_config.xml");
    fs::write(&cfg, "<config><log_level>debug</log_level></config>").unwrap();

    // Serialized: the process environment is shared across tests
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }

    let resolved = default_config_path().expect("default_config_path");
    let loaded = load_config(None);

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(resolved, cfg, "config path should equal {CONFIG_ENV} value");
    assert_eq!(loaded.unwrap().log_level, LogLevel::Debug);
}

#[test]
#[serial]
fn env_var_pointing_nowhere_is_error() {
    let td = tempdir().unwrap();
    let missing = td.path().join("nope.xml");

    unsafe {
        std::env::set_var(CONFIG_ENV, &missing);
    }
    let loaded = load_config(None);
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert!(loaded.is_err());
}

#[test]
#[serial]
fn explicit_path_beats_env_var() {
    let td = tempdir().unwrap();
    let env_cfg = td.path().join("env.xml");
    let flag_cfg = td.path().join("flag.xml");
    fs::write(&env_cfg, "<config><log_level>debug</log_level></config>").unwrap();
    fs::write(&flag_cfg, "<config><log_level>quiet</log_level></config>").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &env_cfg);
    }
    let loaded = load_config(Some(flag_cfg.as_path()));
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(loaded.unwrap().log_level, LogLevel::Quiet);
}
