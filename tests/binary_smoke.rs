use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::process::Command;

fn ordir(cfg: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ordir"));
    cmd.arg("--config").arg(cfg).env_remove("ORDIR_CONFIG");
    cmd
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let td = TempDir::new().unwrap();
    td.child("config.xml")
        .write_str("<config><log_level>quiet</log_level></config>")
        .unwrap();
    let cfg = td.child("config.xml").path().to_path_buf();
    (td, cfg)
}

#[test]
fn binary_print_config_succeeds() {
    let (_td, cfg) = setup();
    let out = ordir(&cfg).arg("--print-config").output().expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("config.xml"));
}

#[test]
fn fix_renumbers_directory() {
    let (td, cfg) = setup();
    let book = td.child("book");
    book.child("2-intro").create_dir_all().unwrap();
    book.child("5-body").create_dir_all().unwrap();

    let out = ordir(&cfg).arg("fix").arg(book.path()).output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("rename '2-intro' -> '1-intro'"), "stdout: {stdout}");

    assert!(book.child("1-intro").path().is_dir());
    assert!(book.child("2-body").path().is_dir());
}

#[test]
fn dry_run_flag_changes_nothing() {
    let (td, cfg) = setup();
    let book = td.child("book");
    book.child("3-a").create_dir_all().unwrap();

    let out = ordir(&cfg)
        .args(["--dry-run", "fix"])
        .arg(book.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(book.child("3-a").path().is_dir());
    assert!(!book.child("1-a").path().exists());
}

#[test]
fn insert_then_list() {
    let (td, cfg) = setup();
    let book = td.child("book");
    book.child("1-intro").create_dir_all().unwrap();

    let out = ordir(&cfg)
        .arg("insert")
        .arg(book.path())
        .args(["notes.md", "--kind", "file", "--position", "1"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    book.child("1-notes.md").assert("");

    let out = ordir(&cfg).arg("list").arg(book.path()).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let notes = stdout.find("1-notes.md").expect("notes listed");
    let intro = stdout.find("2-intro").expect("intro listed");
    assert!(notes < intro, "stdout: {stdout}");
}

#[test]
fn missing_entry_fails_with_message() {
    let (td, cfg) = setup();
    let book = td.child("book");
    book.child("1-intro").create_dir_all().unwrap();

    let out = ordir(&cfg)
        .arg("remove")
        .arg(book.path())
        .arg("nope")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn no_subcommand_fails() {
    let (_td, cfg) = setup();
    let out = ordir(&cfg).output().unwrap();
    assert!(!out.status.success());
}
