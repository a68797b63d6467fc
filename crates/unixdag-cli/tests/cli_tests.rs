#![allow(deprecated)] // cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::str::{contains, starts_with};
use std::fs;
use tempfile::TempDir;

fn unixdag(db: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("unixdag").unwrap();
    cmd.arg("--db").arg(db);
    cmd
}

fn import(db: &std::path::Path, args: &[&str]) -> String {
    let output = unixdag(db).arg("import").args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn import_then_cat_round_trips() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");
    let input = temp.path().join("input.bin");
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 253) as u8).collect();
    fs::write(&input, &data).unwrap();

    let cid = import(&db, &[input.to_str().unwrap(), "--chunk-size", "1000"]);
    assert!(cid.starts_with("bafy"));

    let output = temp.path().join("output.bin");
    unixdag(&db)
        .arg("cat")
        .arg(&cid)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert_eq!(fs::read(&output).unwrap(), data);

    unixdag(&db)
        .arg("stat")
        .arg(&cid)
        .assert()
        .success()
        .stdout(contains("UnixFS type:  File"))
        .stdout(contains("File size:    5000"));
}

#[test]
fn import_from_stdin() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");

    unixdag(&db)
        .arg("import")
        .arg("-")
        .write_stdin("hello world")
        .assert()
        .success()
        .stdout(starts_with("bafkqac3imvwgy3zao5xxe3de"));
}

#[test]
fn stat_reports_raw_leaf_length() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");
    let input = temp.path().join("small.txt");
    fs::write(&input, vec![b'x'; 200]).unwrap();

    let cid = import(&db, &[input.to_str().unwrap()]);
    unixdag(&db)
        .arg("stat")
        .arg(&cid)
        .assert()
        .success()
        .stdout(contains("Kind:         raw"))
        .stdout(contains("File size:    200"));
}

#[test]
fn invalid_configuration_fails() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");
    let input = temp.path().join("input.bin");
    fs::write(&input, b"data").unwrap();

    unixdag(&db)
        .arg("import")
        .arg(&input)
        .arg("--cid-version")
        .arg("3")
        .assert()
        .failure()
        .stderr(contains("unknown CID version: 3"));
}

#[test]
fn cat_unknown_cid_fails() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");

    unixdag(&db)
        .arg("cat")
        .arg("bafkreic5r7h67kno5nyr7ohndzfx2xektox2i3uoo3tivimk3ts2cdpwvm")
        .assert()
        .failure()
        .stderr(contains("block not found"));
}

#[test]
fn unknown_hash_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("blocks.db");

    unixdag(&db)
        .arg("import")
        .arg("-")
        .arg("--hash")
        .arg("md5")
        .write_stdin("data")
        .assert()
        .code(2)
        .stderr(contains("invalid value 'md5'"))
        .stderr(contains("unknown hash function: md5"));
    // Rejected while parsing arguments, before the database is opened.
    assert!(!db.exists());
}
