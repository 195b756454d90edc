#![cfg(feature = "digest")]

use std::path::Path;
use std::process::{Command, Output};

use nsfinfo::formats::nsf::{FixedStr, NsfHeader};
use tempfile::TempDir;

const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_NOINPUT: i32 = 66;

fn nsfinfo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nsfinfo"))
        .args(args)
        .env_remove("NSFINFO_LOG")
        .output()
        .expect("failed to run nsfinfo")
}

fn sample_file(dir: &TempDir) -> std::path::PathBuf {
    let header = NsfHeader {
        version: 1,
        song_count: 3,
        song_start: 1,
        load_addr: 0x8000,
        init_addr: 0x8000,
        play_addr: 0x8003,
        name: FixedStr::new(b"Test \"Tune\"").unwrap(),
        artist: FixedStr::new(b"Someone").unwrap(),
        copyright: FixedStr::new(b"2024").unwrap(),
        speed_ntsc: 0x411a,
        ..NsfHeader::default()
    };
    let mut data = header.to_bytes().to_vec();
    data.extend_from_slice(&[0x60; 16]);
    let path = dir.path().join("test.nsf");
    std::fs::write(&path, data).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn text_report_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    let out = nsfinfo(&[arg(&path)]);

    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("version      = 1\n"));
    assert!(stdout.contains("name         = \"Test \"Tune\"\"\n"));
    assert!(stdout.contains("load_addr    = 8000\n"));
    assert_eq!(stdout.lines().count(), 17);
    assert!(stdout.lines().any(|l| l.starts_with("sha256       = ")));
}

#[test]
fn json_report_digests_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    let out = nsfinfo(&["-J", arg(&path)]);

    assert_eq!(out.status.code(), Some(0));
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["nsf"]["song_count"], 3);
    assert_eq!(doc["nsf"]["name"], "Test \"Tune\"");
    assert_eq!(doc["nsf"]["speed_ntsc"], "411a");

    let data = std::fs::read(&path).unwrap();
    let md5 = format!("{:x}", md5::compute(&data));
    assert_eq!(doc["metadata"]["md5"], md5.as_str());
    assert_eq!(doc["metadata"]["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn sha1_pairing_is_selectable() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    let out = nsfinfo(&["-J", "-d", "md5-sha1", arg(&path)]);

    assert_eq!(out.status.code(), Some(0));
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["metadata"]["sha1"].as_str().unwrap().len(), 40);
    assert!(doc["metadata"].get("sha256").is_none());
}

#[test]
fn usage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    for args in [
        vec![],
        vec!["-h"],
        vec!["-x", arg(&path)],
        vec![arg(&path), arg(&path)],
    ] {
        let out = nsfinfo(&args);
        assert_eq!(out.status.code(), Some(EX_USAGE), "args {args:?}");
        assert!(out.stdout.is_empty());
        let stderr = String::from_utf8(out.stderr).unwrap();
        assert!(stderr.starts_with("Usage: nsfinfo [options] filename\n"));
        assert!(stderr.contains("  -J            JSON-formatted output\n"));
        assert!(stderr.contains("Report bugs at "));
    }
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.nsf");
    let out = nsfinfo(&[arg(&path)]);

    assert_eq!(out.status.code(), Some(EX_NOINPUT));
    assert!(out.stdout.is_empty());
}

#[test]
fn short_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.nsf");
    std::fs::write(&path, b"NESM\x1a\x01").unwrap();
    let out = nsfinfo(&["-J", arg(&path)]);

    assert_eq!(out.status.code(), Some(EX_DATAERR));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("read was short"));
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn invalid_headers_produce_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    let good = std::fs::read(&path).unwrap();

    let cases: [(usize, u8, &str); 4] = [
        (0x00, b'X', "file is not in NSF format"),
        (0x2D, b'A', "NSF name field has no trailing null"),
        (0x4D, b'A', "NSF artist field has no trailing null"),
        (0x6D, b'A', "NSF copyright field has no trailing null"),
    ];
    for (offset, value, message) in cases {
        let mut data = good.clone();
        data[offset] = value;
        std::fs::write(&path, &data).unwrap();

        let out = nsfinfo(&[arg(&path)]);
        assert_eq!(out.status.code(), Some(EX_DATAERR), "{message}");
        assert!(out.stdout.is_empty());
        let stderr = String::from_utf8(out.stderr).unwrap();
        assert_eq!(stderr, format!("nsfinfo: {message}\n"));
    }
}
