// ABOUTME: Integration tests for the leaf CLI binary.
// ABOUTME: Tests selector queries over files and stdin, normalization and digit extraction.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
<ul class="links">
<li><a href="/one" class="ext">One</a></li>
<li><a href="/two">Two <b>bold</b></a></li>
</ul>
</body>
</html>"#;

fn leaf_cmd() -> Command {
    Command::cargo_bin("leaf").unwrap()
}

fn write_page(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("page.html");
    fs::write(&path, PAGE).unwrap();
    path
}

#[test]
fn select_text_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_page(&temp_dir);

    leaf_cmd()
        .arg("select")
        .arg("ul.links a")
        .arg("--file")
        .arg(&path)
        .arg("--mode")
        .arg("text")
        .assert()
        .success()
        .stdout("One\nTwo bold\n");
}

#[test]
fn select_attribute_from_stdin() {
    let mut cmd = leaf_cmd();
    cmd.arg("select").arg("a").arg("--attr").arg("href");
    cmd.write_stdin(PAGE)
        .assert()
        .success()
        .stdout("/one\n/two\n");
}

#[test]
fn select_inner_html_at_index() {
    let mut cmd = leaf_cmd();
    cmd.args(["select", "a", "--index", "1", "--mode", "inner"]);
    cmd.write_stdin(PAGE)
        .assert()
        .success()
        .stdout("Two <b>bold</b>\n");
}

#[test]
fn select_index_out_of_range_prints_nothing() {
    let mut cmd = leaf_cmd();
    cmd.args(["select", "a", "--index", "9"]);
    cmd.write_stdin(PAGE)
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn select_json_output() {
    let mut cmd = leaf_cmd();
    cmd.args(["select", "a.ext", "--json"]);
    let output = cmd.write_stdin(PAGE).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let matches = parsed.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["tag"], "a");
    assert_eq!(matches[0]["attributes"]["href"], "/one");
    assert_eq!(matches[0]["content"], r#"<a href="/one" class="ext">One</a>"#);
}

#[test]
fn select_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("out.txt");

    let mut cmd = leaf_cmd();
    cmd.args(["select", "title", "--mode", "text", "--output"])
        .arg(&out_path);
    cmd.write_stdin(PAGE).assert().success();

    assert_eq!(fs::read_to_string(&out_path).unwrap(), "Test Page");
}

#[test]
fn invalid_selector_fails() {
    let mut cmd = leaf_cmd();
    cmd.args(["select", "[[[nope"]);
    cmd.write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector"));
}

#[test]
fn unknown_encoding_fails() {
    let mut cmd = leaf_cmd();
    cmd.args(["select", "a", "--encoding", "klingon"]);
    cmd.write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown encoding"));
}

#[test]
fn missing_file_fails() {
    leaf_cmd()
        .args(["select", "a", "--file", "/definitely/not/here.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn normalize_argument() {
    leaf_cmd()
        .args(["normalize", "--accents", "--spaces", "  Crème   brûlée "])
        .assert()
        .success()
        .stdout("Creme brulee\n");
}

#[test]
fn normalize_stdin_linebreaks() {
    let mut cmd = leaf_cmd();
    cmd.args(["normalize", "--linebreaks"]);
    cmd.write_stdin("a\n\n\nb\n")
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn digits_command() {
    leaf_cmd()
        .args(["digits", "ab12c3"])
        .assert()
        .success()
        .stdout("123\n");
}
