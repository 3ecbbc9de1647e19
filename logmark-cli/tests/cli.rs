use assert_cmd::Command;
use predicates::prelude::*;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn logmark() -> Command {
    Command::cargo_bin("logmark").expect("binary builds")
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut path = env::temp_dir();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time");
    path.push(format!(
        "logmark_cli_{}_{}_{}.md",
        name,
        now.as_secs(),
        now.subsec_nanos()
    ));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn renders_sized_image_from_stdin() {
    logmark()
        .arg("-")
        .write_stdin("![plot](attachment/123){width=100 height=100}")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<img src="attachment/123" alt="plot" width=100 height=100>"#,
        ));
}

#[test]
fn renders_with_url_prefix() {
    logmark()
        .args(["-", "--url-prefix", "http://foo.com/bar/"])
        .write_stdin("![](attachment/5)")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"src="http://foo.com/bar/attachment/5""#,
        ));
}

#[test]
fn removes_embedded_image() {
    logmark()
        .args(["-", "--remove-image", "123456789"])
        .write_stdin("ABC ![](attachment/123456789){width=100 height=100} DEF")
        .assert()
        .success()
        .stdout("ABC  DEF\n");
}

#[test]
fn remove_missing_id_keeps_input_and_warns() {
    logmark()
        .args(["-", "--remove-image", "123"])
        .write_stdin("whatever")
        .assert()
        .success()
        .stdout("whatever\n")
        .stderr(predicate::str::contains("No embedded image found"));
}

#[test]
fn remove_with_save_writes_back() {
    let path = temp_file(
        "save",
        "keep ![](attachment/77){width=1 height=1} this",
    );
    logmark()
        .args([
            path.to_str().expect("path"),
            "--remove-image",
            "77",
            "--save",
        ])
        .assert()
        .success();
    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, "keep  this");
    fs::remove_file(&path).ok();
}

#[test]
fn save_requires_file_input() {
    logmark()
        .args(["-", "--remove-image", "1", "--save"])
        .write_stdin("![](a/1){width=1 height=1}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a file path"));
}

#[test]
fn query_prints_search_string() {
    logmark()
        .args([
            "--query",
            r#"{"logbooks":["ops","cryo"],"startDate":"1 hour","endDate":"now"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("logbooks=ops,cryo"))
        .stdout(predicate::str::contains("start=1 hour&end=now"));
}

#[test]
fn query_rejects_invalid_json() {
    logmark()
        .args(["--query", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn group_prints_day_headers() {
    let json = r#"[
        {"id": 1, "title": "first", "owner": "op", "createdDate": 1700000000000},
        {"id": 2, "title": "second", "createdDate": 1700000100000}
    ]"#;
    logmark()
        .args(["-", "--group"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-11-14"))
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("[op]"));
}

#[test]
fn mutually_exclusive_modes_are_rejected() {
    logmark()
        .args(["-", "--group", "--remove-image", "1"])
        .write_stdin("x")
        .assert()
        .failure();
}
