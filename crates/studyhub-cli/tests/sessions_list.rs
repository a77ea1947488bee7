mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use chrono::Duration;
use fixtures::{record, write_config};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn sessions_server(records: Vec<Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessions": records })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_puts_upcoming_first_and_marks_past() {
    let server = sessions_server(vec![
        record("yesterday", "Old Review", -Duration::days(1), None),
        record("tomorrow", "Next Lesson", Duration::days(1), None),
    ])
    .await;
    let home = tempdir().unwrap();

    let output = cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .arg("list")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Next Lesson"));
    assert!(!lines[0].contains("[past]"));
    assert!(lines[1].contains("Old Review"));
    assert!(lines[1].contains("[past]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_is_sorted() {
    let server = sessions_server(vec![
        record("later", "Later", Duration::days(3), None),
        record("sooner", "Sooner", Duration::days(1), None),
    ])
    .await;
    let home = tempdir().unwrap();

    let output = cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["list", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let sessions: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = sessions
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sooner", "later"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_empty() {
    let server = sessions_server(vec![]).await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You don't have any upcoming sessions.",
        ));
}

#[test]
fn test_list_falls_back_to_samples_locally() {
    let home = tempdir().unwrap();
    write_config(home.path(), "environment = \"local\"\nuser_id = \"user-7\"\n");

    let output = cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", "http://127.0.0.1:9")
        .args(["list", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("sample sessions"));

    let sessions: Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions[0]["id"], "session-1");
    assert_eq!(sessions[1]["id"], "session-2");
    assert!(sessions.iter().all(|s| s["student_id"] == "user-7"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_fails_in_production() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();
    write_config(home.path(), "environment = \"production\"\n");

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch sessions."))
        .stderr(predicate::str::contains("HTTP 500"));
}
