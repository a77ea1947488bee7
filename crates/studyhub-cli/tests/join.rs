mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use chrono::Duration;
use fixtures::{record, write_config};
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with(records: Vec<serde_json::Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessions": records })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_existing_link_makes_no_request() {
    let server = server_with(vec![record(
        "s-1",
        "Loops",
        Duration::hours(2),
        Some("https://meet.example.com/j/1"),
    )])
    .await;
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["join", "s-1", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://meet.example.com/j/1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_creates_meeting() {
    let server = server_with(vec![record("s-2", "Recursion", Duration::hours(5), None)]).await;
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .and(body_partial_json(json!({
            "topic": "Recursion",
            "duration": 45,
            "session_type": "tutor"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "join_url": "https://meet.example.com/j/2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["join", "s-2", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://meet.example.com/j/2"))
        .stderr(predicate::str::contains("Session created successfully!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_meeting_failure() {
    let server = server_with(vec![record("s-3", "Graphs", Duration::hours(5), None)]).await;
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();
    write_config(home.path(), "environment = \"production\"\n");

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["join", "s-3", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not create meeting. Please try again.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_past_session_is_refused() {
    let server = server_with(vec![record("old", "Old", -Duration::days(2), None)]).await;
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["join", "old", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already ended"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_unknown_session() {
    let server = server_with(vec![]).await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("studyhub")
        .env("STUDYHUB_HOME", home.path())
        .env("STUDYHUB_API_BASE_URL", server.uri())
        .args(["join", "missing", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such session"));
}
