//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A wire record starting `start_offset` from now and lasting 45 minutes.
pub fn record(id: &str, title: &str, start_offset: Duration, link: Option<&str>) -> Value {
    let start = Utc::now() + start_offset;
    json!({
        "id": id,
        "tutor_id": "user-1",
        "student_id": "user-2",
        "subject": { "id": "subject-1", "code": "CSE101", "name": "Intro to Programming" },
        "start_time": iso(start),
        "end_time": iso(start + Duration::minutes(45)),
        "status": "scheduled",
        "zoomLink": link,
        "sessionType": "tutor",
        "title": title,
        "description": null
    })
}

pub fn write_config(home: &Path, contents: &str) {
    fs::write(home.join("config.toml"), contents).unwrap();
}
