//! Sample sessions used when a local backend is unreachable.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{Session, SessionStatus, SessionType, Subject, sort_sessions};

/// Student id used when nobody is signed in.
pub const ANONYMOUS_STUDENT_ID: &str = "user-2";

/// Returns the sample sessions, already in display order.
///
/// One session starts a day after `now`; the other is a fixed, long-past lab
/// review so both the upcoming and past styles show up.
pub fn sample_sessions(now: DateTime<Utc>, student_id: Option<&str>) -> Vec<Session> {
    let student_id = student_id.unwrap_or(ANONYMOUS_STUDENT_ID).to_string();

    let mut sessions = vec![
        Session {
            id: "session-1".to_string(),
            tutor_id: "user-1".to_string(),
            student_id: student_id.clone(),
            subject: Subject {
                id: "subject-1".to_string(),
                code: "CSE101".to_string(),
                name: "Intro to Programming".to_string(),
            },
            start_time: now + Duration::hours(24),
            end_time: now + Duration::hours(25),
            status: SessionStatus::Scheduled,
            meeting_link: None,
            session_type: SessionType::Tutor,
            title: Some("Programming Fundamentals".to_string()),
            description: Some("Going over the basics of programming".to_string()),
        },
        Session {
            id: "session-2".to_string(),
            tutor_id: "user-3".to_string(),
            student_id,
            subject: Subject {
                id: "subject-2".to_string(),
                code: "PHY101".to_string(),
                name: "Physics Lab Review".to_string(),
            },
            start_time: lab_review_at(11, 30),
            end_time: lab_review_at(12, 15),
            status: SessionStatus::Scheduled,
            meeting_link: None,
            session_type: SessionType::Tutor,
            title: Some("Physics Lab Review".to_string()),
            description: Some("Preparing for upcoming lab experiments".to_string()),
        },
    ];

    sort_sessions(&mut sessions, now);
    sessions
}

fn lab_review_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 8, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}
