//! Display order for the session list.
//!
//! Upcoming sessions (end ≥ now) come first, past sessions (end < now) last.
//! Inside each group sessions run by ascending start time. Callers take one
//! `now` snapshot per pass so the order cannot change halfway through a sort.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::Session;

/// Which side of `now` a session falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timeline {
    Upcoming,
    Past,
}

impl Timeline {
    pub fn of(session: &Session, now: DateTime<Utc>) -> Self {
        if session.is_past(now) {
            Timeline::Past
        } else {
            Timeline::Upcoming
        }
    }
}

/// Total order used by the list.
pub fn compare(a: &Session, b: &Session, now: DateTime<Utc>) -> Ordering {
    Timeline::of(a, now)
        .cmp(&Timeline::of(b, now))
        .then_with(|| a.start_time.cmp(&b.start_time))
}

/// Sorts in place. Stable, so equal start times keep their fetch order.
pub fn sort_sessions(sessions: &mut [Session], now: DateTime<Utc>) {
    sessions.sort_by(|a, b| compare(a, b, now));
}
