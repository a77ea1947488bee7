//! Tutoring sessions: model, ordering, labels and offline samples.

pub mod format;
mod model;
mod ordering;
mod samples;

pub use model::{
    InvalidRecord, Session, SessionRecord, SessionStatus, SessionType, SessionsEnvelope, Subject,
    parse_timestamp, session_from_value,
};
pub use ordering::{Timeline, compare, sort_sessions};
pub use samples::{ANONYMOUS_STUDENT_ID, sample_sessions};
