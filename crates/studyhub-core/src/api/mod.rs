//! HTTP access to the tutoring backend.

mod client;
mod error;

pub use client::StudyHubClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
