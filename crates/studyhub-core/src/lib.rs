//! Core StudyHub library (config, sessions, backend client, list state).

pub mod api;
pub mod config;
pub mod logging;
pub mod meeting;
pub mod sessions;
pub mod view;
