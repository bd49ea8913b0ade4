//! Shared helpers for the backend's integration test suites: one-time
//! logging bootstrap and problem-details assertions.

pub mod logging;
pub mod problem_details;
