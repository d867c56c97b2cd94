//! Core module: models, the eligibility evaluator and everything built on it

pub mod config;
pub mod eligibility;
pub mod filters;
pub mod models;
pub mod progress;
pub mod report;

/// Returns the current version of the `CourseScope` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
