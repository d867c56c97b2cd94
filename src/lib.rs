//! Shared library for `CourseScope`
//! Contains the prerequisite evaluator and the planning models used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{config, eligibility, filters, get_version, models, progress, report};
