//! Data models for `CourseScope`

pub mod catalog;
pub mod course;
pub mod plan;
pub mod state;

pub use catalog::{Catalog, CatalogError};
pub use course::{parse_credits, Course, Difficulty, PrerequisiteGroup};
pub use plan::{Plan, PlanSummary};
pub use state::{Major, StateError, UserState};
