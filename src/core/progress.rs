//! Major requirements checklist and progress tracking

use crate::eligibility::CodeSet;
use crate::models::{Course, Major};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A required course of a major, with the requirement bucket it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredCourse {
    /// The course record
    #[serde(flatten)]
    pub course: Course,
    /// Requirement bucket (e.g., "Core", "Mathematics")
    #[serde(default)]
    pub requirement_type: Option<String>,
}

/// An elective option of a major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveCourse {
    /// The course record
    #[serde(flatten)]
    pub course: Course,
    /// Elective list the course belongs to (e.g., "Technical Electives")
    #[serde(default)]
    pub elective_type: Option<String>,
}

/// Requirements document served per major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorRequirements {
    /// The major these requirements belong to
    pub major: Major,
    /// Courses every student in the major must take
    #[serde(default)]
    pub required_courses: Vec<RequiredCourse>,
    /// Elective options
    #[serde(default)]
    pub elective_courses: Vec<ElectiveCourse>,
}

impl MajorRequirements {
    /// Parse a requirements document
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the requirements shape
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a requirements document from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }

    /// Codes of the required courses, in document order
    #[must_use]
    pub fn required_codes(&self) -> Vec<&str> {
        self.required_courses
            .iter()
            .map(|r| r.course.code.as_str())
            .collect()
    }

    /// Electives grouped under their catalog section
    #[must_use]
    pub fn electives_by_section(&self) -> BTreeMap<&'static str, Vec<&ElectiveCourse>> {
        let mut sections: BTreeMap<&'static str, Vec<&ElectiveCourse>> = BTreeMap::new();
        for elective in &self.elective_courses {
            let section = elective_section(elective.elective_type.as_deref().unwrap_or(""));
            sections.entry(section).or_default().push(elective);
        }
        sections
    }
}

/// Catalog section an elective list is shown under
#[must_use]
pub fn elective_section(elective_type: &str) -> &'static str {
    if elective_type.contains("CS Electives") || elective_type.contains("Technical") {
        "Computer Science Concentration Requirements"
    } else if elective_type.contains("Math") {
        "Required Mathematics Courses"
    } else if elective_type.contains("Science") {
        "Science Electives"
    } else {
        "Free Electives"
    }
}

/// Where a course stands for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    /// Finished
    Completed,
    /// Being taken now
    InProgress,
    /// Staged in the plan
    Planned,
    /// Not started
    Pending,
}

impl CourseStatus {
    /// Status of `code`; completion outranks in-progress, which outranks planning
    #[must_use]
    pub fn of(code: &str, completed: &CodeSet, in_progress: &CodeSet, planned: &CodeSet) -> Self {
        if completed.contains(code) {
            Self::Completed
        } else if in_progress.contains(code) {
            Self::InProgress
        } else if planned.contains(code) {
            Self::Planned
        } else {
            Self::Pending
        }
    }

    /// Whether prerequisite hints should be shown for this status
    #[must_use]
    pub const fn shows_prerequisites(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Planned => "planned",
            Self::Pending => "pending",
        };
        f.write_str(label)
    }
}

/// Progress through the required courses of a major
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequirementProgress {
    /// Number of required courses
    pub total: usize,
    /// Required courses completed
    pub completed: usize,
    /// Required courses planned but not completed
    pub in_plan: usize,
    /// Required courses neither completed nor planned
    pub remaining: usize,
    /// Completed share, rounded to a whole percent
    pub percent: u32,
}

impl RequirementProgress {
    /// Compute progress over the required course codes
    ///
    /// Only completed courses count toward the percentage.
    #[must_use]
    pub fn compute<'a, I>(required: I, completed: &CodeSet, planned: &CodeSet) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut progress = Self::default();
        for code in required {
            progress.total += 1;
            if completed.contains(code) {
                progress.completed += 1;
            } else if planned.contains(code) {
                progress.in_plan += 1;
            }
        }
        progress.remaining = progress.total - progress.completed - progress.in_plan;
        progress.percent = percent(progress.completed, progress.total);
        progress
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as u32
    }
}

impl fmt::Display for RequirementProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} completed / {} in plan / {} remaining ({}% complete)",
            self.completed, self.in_plan, self.remaining, self.percent
        )
    }
}
