//! Semester plan model

use super::{Catalog, Difficulty};
use crate::eligibility::CodeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Courses staged in the user's draft plan, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    /// Planned course codes (e.g., "CS 251")
    pub courses: Vec<String>,
}

/// Totals shown next to the plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Sum of headline credits of planned courses found in the catalog
    pub total_credits: u32,
    /// Number of light courses
    pub light: usize,
    /// Number of moderate courses
    pub moderate: usize,
    /// Number of challenging courses
    pub challenging: usize,
}

impl PlanSummary {
    /// Workload balance line, hardest first
    #[must_use]
    pub fn workload(&self) -> String {
        format!(
            "{} challenging / {} moderate / {} light",
            self.challenging, self.moderate, self.light
        )
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Credits: {} | Balance: {}",
            self.total_credits,
            self.workload()
        )
    }
}

impl Plan {
    /// Create an empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// Create a plan from stored course codes, dropping duplicates
    #[must_use]
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut plan = Self::new();
        for code in codes {
            plan.add(code);
        }
        plan
    }

    /// Add a course to the plan
    ///
    /// # Returns
    /// `true` if the course was added, `false` if it was already planned
    pub fn add(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.contains(&code) {
            false
        } else {
            self.courses.push(code);
            true
        }
    }

    /// Remove a course from the plan
    ///
    /// # Returns
    /// `true` if the course was removed, `false` if it wasn't in the plan
    pub fn remove(&mut self, code: &str) -> bool {
        if let Some(pos) = self.courses.iter().position(|c| c == code) {
            self.courses.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the course is planned
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c == code)
    }

    /// Planned codes as a set, the evaluator's `planned` input
    #[must_use]
    pub fn codes(&self) -> CodeSet {
        self.courses.iter().cloned().collect()
    }

    /// Number of planned courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether nothing is planned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Credit and workload totals; codes missing from the catalog are skipped
    #[must_use]
    pub fn summary(&self, catalog: &Catalog) -> PlanSummary {
        self.courses
            .iter()
            .filter_map(|code| catalog.get(code))
            .fold(PlanSummary::default(), |mut acc, course| {
                acc.total_credits += course.credits;
                match course.difficulty() {
                    Difficulty::Light => acc.light += 1,
                    Difficulty::Moderate => acc.moderate += 1,
                    Difficulty::Challenging => acc.challenging += 1,
                }
                acc
            })
    }
}
