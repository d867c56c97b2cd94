//! Onboarding validation: prerequisite violations and the course picker

use super::{prerequisites_met, unmet_groups, CodeSet, Satisfied};
use crate::models::{Course, PrerequisiteGroup};
use serde::Serialize;
use std::fmt;

/// A selected course whose prerequisites are not all selected or satisfied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Code of the selected course
    pub course: String,
    /// Prerequisite groups with no satisfied code
    pub missing_groups: Vec<PrerequisiteGroup>,
    /// Full prerequisite text of the course
    pub prerequisites_formatted: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self
            .missing_groups
            .iter()
            .map(|g| crate::models::course::format_group(g))
            .collect();
        write!(f, "{}: missing {}", self.course, missing.join(", "))
    }
}

/// Prerequisite violations within a selection being edited
///
/// Each selected course's groups are checked against
/// `selection ∪ satisfied_elsewhere`. Which codes count as satisfied elsewhere
/// (e.g. completed courses while editing the in-progress set) is the caller's
/// decision. Selected codes missing from the catalog are ignored.
///
/// # Arguments
/// * `selection` - Codes currently being edited; never modified
/// * `catalog` - Courses in provider order
/// * `satisfied_elsewhere` - Codes satisfied outside the selection
///
/// # Returns
/// One violation per offending course, in catalog order; empty when valid
#[must_use]
pub fn find_prerequisite_violations(
    selection: &CodeSet,
    catalog: &[Course],
    satisfied_elsewhere: &CodeSet,
) -> Vec<Violation> {
    let satisfied = Satisfied::by_either(selection, satisfied_elsewhere);

    catalog
        .iter()
        .filter(|course| selection.contains(&course.code))
        .filter_map(|course| {
            let missing = unmet_groups(course, satisfied);
            if missing.is_empty() {
                None
            } else {
                Some(Violation {
                    course: course.code.clone(),
                    missing_groups: missing.into_iter().cloned().collect(),
                    prerequisites_formatted: course.format_prerequisites(),
                })
            }
        })
        .collect()
}

/// Courses offered in an onboarding picker
///
/// Codes in `exclude` (e.g. already completed when picking in-progress
/// courses) are never offered. With `enforce_prerequisites` set, only courses
/// whose every group is met by `satisfied` are offered.
#[must_use]
pub fn onboarding_candidates<'a>(
    catalog: &'a [Course],
    exclude: &CodeSet,
    enforce_prerequisites: bool,
    satisfied: &CodeSet,
) -> Vec<&'a Course> {
    catalog
        .iter()
        .filter(|course| !exclude.contains(&course.code))
        .filter(|course| {
            !enforce_prerequisites || prerequisites_met(course, Satisfied::by(satisfied))
        })
        .collect()
}
