//! Prerequisite eligibility
//!
//! Prerequisites are an AND of OR-groups: a course is unlocked when every one of
//! its groups has at least one satisfied code. Both the eligible-course filter
//! and the onboarding violation check are built on [`group_met`].
//!
//! Everything here is a pure function of its arguments. Callers re-run it after
//! any change to the catalog or to the completed, in-progress or planned sets.

mod evaluator;
mod violations;

pub use evaluator::{
    compute_eligible, CourseVerdict, EligibilityCounts, EligibilityInput, Verdict,
};
pub use violations::{find_prerequisite_violations, onboarding_candidates, Violation};

use crate::models::{Course, PrerequisiteGroup};
use std::collections::HashSet;

/// A set of course codes (completed, in-progress or planned)
pub type CodeSet = HashSet<String>;

/// Membership view over the union of two code sets
///
/// Tests membership in either set without materialising the union.
#[derive(Debug, Clone, Copy)]
pub struct Satisfied<'a> {
    primary: &'a CodeSet,
    secondary: Option<&'a CodeSet>,
}

impl<'a> Satisfied<'a> {
    /// Codes in a single set count as satisfied
    #[must_use]
    pub const fn by(set: &'a CodeSet) -> Self {
        Self {
            primary: set,
            secondary: None,
        }
    }

    /// Codes in either set count as satisfied
    #[must_use]
    pub const fn by_either(primary: &'a CodeSet, secondary: &'a CodeSet) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Whether `code` is satisfied
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.primary.contains(code) || self.secondary.is_some_and(|s| s.contains(code))
    }
}

/// Whether a single prerequisite group is met
///
/// An empty group is never met.
#[must_use]
pub fn group_met(group: &[String], satisfied: Satisfied<'_>) -> bool {
    group.iter().any(|code| satisfied.contains(code))
}

/// Groups of `course` that no satisfied code meets, in declaration order
#[must_use]
pub fn unmet_groups<'c>(
    course: &'c Course,
    satisfied: Satisfied<'_>,
) -> Vec<&'c PrerequisiteGroup> {
    course
        .prerequisite_groups
        .iter()
        .filter(|group| !group_met(group, satisfied))
        .collect()
}

/// Whether every prerequisite group of `course` is met
#[must_use]
pub fn prerequisites_met(course: &Course, satisfied: Satisfied<'_>) -> bool {
    course
        .prerequisite_groups
        .iter()
        .all(|group| group_met(group, satisfied))
}

/// Build a [`CodeSet`] from any list of codes
pub fn code_set<I, S>(codes: I) -> CodeSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    codes.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(codes: &[&str]) -> Vec<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_group_met_any_code() {
        let done = code_set(["MATH 180"]);
        assert!(group_met(&group(&["MATH 170", "MATH 180"]), Satisfied::by(&done)));
        assert!(!group_met(&group(&["MATH 170"]), Satisfied::by(&done)));
    }

    #[test]
    fn test_empty_group_never_met() {
        let done = code_set(["CS 111"]);
        assert!(!group_met(&[], Satisfied::by(&done)));
    }

    #[test]
    fn test_satisfied_by_either() {
        let completed = code_set(["CS 111"]);
        let in_progress = code_set(["CS 141"]);
        let satisfied = Satisfied::by_either(&completed, &in_progress);

        assert!(satisfied.contains("CS 111"));
        assert!(satisfied.contains("CS 141"));
        assert!(!satisfied.contains("CS 251"));
    }

    #[test]
    fn test_unmet_groups_in_order() {
        let course = Course::new("CS 251", "Data Structures")
            .with_prerequisite_group(["CS 141"])
            .with_prerequisite_group(["MATH 180", "MATH 181"])
            .with_prerequisite_group(["CS 151"]);
        let done = code_set(["MATH 181"]);

        let unmet = unmet_groups(&course, Satisfied::by(&done));
        assert_eq!(unmet, vec![&group(&["CS 141"]), &group(&["CS 151"])]);
        assert!(!prerequisites_met(&course, Satisfied::by(&done)));
    }

    #[test]
    fn test_no_groups_always_met() {
        let course = Course::new("CS 111", "Program Design I");
        let none = CodeSet::new();
        assert!(prerequisites_met(&course, Satisfied::by(&none)));
        assert!(unmet_groups(&course, Satisfied::by(&none)).is_empty());
    }
}
