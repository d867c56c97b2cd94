//! Eligible-course evaluation

use super::{unmet_groups, CodeSet, Satisfied};
use crate::debug;
use crate::models::{Course, PrerequisiteGroup};
use serde::Serialize;

/// Outcome for one catalog course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict<'a> {
    /// Guided planning was skipped; the course passes without checks
    Unfiltered,
    /// Already completed
    Completed,
    /// Currently being taken
    InProgress,
    /// Already staged in the plan
    Planned,
    /// Every prerequisite group is met
    Eligible,
    /// At least one prerequisite group is unmet
    Blocked {
        /// Unmet groups in declaration order
        missing_groups: Vec<&'a PrerequisiteGroup>,
    },
}

impl Verdict<'_> {
    /// Whether the course can be added to the plan
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Unfiltered | Self::Eligible)
    }
}

/// A catalog course paired with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseVerdict<'a> {
    /// The evaluated course
    pub course: &'a Course,
    /// Why it is or is not eligible
    #[serde(flatten)]
    pub verdict: Verdict<'a>,
}

/// Per-verdict tallies of one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityCounts {
    /// Eligible (or unfiltered) courses
    pub eligible: usize,
    /// Excluded as completed
    pub completed: usize,
    /// Excluded as in progress
    pub in_progress: usize,
    /// Excluded as planned
    pub planned: usize,
    /// Excluded for unmet prerequisites
    pub blocked: usize,
}

impl EligibilityCounts {
    /// Tally a list of verdicts
    #[must_use]
    pub fn tally(verdicts: &[CourseVerdict<'_>]) -> Self {
        verdicts.iter().fold(Self::default(), |mut acc, v| {
            match v.verdict {
                Verdict::Unfiltered | Verdict::Eligible => acc.eligible += 1,
                Verdict::Completed => acc.completed += 1,
                Verdict::InProgress => acc.in_progress += 1,
                Verdict::Planned => acc.planned += 1,
                Verdict::Blocked { .. } => acc.blocked += 1,
            }
            acc
        })
    }
}

/// Inputs of one eligibility evaluation
///
/// Built fresh for every evaluation; holds borrowed snapshots only.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityInput<'a> {
    /// Catalog in provider order
    pub catalog: &'a [Course],
    /// Finished coursework
    pub completed: &'a CodeSet,
    /// Coursework underway
    pub in_progress: &'a CodeSet,
    /// Courses already staged in the plan
    pub planned: &'a CodeSet,
    /// Bypass all prerequisite and exclusion filtering
    pub skip: bool,
}

impl<'a> EligibilityInput<'a> {
    /// Create an input with guided filtering enabled
    #[must_use]
    pub const fn new(
        catalog: &'a [Course],
        completed: &'a CodeSet,
        in_progress: &'a CodeSet,
        planned: &'a CodeSet,
    ) -> Self {
        Self {
            catalog,
            completed,
            in_progress,
            planned,
            skip: false,
        }
    }

    /// Set the skip flag
    #[must_use]
    pub const fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Classify a single course
    ///
    /// Completion and in-progress state take precedence over planning, which
    /// takes precedence over prerequisites.
    #[must_use]
    pub fn verdict_for(&self, course: &'a Course) -> Verdict<'a> {
        if self.skip {
            return Verdict::Unfiltered;
        }
        if self.completed.contains(&course.code) {
            return Verdict::Completed;
        }
        if self.in_progress.contains(&course.code) {
            return Verdict::InProgress;
        }
        if self.planned.contains(&course.code) {
            return Verdict::Planned;
        }

        let missing_groups =
            unmet_groups(course, Satisfied::by_either(self.completed, self.in_progress));
        if missing_groups.is_empty() {
            Verdict::Eligible
        } else {
            Verdict::Blocked { missing_groups }
        }
    }

    /// Classify every catalog course, in catalog order
    #[must_use]
    pub fn evaluate(&self) -> Vec<CourseVerdict<'a>> {
        let verdicts: Vec<CourseVerdict<'a>> = self
            .catalog
            .iter()
            .map(|course| CourseVerdict {
                course,
                verdict: self.verdict_for(course),
            })
            .collect();

        let counts = EligibilityCounts::tally(&verdicts);
        debug!(
            "Eligibility over {} courses (skip={}): {} eligible, {} blocked",
            self.catalog.len(),
            self.skip,
            counts.eligible,
            counts.blocked
        );
        debug!(
            "Excluded {} completed, {} in progress, {} planned",
            counts.completed,
            counts.in_progress,
            counts.planned
        );

        verdicts
    }

    /// Eligible courses as a stable subsequence of the catalog
    #[must_use]
    pub fn eligible(&self) -> Vec<&'a Course> {
        self.catalog
            .iter()
            .filter(|course| self.verdict_for(*course).is_eligible())
            .collect()
    }
}

/// Courses the user may newly add to their plan
///
/// With `skip` set the whole catalog is returned. Otherwise a course is
/// excluded when completed, in progress or planned, and included when every
/// prerequisite group has a completed or in-progress code. Output preserves
/// catalog order.
///
/// # Arguments
/// * `catalog` - Courses in provider order
/// * `completed` - Finished coursework
/// * `in_progress` - Coursework underway
/// * `planned` - Codes already in the plan
/// * `skip` - Bypass all filtering
#[must_use]
pub fn compute_eligible(
    catalog: &[Course],
    completed: &CodeSet,
    in_progress: &CodeSet,
    planned: &CodeSet,
    skip: bool,
) -> Vec<Course> {
    EligibilityInput::new(catalog, completed, in_progress, planned)
        .with_skip(skip)
        .eligible()
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::code_set;

    fn catalog() -> Vec<Course> {
        vec![
            Course::new("CS 111", "Program Design I"),
            Course::new("CS 141", "Program Design II").with_prerequisite_group(["CS 111"]),
            Course::new("CS 251", "Data Structures")
                .with_prerequisite_group(["CS 141"])
                .with_prerequisite_group(["MATH 180", "MATH 181"]),
            Course::new("MATH 180", "Calculus I"),
        ]
    }

    fn codes(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn test_fresh_student_sees_prerequisite_free_courses() {
        let none = CodeSet::new();
        let eligible = compute_eligible(&catalog(), &none, &none, &none, false);
        assert_eq!(codes(&eligible), vec!["CS 111", "MATH 180"]);
    }

    #[test]
    fn test_in_progress_satisfies_prerequisites() {
        let completed = code_set(["CS 111"]);
        let in_progress = code_set(["CS 141", "MATH 180"]);
        let none = CodeSet::new();

        let eligible = compute_eligible(&catalog(), &completed, &in_progress, &none, false);
        assert_eq!(codes(&eligible), vec!["CS 251"]);
    }

    #[test]
    fn test_planned_courses_excluded() {
        let completed = code_set(["CS 111"]);
        let planned = code_set(["CS 141"]);
        let none = CodeSet::new();

        let eligible = compute_eligible(&catalog(), &completed, &none, &planned, false);
        assert_eq!(codes(&eligible), vec!["MATH 180"]);
    }

    #[test]
    fn test_skip_returns_everything() {
        let everything = code_set(["CS 111", "CS 141", "CS 251", "MATH 180"]);
        let eligible = compute_eligible(&catalog(), &everything, &everything, &everything, true);
        assert_eq!(eligible, catalog());
    }

    #[test]
    fn test_verdict_precedence() {
        let courses = catalog();
        let completed = code_set(["CS 251"]);
        let in_progress = code_set(["CS 251", "CS 141"]);
        let planned = code_set(["CS 251", "CS 141", "MATH 180"]);
        let input = EligibilityInput::new(&courses, &completed, &in_progress, &planned);

        assert_eq!(input.verdict_for(&courses[2]), Verdict::Completed);
        assert_eq!(input.verdict_for(&courses[1]), Verdict::InProgress);
        assert_eq!(input.verdict_for(&courses[3]), Verdict::Planned);
        assert_eq!(input.verdict_for(&courses[0]), Verdict::Eligible);
    }

    #[test]
    fn test_blocked_records_missing_groups() {
        let courses = catalog();
        let completed = code_set(["CS 141"]);
        let none = CodeSet::new();
        let input = EligibilityInput::new(&courses, &completed, &none, &none);

        let verdicts = input.evaluate();
        let cs251 = &verdicts[2];
        assert_eq!(cs251.course.code, "CS 251");
        match &cs251.verdict {
            Verdict::Blocked { missing_groups } => {
                assert_eq!(missing_groups.len(), 1);
                assert_eq!(
                    missing_groups[0],
                    &vec!["MATH 180".to_string(), "MATH 181".to_string()]
                );
            }
            other => panic!("expected CS 251 to be blocked, got {other:?}"),
        }

        let counts = EligibilityCounts::tally(&verdicts);
        assert_eq!(counts.eligible, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.blocked, 1);
    }

    #[test]
    fn test_empty_group_blocks_course() {
        let mut odd = Course::new("CS 499", "Senior Seminar");
        odd.prerequisite_groups.push(Vec::new());
        let courses = vec![odd];
        let all = code_set(["CS 111", "CS 141"]);
        let none = CodeSet::new();

        assert!(compute_eligible(&courses, &all, &none, &none, false).is_empty());
    }

    #[test]
    fn test_verdict_serializes_with_status_tag() {
        let courses = catalog();
        let none = CodeSet::new();
        let verdicts = EligibilityInput::new(&courses, &none, &none, &none).evaluate();

        let json = serde_json::to_value(&verdicts[1]).expect("verdict serializes");
        assert_eq!(json["status"], "blocked");
        assert_eq!(json["course"]["code"], "CS 141");
        assert_eq!(json["missing_groups"][0][0], "CS 111");
    }
}
