//! Integration tests for eligibility evaluation and onboarding validation

use course_scope::eligibility::{
    code_set, compute_eligible, find_prerequisite_violations, onboarding_candidates, CodeSet,
    EligibilityInput, Verdict,
};
use course_scope::models::{Catalog, Course};

fn codes(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.code.as_str()).collect()
}

fn x_catalog() -> Vec<Course> {
    vec![
        Course::new("A", "Course A"),
        Course::new("B", "Course B"),
        Course::new("C", "Course C"),
        Course::new("X", "Course X")
            .with_prerequisite_group(["A", "B"])
            .with_prerequisite_group(["C"]),
        Course::new("Y", "Course Y").with_prerequisite_group(["A", "B"]),
    ]
}

fn fixture_catalog() -> Catalog {
    Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json"))
        .expect("fixture catalog loads")
}

#[test]
fn prerequisite_free_courses_are_eligible() {
    let catalog = fixture_catalog();
    let none = CodeSet::new();

    let eligible = compute_eligible(catalog.courses(), &none, &none, &none, false);

    let expected: Vec<&str> = catalog
        .iter()
        .filter(|c| !c.has_prerequisites())
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(codes(&eligible), expected);
    assert_eq!(codes(&eligible), vec!["CS 111", "MATH 180", "ENGL 160"]);
}

#[test]
fn exclusion_outranks_prerequisites() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111", "CS 141", "MATH 180"]);
    let in_progress = code_set(["CS 251"]);
    let planned = code_set(["ENGL 160", "CS 211"]);

    let eligible = compute_eligible(catalog.courses(), &completed, &in_progress, &planned, false);

    for course in &eligible {
        assert!(!completed.contains(&course.code));
        assert!(!in_progress.contains(&course.code));
        assert!(!planned.contains(&course.code));
    }
    // CS 251 in progress unlocks CS 301; MATH 180 unlocks MATH 181
    assert_eq!(codes(&eligible), vec!["MATH 181", "CS 301"]);
}

#[test]
fn every_group_must_be_met() {
    let catalog = x_catalog();
    let none = CodeSet::new();

    let eligible = compute_eligible(&catalog, &code_set(["A"]), &none, &none, false);
    assert!(!codes(&eligible).contains(&"X"));

    let eligible = compute_eligible(&catalog, &code_set(["A", "C"]), &none, &none, false);
    assert!(codes(&eligible).contains(&"X"));
}

#[test]
fn any_code_meets_a_group() {
    let catalog = x_catalog();
    let none = CodeSet::new();

    let eligible = compute_eligible(&catalog, &code_set(["B"]), &none, &none, false);
    assert!(codes(&eligible).contains(&"Y"));

    // In-progress coursework counts the same as completed
    let eligible = compute_eligible(&catalog, &none, &code_set(["A"]), &none, false);
    assert!(codes(&eligible).contains(&"Y"));
}

#[test]
fn skip_returns_full_catalog() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111"]);
    let in_progress = code_set(["CS 141"]);
    let planned = code_set(["CS 251", "NOT A COURSE"]);

    let eligible = compute_eligible(catalog.courses(), &completed, &in_progress, &planned, true);

    assert_eq!(eligible, catalog.courses());
}

#[test]
fn evaluation_is_idempotent() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111", "MATH 180"]);
    let in_progress = code_set(["CS 141"]);
    let planned = CodeSet::new();

    let first = compute_eligible(catalog.courses(), &completed, &in_progress, &planned, false);
    let second = compute_eligible(catalog.courses(), &completed, &in_progress, &planned, false);

    assert_eq!(first, second);
    assert_eq!(completed, code_set(["CS 111", "MATH 180"]));
}

#[test]
fn violation_lists_every_unmet_group() {
    let catalog = x_catalog();
    let violations = find_prerequisite_violations(&code_set(["X"]), &catalog, &CodeSet::new());

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].course, "X");
    assert_eq!(
        violations[0].missing_groups,
        vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]]
    );
}

#[test]
fn empty_inputs() {
    let none = CodeSet::new();
    assert!(compute_eligible(&[], &none, &none, &none, false).is_empty());
    assert!(compute_eligible(&[], &none, &none, &none, true).is_empty());
    assert!(find_prerequisite_violations(&none, &x_catalog(), &none).is_empty());
}

#[test]
fn unknown_prerequisite_keeps_course_blocked() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111", "CS 141", "MATH 180", "CS 251"]);
    let none = CodeSet::new();

    let input = EligibilityInput::new(catalog.courses(), &completed, &none, &none);
    let cs401 = catalog.get("CS 401").expect("CS 401 in fixture");

    match input.verdict_for(cs401) {
        Verdict::Blocked { missing_groups } => {
            assert_eq!(missing_groups, vec![&vec!["STAT 381".to_string()]]);
        }
        other => panic!("expected CS 401 to be blocked, got {other:?}"),
    }
    assert_eq!(
        catalog.missing_references(),
        vec![("CS 401".to_string(), "STAT 381".to_string())]
    );
}

#[test]
fn padded_prerequisite_code_still_matches() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111", "CS 141", "MATH 180", "CS 251", "CS 301"]);
    let none = CodeSet::new();

    let eligible = compute_eligible(catalog.courses(), &completed, &none, &none, false);
    assert!(codes(&eligible).contains(&"CS 494"));
}

#[test]
fn onboarding_flow_checks_in_progress_against_completed() {
    let catalog = fixture_catalog();
    let completed = code_set(["CS 111", "MATH 180"]);
    let in_progress = code_set(["CS 141", "CS 251"]);

    // CS 251 leans on CS 141 (same selection) and MATH 180 (completed)
    let violations = find_prerequisite_violations(&in_progress, catalog.courses(), &completed);
    assert!(violations.is_empty());

    // Without the completed set CS 141 loses CS 111 and CS 251 loses MATH 180
    let violations =
        find_prerequisite_violations(&in_progress, catalog.courses(), &CodeSet::new());
    let offenders: Vec<&str> = violations.iter().map(|v| v.course.as_str()).collect();
    assert_eq!(offenders, vec!["CS 141", "CS 251"]);
    assert_eq!(
        violations[1].prerequisites_formatted,
        "CS 141 and (MATH 180 or MATH 181)"
    );

    let offered = onboarding_candidates(catalog.courses(), &completed, true, &completed);
    let offered: Vec<&str> = offered.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(offered, vec!["CS 141", "MATH 181", "ENGL 160"]);
}
