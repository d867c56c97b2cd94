//! Integration tests for the planning workflow: state, plan, progress and reports

use course_scope::eligibility::{code_set, find_prerequisite_violations, EligibilityInput};
use course_scope::models::{Catalog, Major, Plan, UserState};
use course_scope::progress::{CourseStatus, MajorRequirements, RequirementProgress};
use course_scope::report::{self, JsonReporter, ReportContext, ReportFormat, ReportGenerator};
use std::fs;
use tempfile::TempDir;

fn catalog() -> Catalog {
    Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json"))
        .expect("fixture catalog loads")
}

fn requirements() -> MajorRequirements {
    MajorRequirements::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/requirements.json"
    ))
    .expect("fixture requirements load")
}

fn cs_major() -> Major {
    Major {
        id: 2,
        name: "Computer Science".to_string(),
        concentration: Some("Software Engineering".to_string()),
    }
}

#[test]
fn state_survives_save_and_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("profile").join("state.json");

    assert!(UserState::load(&path).expect("missing file is fine").is_none());

    let mut state = UserState::default();
    state.select_major(cs_major());
    state.set_completed(["MATH 180".to_string(), "CS 111".to_string(), "CS 111".to_string()]);
    state.set_in_progress(["CS 141".to_string()]);
    state.planned_courses.add("CS 211");
    state.save(&path).expect("save state");

    assert!(state.updated_at.is_some());
    let loaded = UserState::load(&path).expect("load").expect("state exists");
    assert_eq!(loaded, state);
    assert_eq!(loaded.completed_courses, vec!["CS 111", "MATH 180"]);
    assert_eq!(
        loaded.selected_major.unwrap().to_string(),
        "Computer Science (Software Engineering)"
    );
}

#[test]
fn state_file_uses_snake_case_keys() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("state.json");
    fs::write(
        &path,
        r#"{"selected_major": {"id": 2, "name": "Computer Science"},
            "completed_courses": ["CS 111"],
            "planned_courses": ["CS 141"]}"#,
    )
    .expect("write state");

    let state = UserState::load_or_default(&path).expect("load state");
    assert_eq!(state.completed(), code_set(["CS 111"]));
    assert!(state.in_progress().is_empty());
    assert_eq!(state.planned_courses, Plan::from_codes(["CS 141"]));
    assert!(!state.skipped_planning);
}

#[test]
fn selecting_a_major_clears_coursework() {
    let mut state = UserState::default();
    state.set_completed(["CS 111".to_string()]);
    state.planned_courses.add("CS 141");
    state.skip_planning();
    assert!(state.skipped_planning);
    assert!(state.completed_courses.is_empty());

    state.select_major(cs_major());
    assert!(!state.skipped_planning);
    assert!(state.planned_courses.is_empty());
}

#[test]
fn planning_shrinks_the_eligible_list() {
    let catalog = catalog();
    let mut state = UserState::default();
    state.set_completed(["CS 111".to_string(), "MATH 180".to_string()]);

    let completed = state.completed();
    let in_progress = state.in_progress();
    let planned = state.planned();
    let before = EligibilityInput::new(catalog.courses(), &completed, &in_progress, &planned)
        .eligible()
        .len();

    assert!(state.planned_courses.add("CS 141"));
    let planned = state.planned();
    let after =
        EligibilityInput::new(catalog.courses(), &completed, &in_progress, &planned).eligible();

    assert_eq!(after.len(), before - 1);
    // Planning CS 141 does not unlock courses that need it
    assert!(after.iter().all(|c| c.code != "CS 211" && c.code != "CS 251"));

    let summary = state.planned_courses.summary(&catalog);
    assert_eq!(summary.total_credits, 3);
    assert_eq!(
        summary.to_string(),
        "Total Credits: 3 | Balance: 0 challenging / 0 moderate / 1 light"
    );
}

#[test]
fn progress_over_fixture_requirements() {
    let reqs = requirements();
    let completed = code_set(["CS 111", "MATH 180"]);
    let in_progress = code_set(["CS 141"]);
    let planned = code_set(["CS 251"]);

    let statuses: Vec<CourseStatus> = reqs
        .required_codes()
        .into_iter()
        .map(|code| CourseStatus::of(code, &completed, &in_progress, &planned))
        .collect();
    assert_eq!(
        statuses,
        vec![
            CourseStatus::Completed,
            CourseStatus::InProgress,
            CourseStatus::Planned,
            CourseStatus::Completed
        ]
    );

    let progress = RequirementProgress::compute(reqs.required_codes(), &completed, &planned);
    assert_eq!(progress.percent, 50);
    assert_eq!(progress.in_plan, 1);
    assert_eq!(progress.remaining, 1);

    let sections = reqs.electives_by_section();
    assert!(sections.contains_key("Computer Science Concentration Requirements"));
    assert!(sections.contains_key("Free Electives"));
}

#[test]
fn reports_render_in_every_format() {
    let catalog = catalog();
    let completed = code_set(["CS 111"]);
    let none = code_set(Vec::<String>::new());
    let verdicts = EligibilityInput::new(catalog.courses(), &completed, &none, &none).evaluate();
    let violations =
        find_prerequisite_violations(&code_set(["CS 251"]), catalog.courses(), &completed);
    let major = cs_major();
    let plan = Plan::from_codes(["CS 141"]);

    let ctx = ReportContext::new(&verdicts)
        .with_major(Some(&major))
        .with_violations(&violations)
        .with_plan_summary(plan.summary(&catalog))
        .with_explain(true);

    let text = report::render(ReportFormat::Text, &ctx).expect("text report");
    assert!(text.contains("Eligible Courses for Computer Science (Software Engineering)"));
    assert!(text.contains("CS 141"));
    assert!(text.contains("CS 251: missing CS 141, (MATH 180 or MATH 181)"));

    let markdown = report::render(ReportFormat::Markdown, &ctx).expect("markdown report");
    assert!(markdown.contains("| CS 141 | Program Design II |"));
    assert!(markdown.contains("## Blocked Courses"));
    assert!(markdown.contains("## Plan Summary"));
    assert!(!markdown.contains("{{"));

    let json = report::render(ReportFormat::Json, &ctx).expect("json report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["counts"]["completed"], 1);
    assert_eq!(value["eligible"][0]["code"], "CS 141");
    assert_eq!(value["violations"][0]["course"], "CS 251");
    assert_eq!(value["plan"]["total_credits"], 3);
}

#[test]
fn report_generator_writes_file() {
    let catalog = catalog();
    let none = code_set(Vec::<String>::new());
    let verdicts = EligibilityInput::new(catalog.courses(), &none, &none, &none)
        .with_skip(true)
        .evaluate();
    let ctx = ReportContext::new(&verdicts).with_skipped(true);

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(format!("eligible.{}", ReportFormat::Json.extension()));
    JsonReporter::new().generate(&ctx, &path).expect("write report");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read report")).expect("json");
    assert_eq!(value["skipped"], true);
    assert_eq!(value["counts"]["eligible"], catalog.len());
    assert!(value.get("blocked").is_none());
}
