//! Plan command handler

use super::{clean_codes, load_catalog, load_state, save_state};
use crate::args::PlanSubcommand;
use course_scope::config::Config;
use course_scope::eligibility::{EligibilityInput, Verdict};
use course_scope::models::{Catalog, Plan, UserState};
use course_scope::report::describe_groups;

/// Dispatch plan subcommands
pub fn run(subcommand: Option<PlanSubcommand>, config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let mut state = load_state(config)?;

    match subcommand.unwrap_or(PlanSubcommand::Show) {
        PlanSubcommand::Show => {
            show(&state, &catalog);
            return Ok(());
        }
        PlanSubcommand::Add { codes, force } => add(&mut state, &catalog, codes, force),
        PlanSubcommand::Remove { codes } => {
            for code in clean_codes(codes) {
                if state.planned_courses.remove(&code) {
                    println!("✓ Removed {code}");
                } else {
                    println!("✗ {code} is not in the plan");
                }
            }
        }
        PlanSubcommand::Clear => {
            state.planned_courses = Plan::new();
            println!("✓ Plan cleared");
        }
    }

    save_state(config, &mut state)?;
    show(&state, &catalog);
    Ok(())
}

fn add(state: &mut UserState, catalog: &Catalog, codes: Vec<String>, force: bool) {
    let completed = state.completed();
    let in_progress = state.in_progress();
    let planned = state.planned();
    let input = EligibilityInput::new(catalog.courses(), &completed, &in_progress, &planned)
        .with_skip(state.skipped_planning);

    for code in clean_codes(codes) {
        let Some(course) = catalog.get(&code) else {
            eprintln!("✗ Unknown course: {code}");
            continue;
        };

        let verdict = input.verdict_for(course);
        if !verdict.is_eligible() && !force {
            let reason = match &verdict {
                Verdict::Completed => "already completed".to_string(),
                Verdict::InProgress => "already in progress".to_string(),
                Verdict::Planned => "already planned".to_string(),
                Verdict::Blocked { missing_groups } => {
                    format!("missing {}", describe_groups(missing_groups))
                }
                Verdict::Unfiltered | Verdict::Eligible => String::new(),
            };
            eprintln!("✗ Cannot add {code}: {reason}");
            continue;
        }

        if state.planned_courses.add(course.code.clone()) {
            println!("✓ Added {code}");
        } else {
            println!("{code} is already planned");
        }
    }
}

fn show(state: &UserState, catalog: &Catalog) {
    println!("\n=== Plan ===\n");
    if state.planned_courses.is_empty() {
        println!("No courses planned.");
        return;
    }

    for code in &state.planned_courses.courses {
        match catalog.get(code) {
            Some(course) => println!(
                "  {}  {}  ({} cr, {})",
                course.code,
                course.title,
                course.credits,
                course.difficulty()
            ),
            None => println!("  {code}  (not in catalog)"),
        }
    }
    println!("\n{}", state.planned_courses.summary(catalog));
}
