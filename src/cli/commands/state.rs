//! State command handler

use super::{clean_codes, confirm, load_catalog, load_state, save_state, state_path};
use crate::args::StateSubcommand;
use course_scope::config::Config;
use course_scope::eligibility::{
    code_set, find_prerequisite_violations, onboarding_candidates, CodeSet,
};
use course_scope::models::{Major, UserState};
use course_scope::warn;
use std::fs;

/// Dispatch state subcommands
pub fn run(subcommand: Option<StateSubcommand>, config: &Config) -> Result<(), String> {
    match subcommand.unwrap_or(StateSubcommand::Show) {
        StateSubcommand::Show => {
            show(&load_state(config)?);
            Ok(())
        }
        StateSubcommand::Major {
            id,
            name,
            concentration,
        } => {
            let mut state = load_state(config)?;
            let major = Major {
                id,
                name,
                concentration,
            };
            println!("✓ Selected {major}");
            state.select_major(major);
            save_state(config, &mut state)
        }
        StateSubcommand::Set {
            completed,
            in_progress,
            force,
        } => set_coursework(config, completed, in_progress, force),
        StateSubcommand::Candidates { in_progress } => candidates(config, in_progress),
        StateSubcommand::Skip => {
            let mut state = load_state(config)?;
            state.skip_planning();
            save_state(config, &mut state)?;
            println!("✓ Guided planning skipped; every catalog course is now listed as eligible");
            Ok(())
        }
        StateSubcommand::Reset => reset(config),
    }
}

fn set_coursework(
    config: &Config,
    completed: Option<Vec<String>>,
    in_progress: Option<Vec<String>>,
    force: bool,
) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let mut state = load_state(config)?;

    let completed = completed.map_or_else(|| state.completed_courses.clone(), clean_codes);
    let completed_set = code_set(completed.iter().cloned());

    let mut in_progress =
        in_progress.map_or_else(|| state.in_progress_courses.clone(), clean_codes);
    in_progress.retain(|code| {
        let overlap = completed_set.contains(code);
        if overlap {
            warn!("{code} is both completed and in progress; keeping it as completed");
        }
        !overlap
    });
    let in_progress_set = code_set(in_progress.iter().cloned());

    // Completed courses must cover each other; in-progress ones may lean on completed
    let mut violations =
        find_prerequisite_violations(&completed_set, catalog.courses(), &CodeSet::new());
    violations.extend(find_prerequisite_violations(
        &in_progress_set,
        catalog.courses(),
        &completed_set,
    ));

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("✗ {violation}");
        }
        if !force {
            return Err("Selection is missing prerequisites; add them or pass --force".to_string());
        }
    }

    state.set_completed(completed);
    state.set_in_progress(in_progress);
    state.skipped_planning = false;
    save_state(config, &mut state)?;

    println!(
        "✓ Saved {} completed and {} in-progress courses",
        state.completed_courses.len(),
        state.in_progress_courses.len()
    );
    Ok(())
}

fn candidates(config: &Config, in_progress: bool) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let state = load_state(config)?;

    let mut selected = state.completed();
    if in_progress {
        selected.extend(state.in_progress());
    }

    let offered = onboarding_candidates(
        catalog.courses(),
        &selected,
        config.planning.enforce_prerequisites,
        &selected,
    );

    let step = if in_progress { "in-progress" } else { "completed" };
    println!("\n=== Candidate {step} courses ({}) ===\n", offered.len());
    for course in offered {
        println!("  {}  {}", course.code, course.title);
    }
    Ok(())
}

fn reset(config: &Config) -> Result<(), String> {
    let path = state_path(config)?;
    if !path.exists() {
        println!("✓ No saved state");
        return Ok(());
    }

    if confirm("Are you sure you want to delete the saved planning state?") {
        fs::remove_file(&path).map_err(|e| format!("Failed to remove {}: {e}", path.display()))?;
        println!("✓ State reset");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn show(state: &UserState) {
    println!("\n=== Planning State ===\n");
    match &state.selected_major {
        Some(major) => println!("Major:       {major}"),
        None => println!("Major:       (none selected)"),
    }
    if state.skipped_planning {
        println!("Guided planning skipped");
    }
    println!("Completed:   {}", list(&state.completed_courses));
    println!("In progress: {}", list(&state.in_progress_courses));
    println!("Planned:     {}", list(&state.planned_courses.courses));
    if let Some(updated) = state.updated_at {
        println!("Updated:     {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
}

fn list(codes: &[String]) -> String {
    if codes.is_empty() {
        "(none)".to_string()
    } else {
        codes.join(", ")
    }
}
