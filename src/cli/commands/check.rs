//! Check command handler

use super::{clean_codes, load_catalog, load_state};
use course_scope::config::Config;
use course_scope::eligibility::{code_set, find_prerequisite_violations};
use course_scope::report::ReportFormat;
use course_scope::warn;

/// Run the check command
///
/// Without explicit codes the saved in-progress courses are checked, with the
/// saved completed courses counting as satisfied.
pub fn run(
    config: &Config,
    codes: &[String],
    satisfied: &[String],
    format: ReportFormat,
) -> Result<(), String> {
    let catalog = load_catalog(config)?;

    let mut elsewhere = code_set(clean_codes(satisfied.iter().cloned()));
    let selection = if codes.is_empty() {
        let state = load_state(config)?;
        elsewhere.extend(state.completed());
        state.in_progress()
    } else {
        code_set(clean_codes(codes.iter().cloned()))
    };

    let mut unknown: Vec<&String> = selection.iter().filter(|c| !catalog.contains(c)).collect();
    unknown.sort();
    for code in unknown {
        warn!("{code} is not in the catalog and was ignored");
    }

    let violations = find_prerequisite_violations(&selection, catalog.courses(), &elsewhere);

    if format == ReportFormat::Json {
        let json = serde_json::to_string_pretty(&violations).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        for violation in &violations {
            println!("✗ {violation}");
            println!("    requires: {}", violation.prerequisites_formatted);
        }
    }

    if violations.is_empty() {
        if format != ReportFormat::Json {
            println!("✓ All prerequisites satisfied ({} courses)", selection.len());
        }
        Ok(())
    } else {
        Err(format!("{} course(s) are missing prerequisites", violations.len()))
    }
}
