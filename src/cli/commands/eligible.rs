//! Eligible command handler

use super::{clean_codes, load_catalog, load_state};
use course_scope::config::Config;
use course_scope::eligibility::{code_set, CodeSet, EligibilityInput};
use course_scope::filters::CatalogFilter;
use course_scope::info;
use course_scope::models::{Difficulty, Plan};
use course_scope::report::{self, ReportContext, ReportFormat};
use std::fs;
use std::path::PathBuf;

/// Arguments of the eligible command
#[derive(Debug, Default)]
pub struct EligibleArgs {
    /// Search text
    pub search: Option<String>,
    /// Level facet
    pub levels: Vec<u32>,
    /// Difficulty facet
    pub difficulties: Vec<Difficulty>,
    /// Credit facet
    pub credits: Vec<u32>,
    /// Completed codes replacing the saved ones
    pub completed: Option<Vec<String>>,
    /// In-progress codes replacing the saved ones
    pub in_progress: Option<Vec<String>>,
    /// Planned codes replacing the saved ones
    pub planned: Option<Vec<String>>,
    /// Bypass filtering
    pub skip: bool,
    /// Output format
    pub format: ReportFormat,
    /// List blocked courses
    pub explain: bool,
    /// Output file
    pub output: Option<PathBuf>,
}

fn codes_or(given: Option<&Vec<String>>, saved: CodeSet) -> CodeSet {
    given.map_or(saved, |codes| code_set(clean_codes(codes.iter().cloned())))
}

/// Run the eligible command
pub fn run(config: &Config, args: &EligibleArgs) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let state = load_state(config)?;

    let completed = codes_or(args.completed.as_ref(), state.completed());
    let in_progress = codes_or(args.in_progress.as_ref(), state.in_progress());
    let plan = args
        .planned
        .as_ref()
        .map_or_else(
            || state.planned_courses.clone(),
            |codes| Plan::from_codes(clean_codes(codes.iter().cloned())),
        );
    let planned = plan.codes();
    let skip = args.skip || state.skipped_planning;

    let mut filter = CatalogFilter::new().with_search(args.search.clone().unwrap_or_default());
    filter.levels.extend(args.levels.iter().copied());
    filter.difficulties.extend(args.difficulties.iter().copied());
    filter.credits.extend(args.credits.iter().copied());

    let visible = if filter.is_active() {
        let visible = filter.apply(catalog.courses());
        info!("Filters kept {} of {} courses", visible.len(), catalog.len());
        visible
    } else {
        catalog.courses().to_vec()
    };

    let verdicts = EligibilityInput::new(&visible, &completed, &in_progress, &planned)
        .with_skip(skip)
        .evaluate();

    let mut ctx = ReportContext::new(&verdicts)
        .with_major(state.selected_major.as_ref())
        .with_explain(args.explain)
        .with_skipped(skip);
    if !plan.is_empty() {
        ctx = ctx.with_plan_summary(plan.summary(&catalog));
    }

    let content = report::render(args.format, &ctx)
        .map_err(|e| format!("Failed to render report: {e}"))?;

    match &args.output {
        Some(path) => {
            fs::write(path, content)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("✓ Report written: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
