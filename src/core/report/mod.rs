//! Eligibility report rendering
//!
//! Renders the outcome of an eligibility evaluation (and optionally onboarding
//! violations and the plan summary) as plain text, Markdown or JSON.

pub mod formats;

use crate::eligibility::{CourseVerdict, EligibilityCounts, Verdict, Violation};
use crate::models::{Course, Major, PlanSummary, PrerequisiteGroup};
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{JsonReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report generation
///
/// Aggregates everything a renderer needs so each format reads from one place.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Major the user is planning for, if chosen
    pub major: Option<&'a Major>,
    /// Verdict for every course that survived the catalog filters
    pub verdicts: &'a [CourseVerdict<'a>],
    /// Tallies over `verdicts`
    pub counts: EligibilityCounts,
    /// Onboarding violations to list
    pub violations: &'a [Violation],
    /// Plan totals, when the plan should be summarised
    pub plan_summary: Option<PlanSummary>,
    /// List blocked courses with their unmet groups
    pub explain: bool,
    /// Guided planning was skipped
    pub skipped: bool,
}

impl<'a> ReportContext<'a> {
    /// Create a context over a set of verdicts
    #[must_use]
    pub fn new(verdicts: &'a [CourseVerdict<'a>]) -> Self {
        Self {
            major: None,
            verdicts,
            counts: EligibilityCounts::tally(verdicts),
            violations: &[],
            plan_summary: None,
            explain: false,
            skipped: false,
        }
    }

    /// Attach the selected major
    #[must_use]
    pub const fn with_major(mut self, major: Option<&'a Major>) -> Self {
        self.major = major;
        self
    }

    /// Attach onboarding violations
    #[must_use]
    pub const fn with_violations(mut self, violations: &'a [Violation]) -> Self {
        self.violations = violations;
        self
    }

    /// Attach a plan summary
    #[must_use]
    pub const fn with_plan_summary(mut self, summary: PlanSummary) -> Self {
        self.plan_summary = Some(summary);
        self
    }

    /// Include blocked courses and their unmet groups
    #[must_use]
    pub const fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Mark the evaluation as unfiltered
    #[must_use]
    pub const fn with_skipped(mut self, skipped: bool) -> Self {
        self.skipped = skipped;
        self
    }

    /// Report heading
    #[must_use]
    pub fn title(&self) -> String {
        self.major.map_or_else(
            || "Eligible Courses".to_string(),
            |major| format!("Eligible Courses for {major}"),
        )
    }

    /// Courses the user can add, in catalog order
    pub fn eligible(&self) -> impl Iterator<Item = &'a Course> + '_ {
        self.verdicts
            .iter()
            .filter(|v| v.verdict.is_eligible())
            .map(|v| v.course)
    }

    /// Blocked courses with their unmet groups, in catalog order
    pub fn blocked(&self) -> impl Iterator<Item = (&'a Course, &[&'a PrerequisiteGroup])> + '_ {
        self.verdicts.iter().filter_map(|v| match &v.verdict {
            Verdict::Blocked { missing_groups } => Some((v.course, missing_groups.as_slice())),
            _ => None,
        })
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Render a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Render `ctx` in the requested format
///
/// # Errors
/// Returns an error if the renderer fails
pub fn render(format: ReportFormat, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
    match format {
        ReportFormat::Text => TextReporter::new().render(ctx),
        ReportFormat::Markdown => MarkdownReporter::new().render(ctx),
        ReportFormat::Json => JsonReporter::new().render(ctx),
    }
}

/// Join unmet groups for display: `CS 141, (MATH 180 or MATH 181)`
#[must_use]
pub fn describe_groups(groups: &[&PrerequisiteGroup]) -> String {
    groups
        .iter()
        .map(|g| crate::models::course::format_group(g))
        .collect::<Vec<_>>()
        .join(", ")
}
