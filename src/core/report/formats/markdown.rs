//! Markdown report generator
//!
//! Renders eligibility reports as Markdown tables, suitable for GitHub,
//! GitLab and VS Code previews.

use crate::core::report::{describe_groups, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/eligibility.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    fn render_template(ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", &ctx.title());
        output = output.replace("{{eligible_count}}", &ctx.counts.eligible.to_string());
        output = output.replace("{{completed_count}}", &ctx.counts.completed.to_string());
        output = output.replace("{{in_progress_count}}", &ctx.counts.in_progress.to_string());
        output = output.replace("{{planned_count}}", &ctx.counts.planned.to_string());
        output = output.replace("{{blocked_count}}", &ctx.counts.blocked.to_string());

        output = output.replace("{{eligible_table}}", &Self::eligible_table(ctx));
        output = output.replace("{{blocked_section}}", &Self::blocked_section(ctx));
        output = output.replace("{{violations_section}}", &Self::violations_section(ctx));
        output = output.replace("{{plan_section}}", &Self::plan_section(ctx));

        output
    }

    /// Escape pipes so course text cannot break table cells
    fn cell(text: &str) -> String {
        text.replace('|', "\\|")
    }

    fn eligible_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        if ctx.counts.eligible == 0 {
            table.push_str("_No eligible courses._\n");
            return table;
        }

        table.push_str("| Course | Title | Credits | Level | Difficulty | Prerequisites |\n");
        table.push_str("|---|---|---|---|---|---|\n");
        for course in ctx.eligible() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} |",
                Self::cell(&course.code),
                Self::cell(&course.title),
                course.credits,
                course.level,
                course.difficulty(),
                Self::cell(&course.format_prerequisites())
            );
        }
        table
    }

    fn blocked_section(ctx: &ReportContext) -> String {
        if !ctx.explain || ctx.counts.blocked == 0 {
            return String::new();
        }

        let mut section = String::from("\n## Blocked Courses\n\n| Course | Missing |\n|---|---|\n");
        for (course, missing) in ctx.blocked() {
            let _ = writeln!(
                section,
                "| {} | {} |",
                Self::cell(&course.code),
                Self::cell(&describe_groups(missing))
            );
        }
        section
    }

    fn violations_section(ctx: &ReportContext) -> String {
        if ctx.violations.is_empty() {
            return String::new();
        }

        let mut section = String::from("\n## Missing Prerequisites\n\n");
        for violation in ctx.violations {
            let _ = writeln!(section, "- {violation}");
        }
        section
    }

    fn plan_section(ctx: &ReportContext) -> String {
        ctx.plan_summary.map_or_else(String::new, |summary| {
            format!(
                "\n## Plan Summary\n\n- Total Credits: {}\n- Balance: {}\n",
                summary.total_credits,
                summary.workload()
            )
        })
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}
