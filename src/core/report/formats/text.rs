//! Plain-text report generator for the terminal

use crate::core::report::{describe_groups, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();

        writeln!(out, "=== {} ===", ctx.title())?;
        if ctx.skipped {
            writeln!(out, "(planning skipped: showing every catalog course)")?;
        }
        writeln!(
            out,
            "{} eligible | {} completed | {} in progress | {} planned | {} blocked",
            ctx.counts.eligible,
            ctx.counts.completed,
            ctx.counts.in_progress,
            ctx.counts.planned,
            ctx.counts.blocked
        )?;
        writeln!(out)?;

        if ctx.counts.eligible == 0 {
            writeln!(out, "No eligible courses.")?;
        }
        let width = ctx.eligible().map(|c| c.code.len()).max().unwrap_or(0);
        for course in ctx.eligible() {
            writeln!(
                out,
                "  {:<width$}  {}  ({} cr, level {}, {})",
                course.code,
                course.title,
                course.credits,
                course.level,
                course.difficulty()
            )?;
        }

        if ctx.explain && ctx.counts.blocked > 0 {
            writeln!(out, "\nBlocked:")?;
            for (course, missing) in ctx.blocked() {
                writeln!(out, "  {}: missing {}", course.code, describe_groups(missing))?;
            }
        }

        if !ctx.violations.is_empty() {
            writeln!(out, "\nMissing prerequisites:")?;
            for violation in ctx.violations {
                writeln!(out, "  {violation}")?;
            }
        }

        if let Some(summary) = ctx.plan_summary {
            writeln!(out, "\nPlan: {summary}")?;
        }

        Ok(out)
    }
}
