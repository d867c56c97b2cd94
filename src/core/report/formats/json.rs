//! JSON report generator for scripting and front-end consumers

use crate::core::report::{ReportContext, ReportGenerator};
use crate::eligibility::{EligibilityCounts, Violation};
use crate::models::{Course, PrerequisiteGroup};
use serde::Serialize;
use std::error::Error;

/// JSON report generator
pub struct JsonReporter;

#[derive(Serialize)]
struct BlockedEntry<'a> {
    code: &'a str,
    missing_groups: &'a [&'a PrerequisiteGroup],
}

#[derive(Serialize)]
struct PlanEntry {
    total_credits: u32,
    workload: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: String,
    skipped: bool,
    counts: EligibilityCounts,
    eligible: Vec<&'a Course>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocked: Vec<BlockedEntry<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    violations: &'a [Violation],
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<PlanEntry>,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let blocked = if ctx.explain {
            ctx.blocked()
                .map(|(course, missing_groups)| BlockedEntry {
                    code: &course.code,
                    missing_groups,
                })
                .collect()
        } else {
            Vec::new()
        };

        let report = JsonReport {
            title: ctx.title(),
            skipped: ctx.skipped,
            counts: ctx.counts,
            eligible: ctx.eligible().collect(),
            blocked,
            violations: ctx.violations,
            plan: ctx.plan_summary.map(|s| PlanEntry {
                total_credits: s.total_credits,
                workload: s.workload(),
            }),
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}
