//! Render use cases: terminal lines from a run summary, Markdown from a report.

use crate::report::to_renderable;
use stigaudit_domain::{ConfigNode, RuleResult, RunSummary};
use stigaudit_render::RenderableOutcome;
use stigaudit_types::{AuditReport, Verbosity};

pub fn renderable_outcome(result: &RuleResult) -> RenderableOutcome {
    let texts = |nodes: &[ConfigNode]| nodes.iter().map(|n| n.text.clone()).collect();
    let classified = &result.outcome.classified;
    RenderableOutcome {
        id: result.rule.id.to_string(),
        severity: result.rule.severity.clone(),
        description: result.rule.description.clone(),
        verdict: result.outcome.verdict,
        pass: texts(&classified.pass),
        fail: texts(&classified.fail),
        na: texts(&classified.na),
    }
}

/// One rendered block per result, in summary order.
///
/// With `fail_only`, non-FAIL outcomes are left out of the output. They are still counted.
pub fn render_lines(summary: &RunSummary, verbosity: Verbosity, fail_only: bool) -> Vec<String> {
    summary
        .results
        .iter()
        .filter(|r| !fail_only || r.outcome.verdict.is_fail())
        .map(|r| stigaudit_render::render_outcome(&renderable_outcome(r), verbosity))
        .collect()
}

pub fn render_markdown(report: &AuditReport) -> String {
    stigaudit_render::render_markdown(&to_renderable(report))
}
