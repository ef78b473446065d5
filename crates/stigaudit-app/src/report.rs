use anyhow::Context;
use stigaudit_catalog::LoadFailure;
use stigaudit_domain::{ConfigNode, RunSummary};
use stigaudit_render::{RenderableCounts, RenderableError, RenderableOutcome, RenderableRun};
use stigaudit_types::{
    AuditReport, ErrorRecord, NodeRecord, ReportCounts, RuleRecord, SCHEMA_REPORT_V1, ToolMeta, ids,
};
use time::OffsetDateTime;

/// Run facts that are not part of the evaluation summary.
#[derive(Clone, Debug)]
pub struct ReportContext<'a> {
    pub config_file: &'a str,
    pub os_type: &'a str,
    pub stigs: &'a [String],
    pub started_at: OffsetDateTime,
    pub finished_at: OffsetDateTime,
    pub exit_status: u8,
}

pub fn build_report(
    ctx: ReportContext<'_>,
    summary: &RunSummary,
    load_failures: &[LoadFailure],
) -> AuditReport {
    let verdicts = summary.counts();
    let counts = ReportCounts {
        evaluated: count(summary.results.len() + summary.errors.len()),
        pass: verdicts.pass,
        fail: verdicts.fail,
        not_applicable: verdicts.not_applicable,
        errors: count(summary.errors.len()),
        skipped_load: count(load_failures.len()),
    };

    let rules = summary
        .results
        .iter()
        .map(|r| RuleRecord {
            id: r.rule.id.to_string(),
            severity: r.rule.severity.clone(),
            description: r.rule.description.clone(),
            verdict: r.outcome.verdict,
            pass: node_records(&r.outcome.classified.pass),
            fail: node_records(&r.outcome.classified.fail),
            na: node_records(&r.outcome.classified.na),
        })
        .collect();

    let mut errors: Vec<ErrorRecord> = load_failures
        .iter()
        .map(|f| ErrorRecord {
            source: ids::ERROR_SOURCE_LOAD.to_string(),
            subject: f.path.to_string(),
            message: f.error.to_string(),
        })
        .collect();
    errors.extend(summary.errors.iter().map(|e| ErrorRecord {
        source: ids::ERROR_SOURCE_EVAL.to_string(),
        subject: e.rule_id.to_string(),
        message: e.message.clone(),
    }));

    AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "stigaudit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: ctx.started_at,
        finished_at: ctx.finished_at,
        config_file: ctx.config_file.to_string(),
        os_type: ctx.os_type.to_string(),
        stigs: ctx.stigs.to_vec(),
        verdict: summary.verdict(),
        counts,
        exit_status: ctx.exit_status,
        rules,
        errors,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn node_records(nodes: &[ConfigNode]) -> Vec<NodeRecord> {
    nodes
        .iter()
        .map(|n| NodeRecord {
            line: n.line,
            text: n.text.clone(),
        })
        .collect()
}

pub fn serialize_report(report: &AuditReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize audit report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse stigaudit v1 report")
}

pub fn to_renderable(report: &AuditReport) -> RenderableRun {
    RenderableRun {
        config_file: report.config_file.clone(),
        os_type: report.os_type.clone(),
        stigs: report.stigs.clone(),
        verdict: report.verdict,
        counts: RenderableCounts {
            pass: report.counts.pass,
            fail: report.counts.fail,
            not_applicable: report.counts.not_applicable,
            errors: report.counts.errors + report.counts.skipped_load,
        },
        exit_status: report.exit_status,
        outcomes: report.rules.iter().map(renderable_from_record).collect(),
        errors: report
            .errors
            .iter()
            .map(|e| RenderableError {
                subject: e.subject.clone(),
                message: e.message.clone(),
            })
            .collect(),
    }
}

fn renderable_from_record(r: &RuleRecord) -> RenderableOutcome {
    let texts = |nodes: &[NodeRecord]| nodes.iter().map(|n| n.text.clone()).collect();
    RenderableOutcome {
        id: r.id.clone(),
        severity: r.severity.clone(),
        description: r.description.clone(),
        verdict: r.verdict,
        pass: texts(&r.pass),
        fail: texts(&r.fail),
        na: texts(&r.na),
    }
}
