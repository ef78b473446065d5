use crate::Verdict;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the JSON audit report.
pub const SCHEMA_REPORT_V1: &str = "stigaudit.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One configuration line as it appears in a rule's classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeRecord {
    /// 1-based line number in the audited configuration.
    pub line: u32,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleRecord {
    pub id: String,
    pub severity: String,
    pub description: String,
    pub verdict: Verdict,
    #[serde(default)]
    pub pass: Vec<NodeRecord>,
    #[serde(default)]
    pub fail: Vec<NodeRecord>,
    #[serde(default)]
    pub na: Vec<NodeRecord>,
}

/// A rule that could not be loaded or evaluated. Never counted as a failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorRecord {
    /// `load` or `eval`.
    pub source: String,
    /// Rule id, or the rule file path when the id is unknown.
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportCounts {
    pub evaluated: u32,
    pub pass: u32,
    pub fail: u32,
    pub not_applicable: u32,
    /// Rules that failed to evaluate.
    pub errors: u32,
    /// Rule files that failed to load.
    #[serde(default)]
    pub skipped_load: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    /// Versioned schema identifier.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub config_file: String,
    pub os_type: String,
    pub stigs: Vec<String>,
    /// `fail` when at least one rule failed, `pass` otherwise.
    pub verdict: Verdict,
    pub counts: ReportCounts,
    pub exit_status: u8,
    pub rules: Vec<RuleRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorRecord>,
}
