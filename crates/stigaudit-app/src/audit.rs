//! The `audit` use case: evaluate a device configuration against its platform's rule catalog.

use crate::render::render_lines;
use crate::report::{ReportContext, build_report};
use anyhow::Context;
use camino::Utf8Path;
use rayon::prelude::*;
use std::collections::BTreeSet;
use stigaudit_catalog::{LoadFailure, load_catalog};
use stigaudit_conftree::{ConfigParseError, discover_markers, read_config};
use stigaudit_domain::{
    Aggregator, EvalError, Rule, RuleOutcome, RunSummary, evaluate, select_applicable,
};
use stigaudit_settings::{EffectiveSettings, Overrides, StigauditConfigV1};
use stigaudit_types::{AuditReport, ids};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

/// Parse settings text (empty is allowed, defaults apply) and apply CLI overrides.
pub fn resolve_settings(
    settings_text: &str,
    overrides: Overrides,
) -> anyhow::Result<EffectiveSettings> {
    let cfg = if settings_text.trim().is_empty() {
        StigauditConfigV1::default()
    } else {
        stigaudit_settings::parse_settings_toml(settings_text).context("parse settings")?
    };
    stigaudit_settings::resolve_settings(cfg, overrides).context("resolve settings")
}

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Device configuration to audit.
    pub config_path: &'a Utf8Path,
    pub settings: EffectiveSettings,
}

/// Output from the audit use case.
#[derive(Debug)]
pub struct AuditOutput {
    /// Platform the catalog was loaded for.
    pub os_type: String,
    /// Audits the rules were selected by.
    pub stigs: Vec<String>,
    pub summary: RunSummary,
    pub load_failures: Vec<LoadFailure>,
    /// Rendered results, already filtered for failures-only mode.
    pub lines: Vec<String>,
    pub report: AuditReport,
    pub exit_status: u8,
}

/// A run that could not evaluate anything.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Config(#[from] ConfigParseError),

    #[error(
        "no platform: pass --os_type or add a `!@#type:<platform>` marker to the configuration"
    )]
    UnknownPlatform,

    #[error("load rule catalog for `{os_type}`: {message}")]
    Catalog { os_type: String, message: String },
}

impl AuditError {
    pub fn exit_status(&self) -> u8 {
        ids::EXIT_FATAL
    }
}

/// Run the audit use case: parse the configuration, resolve platform and audits, load the
/// catalog, evaluate every applicable rule, and fold the outcomes into a summary and report.
pub fn run_audit(input: AuditInput<'_>) -> Result<AuditOutput, AuditError> {
    let started_at = OffsetDateTime::now_utc();
    let settings = &input.settings;

    let tree = read_config(input.config_path)?;
    let markers = discover_markers(&tree);

    let stigs = if settings.stigs.is_empty() {
        markers.stigs
    } else {
        settings.stigs.clone()
    };
    let os_type = settings
        .os_type
        .clone()
        .or(markers.os_type)
        .ok_or(AuditError::UnknownPlatform)?;

    info!(
        config = %input.config_path,
        os_type = %os_type,
        stigs = ?stigs,
        nodes = tree.len(),
        "starting audit"
    );
    if stigs.is_empty() {
        warn!("no audits requested; no rule will be evaluated");
    }

    let catalog = load_catalog(
        Utf8Path::new(&settings.rules_dir),
        &os_type,
        &settings.rule_globs,
    )
    .map_err(|e| AuditError::Catalog {
        os_type: os_type.clone(),
        message: format!("{e:#}"),
    })?;
    for failure in &catalog.errors {
        warn!(path = %failure.path, error = %failure.error, "skipping rule file");
    }

    let requested: BTreeSet<String> = stigs.iter().cloned().collect();
    let selected = select_applicable(&catalog.rules, &requested);
    info!(
        loaded = catalog.rules.len(),
        selected = selected.len(),
        parallel = settings.parallel,
        "rules selected"
    );

    let evaluated: Vec<(&Rule, Result<RuleOutcome, EvalError>)> = if settings.parallel {
        selected
            .par_iter()
            .map(|rule| (*rule, evaluate(&tree, rule)))
            .collect()
    } else {
        selected
            .iter()
            .map(|rule| (*rule, evaluate(&tree, rule)))
            .collect()
    };

    let mut agg = Aggregator::new();
    for (rule, result) in evaluated {
        match result {
            Ok(outcome) => {
                debug!(rule = %rule.id, verdict = %outcome.verdict, "rule evaluated");
                agg.record(rule.clone(), outcome);
            }
            Err(err) => {
                error!(rule = %rule.id, error = %err, "rule evaluation failed");
                agg.record_error(rule.id.clone(), err.to_string());
            }
        }
    }
    let summary = agg.finalize();
    let exit_status = summary.exit_status(settings.exit_policy);

    let counts = summary.counts();
    info!(
        pass = counts.pass,
        fail = counts.fail,
        not_applicable = counts.not_applicable,
        errors = summary.errors.len(),
        skipped_load = catalog.errors.len(),
        exit_status,
        "audit complete"
    );

    let lines = render_lines(&summary, settings.verbosity, settings.fail_only);
    let report = build_report(
        ReportContext {
            config_file: input.config_path.as_str(),
            os_type: &os_type,
            stigs: &stigs,
            started_at,
            finished_at: OffsetDateTime::now_utc(),
            exit_status,
        },
        &summary,
        &catalog.errors,
    );

    Ok(AuditOutput {
        os_type,
        stigs,
        summary,
        load_failures: catalog.errors,
        lines,
        report,
        exit_status,
    })
}
