use crate::{defaults, model::StigauditConfigV1};
use anyhow::Context;
use globset::Glob;
use stigaudit_domain::ExitPolicy;
use stigaudit_types::Verbosity;

/// Values supplied on the command line. Each one, when set, beats the settings file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub rules_dir: Option<String>,
    pub os_type: Option<String>,
    pub stigs: Vec<String>,
    pub verbosity: Option<u8>,
    pub fail_only: Option<bool>,
    pub exit_policy: Option<String>,
    pub log_file: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveSettings {
    pub rules_dir: String,
    /// `None` means "take the platform from the configuration's marker".
    pub os_type: Option<String>,
    /// Empty means "take the audits from the configuration's markers".
    pub stigs: Vec<String>,
    pub verbosity: Verbosity,
    pub fail_only: bool,
    pub exit_policy: ExitPolicy,
    pub rule_globs: Vec<String>,
    pub log_file: String,
    pub parallel: bool,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        defaults::defaults()
    }
}

pub fn resolve_settings(
    cfg: StigauditConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveSettings> {
    let mut effective = defaults::defaults();

    if let Some(dir) = overrides.rules_dir.or(cfg.rules_dir) {
        effective.rules_dir = dir;
    }
    effective.os_type = overrides.os_type.or(cfg.os_type);

    effective.stigs = if overrides.stigs.is_empty() {
        cfg.stigs
    } else {
        overrides.stigs
    };

    if let Some(level) = overrides.verbosity.or(cfg.verbosity) {
        effective.verbosity = parse_verbosity(level)?;
    }
    if let Some(fail_only) = overrides.fail_only.or(cfg.fail_only) {
        effective.fail_only = fail_only;
    }
    if let Some(policy) = overrides.exit_policy.or(cfg.exit_policy) {
        effective.exit_policy = parse_exit_policy(&policy)?;
    }

    if !cfg.rule_globs.is_empty() {
        validate_globs(&cfg.rule_globs)?;
        effective.rule_globs = cfg.rule_globs;
    }

    if let Some(log_file) = overrides.log_file.or(cfg.log_file) {
        effective.log_file = log_file;
    }
    if let Some(parallel) = overrides.parallel.or(cfg.parallel) {
        effective.parallel = parallel;
    }

    Ok(effective)
}

fn validate_globs(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid rule glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_verbosity(level: u8) -> anyhow::Result<Verbosity> {
    match Verbosity::from_level(level) {
        Some(v) => Ok(v),
        None => anyhow::bail!("unknown verbosity: {level} (expected 0, 1 or 2)"),
    }
}

fn parse_exit_policy(v: &str) -> anyhow::Result<ExitPolicy> {
    match v {
        "saturate" => Ok(ExitPolicy::Saturate),
        "wrap" => Ok(ExitPolicy::Wrap),
        other => anyhow::bail!("unknown exit_policy: {other} (expected 'saturate' or 'wrap')"),
    }
}
