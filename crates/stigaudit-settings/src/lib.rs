//! Settings parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves settings provided as strings.

#![forbid(unsafe_code)]

mod defaults;
mod model;
mod resolve;

pub use model::StigauditConfigV1;
pub use resolve::{EffectiveSettings, Overrides};

/// Parse `stigaudit.toml` (or equivalent) into a typed model.
pub fn parse_settings_toml(input: &str) -> anyhow::Result<StigauditConfigV1> {
    let cfg: StigauditConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings for a run (defaults, then the file, then overrides).
pub fn resolve_settings(
    cfg: StigauditConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveSettings> {
    resolve::resolve_settings(cfg, overrides)
}
