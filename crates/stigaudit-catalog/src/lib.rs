//! Rule catalog adapter: find rule files for a platform and decode them into the rule model.
//!
//! This crate is allowed to do filesystem IO. It does not evaluate anything; a bad record
//! is collected as a [`LoadFailure`] and the rest of the catalog still loads.

#![forbid(unsafe_code)]

mod discover;
mod record;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use stigaudit_domain::{Rule, RuleId};

pub use discover::discover_rule_files;
pub use record::{RuleLoadError, parse_rule_record};

/// Fuzz-friendly API for testing decoding robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Decode arbitrary text as a rule record.
    ///
    /// Returns `Ok(())` when the text yields a valid rule, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_rule_record(text: &str) -> Result<(), RuleLoadError> {
        let _ = record::parse_rule_record(RuleId::new("FUZZ"), text)?;
        Ok(())
    }

    /// Derive a rule id from an arbitrary file name. **Never panics.**
    pub fn rule_id(file_name: &str) -> String {
        RuleId::from_file_name(file_name).to_string()
    }
}

/// A rule file that was found but could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: Utf8PathBuf,
    pub error: RuleLoadError,
}

/// Every rule available for one platform.
#[derive(Debug)]
pub struct Catalog {
    pub os_type: String,
    pub dir: Utf8PathBuf,
    /// Sorted by rule id, then by file path. Every file is loaded, so two files that map to
    /// the same id (`V-1.yml`, `V-1.old.yml`) are both present.
    pub rules: Vec<Rule>,
    pub errors: Vec<LoadFailure>,
}

/// Load `<rules_root>/<os_type>/` into a [`Catalog`].
///
/// A missing platform directory or an `os_type` that is not a single plain path component is
/// an error. A rule file that cannot be read or decoded is collected in [`Catalog::errors`].
pub fn load_catalog(
    rules_root: &Utf8Path,
    os_type: &str,
    globs: &[String],
) -> anyhow::Result<Catalog> {
    validate_os_type(os_type)?;
    let dir = rules_root.join(os_type);
    let files = discover_rule_files(&dir, globs)
        .with_context(|| format!("discover rules for platform `{os_type}`"))?;

    let mut rules: Vec<Rule> = Vec::new();
    let mut errors: Vec<LoadFailure> = Vec::new();

    for path in files {
        let file_name = path.file_name().unwrap_or(path.as_str());
        let id = RuleId::from_file_name(file_name);

        match load_rule_file(&path, id) {
            Ok(rule) => rules.push(rule),
            Err(error) => errors.push(LoadFailure { path, error }),
        }
    }

    // Stable: files sharing an id keep their path order.
    rules.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Catalog {
        os_type: os_type.to_string(),
        dir,
        rules,
        errors,
    })
}

fn load_rule_file(path: &Utf8Path, id: RuleId) -> Result<Rule, RuleLoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_rule_record(id, &text)
}

fn validate_os_type(os_type: &str) -> anyhow::Result<()> {
    let plain = !os_type.is_empty()
        && os_type != "."
        && os_type != ".."
        && !os_type.contains(['/', '\\']);
    if !plain {
        anyhow::bail!("invalid platform name `{os_type}`: expected a single directory name");
    }
    Ok(())
}
