use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `stigaudit.toml` schema v1.
///
/// Every field is optional; anything unset falls back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StigauditConfigV1 {
    /// Optional schema string for tooling (`stigaudit.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Root of the rule catalog; rules live in `<rules_dir>/<os_type>/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_dir: Option<String>,

    /// Platform to audit when the configuration carries no `!@#type:` marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,

    /// Audits to run. Empty means "use the configuration's `!@#stig:` markers".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stigs: Vec<String>,

    /// Report verbosity: 0, 1 or 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_only: Option<bool>,

    /// `saturate` (default) or `wrap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_policy: Option<String>,

    /// File name globs selecting rule files inside the platform directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_globs: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,

    /// Evaluate rules on a thread pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}
