//! Stable identifiers, in-band marker prefixes, and process exit statuses.

// In-band configuration markers (comment lines in the device config).
pub const MARKER_STIG: &str = "!@#stig:";
pub const MARKER_TYPE: &str = "!@#type:";

/// Regex used to locate `!@#stig:<name>` marker lines.
pub const MARKER_STIG_PATTERN: &str = r"!@#stig:\S+";
/// Regex used to locate `!@#type:<platform>` marker lines.
pub const MARKER_TYPE_PATTERN: &str = r"!@#type:\S+";

// Exit statuses.
/// Largest fail count reported as-is under the saturating exit policy.
pub const EXIT_FAIL_COUNT_MAX: u8 = 254;
/// Fatal run error (unreadable config, unknown platform, missing catalog).
pub const EXIT_FATAL: u8 = 255;

// Error record sources in the JSON report.
pub const ERROR_SOURCE_LOAD: &str = "load";
pub const ERROR_SOURCE_EVAL: &str = "eval";

// Defaults shared by settings and CLI.
pub const DEFAULT_RULES_DIR: &str = "rules";
pub const DEFAULT_RULE_GLOB: &str = "*.yml";
pub const DEFAULT_LOG_FILE: &str = "audit.log";
pub const DEFAULT_SETTINGS_FILE: &str = "stigaudit.toml";
