use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state outcome of one rule evaluated against one configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    NotApplicable,
}

impl Verdict {
    /// Console label, kept compatible with existing audit tooling.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::NotApplicable => "N/A",
        }
    }

    pub fn is_fail(self) -> bool {
        self == Verdict::Fail
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How much of each rule outcome gets printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// `0`: one summary line per rule.
    #[default]
    Brief,
    /// `1`: every classified node, grouped by pass/fail/na.
    Detail,
    /// `2`: one comma-delimited record per rule for batch collection.
    Record,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Verbosity::Brief),
            1 => Some(Verbosity::Detail),
            2 => Some(Verbosity::Record),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Verbosity::Brief => 0,
            Verbosity::Detail => 1,
            Verbosity::Record => 2,
        }
    }
}
