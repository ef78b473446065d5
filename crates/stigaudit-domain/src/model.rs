use crate::error::EvalError;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Stable rule identifier, derived from the rule's catalog file name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(String);

impl RuleId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// `V-3012.yml` and `V-3012.draft.yml` both map to `V-3012`.
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        Self(stem.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source text of a regular expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn compile(&self) -> Result<Regex, EvalError> {
        Regex::new(&self.0).map_err(|source| EvalError::MalformedPattern {
            pattern: self.0.clone(),
            source,
        })
    }
}

/// Applicability gate of a hierarchical check, decided per candidate parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum When {
    Always,
    /// Applies only when some descendant of the parent matches.
    Matches(Pattern),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Check {
    /// Count matches across the whole configuration.
    Global {
        pattern: Pattern,
        expected_count: u32,
    },
    /// Count child matches under each parent match.
    Hierarchical {
        parent: Pattern,
        when: When,
        child: Pattern,
        expected_count: u32,
    },
}

impl Check {
    pub fn patterns(&self) -> Vec<&Pattern> {
        match self {
            Check::Global { pattern, .. } => vec![pattern],
            Check::Hierarchical {
                parent,
                when,
                child,
                ..
            } => {
                let mut out = vec![parent];
                if let When::Matches(p) = when {
                    out.push(p);
                }
                out.push(child);
                out
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    pub severity: String,
    pub description: String,
    /// Names of the compliance baselines this rule belongs to.
    pub applicability_tags: BTreeSet<String>,
    pub check: Check,
}

impl Rule {
    pub fn applies_to(&self, requested: &BTreeSet<String>) -> bool {
        !self.applicability_tags.is_disjoint(requested)
    }

    /// Compile every pattern once so malformed rules are rejected at load time.
    pub fn validate(&self) -> Result<(), EvalError> {
        for pattern in self.check.patterns() {
            pattern.compile()?;
        }
        Ok(())
    }
}
