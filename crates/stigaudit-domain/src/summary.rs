use crate::model::{Rule, RuleId};
use crate::outcome::RuleOutcome;
use crate::policy::ExitPolicy;
use stigaudit_types::Verdict;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleResult {
    pub rule: Rule,
    pub outcome: RuleOutcome,
}

/// A rule whose evaluation failed. Kept apart from FAIL verdicts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleError {
    pub rule_id: RuleId,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub pass: u32,
    pub fail: u32,
    pub not_applicable: u32,
}

/// Accumulates rule outcomes for one run. Owned by the orchestrating caller.
#[derive(Debug, Default)]
pub struct Aggregator {
    results: Vec<RuleResult>,
    errors: Vec<RuleError>,
    fail_count: u32,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, rule: Rule, outcome: RuleOutcome) {
        if outcome.verdict.is_fail() {
            self.fail_count += 1;
        }
        self.results.push(RuleResult { rule, outcome });
    }

    pub fn record_error(&mut self, rule_id: RuleId, message: impl Into<String>) {
        self.errors.push(RuleError {
            rule_id,
            message: message.into(),
        });
    }

    /// Close the run. Results are ordered by rule id whatever order they were recorded in;
    /// results sharing an id keep their recording order.
    pub fn finalize(mut self) -> RunSummary {
        self.results.sort_by(|a, b| a.rule.id.cmp(&b.rule.id));
        self.errors.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));
        RunSummary {
            results: self.results,
            errors: self.errors,
            fail_count: self.fail_count,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub results: Vec<RuleResult>,
    pub errors: Vec<RuleError>,
    pub fail_count: u32,
}

impl RunSummary {
    pub fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for r in &self.results {
            match r.outcome.verdict {
                Verdict::Pass => counts.pass += 1,
                Verdict::Fail => counts.fail += 1,
                Verdict::NotApplicable => counts.not_applicable += 1,
            }
        }
        counts
    }

    /// Run-level verdict: any failing rule fails the run.
    pub fn verdict(&self) -> Verdict {
        if self.fail_count > 0 {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn exit_status(&self, policy: ExitPolicy) -> u8 {
        policy.exit_status(self.fail_count)
    }
}
