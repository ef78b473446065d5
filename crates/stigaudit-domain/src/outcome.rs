use crate::tree::ConfigNode;
use stigaudit_types::Verdict;

/// Nodes sorted into the three disjoint outcome groups, each in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classified {
    pub pass: Vec<ConfigNode>,
    pub fail: Vec<ConfigNode>,
    pub na: Vec<ConfigNode>,
}

impl Classified {
    pub fn len(&self) -> usize {
        self.pass.len() + self.fail.len() + self.na.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub verdict: Verdict,
    pub classified: Classified,
}
