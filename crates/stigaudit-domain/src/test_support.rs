use crate::model::{Check, Pattern, Rule, RuleId, When};
use crate::tree::{ConfigNode, ConfigTree, TreeError};
use regex::Regex;
use std::collections::BTreeSet;

/// Minimal indentation tree for engine tests.
pub struct MemTree {
    lines: Vec<(u32, usize, String)>,
}

impl MemTree {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| {
                let indent = l.len() - l.trim_start().len();
                ((i + 1) as u32, indent, l.to_string())
            })
            .collect();
        Self { lines }
    }
}

impl ConfigTree for MemTree {
    fn find_all(&self, pattern: &Regex) -> Vec<ConfigNode> {
        self.lines
            .iter()
            .filter(|(_, _, text)| pattern.is_match(text))
            .map(|(line, _, text)| ConfigNode::new(*line, text.clone()))
            .collect()
    }

    fn search_descendants(
        &self,
        node: &ConfigNode,
        pattern: &Regex,
    ) -> Result<Vec<ConfigNode>, TreeError> {
        let pos = self
            .lines
            .iter()
            .position(|(line, _, _)| *line == node.line)
            .ok_or(TreeError::UnknownLine { line: node.line })?;
        let indent = self.lines[pos].1;

        Ok(self.lines[pos + 1..]
            .iter()
            .take_while(|(_, i, _)| *i > indent)
            .filter(|(_, _, text)| pattern.is_match(text))
            .map(|(line, _, text)| ConfigNode::new(*line, text.clone()))
            .collect())
    }
}

pub fn tags(v: &[&str]) -> BTreeSet<String> {
    v.iter().map(|s| s.to_string()).collect()
}

pub fn global_rule(id: &str, pattern: &str, expected_count: u32) -> Rule {
    Rule {
        id: RuleId::new(id),
        severity: "medium".to_string(),
        description: format!("global check {id}"),
        applicability_tags: tags(&["TEST"]),
        check: Check::Global {
            pattern: Pattern::new(pattern),
            expected_count,
        },
    }
}

pub fn hier_rule(
    id: &str,
    parent: &str,
    when: Option<&str>,
    child: &str,
    expected_count: u32,
) -> Rule {
    Rule {
        id: RuleId::new(id),
        severity: "medium".to_string(),
        description: format!("hierarchical check {id}"),
        applicability_tags: tags(&["TEST"]),
        check: Check::Hierarchical {
            parent: Pattern::new(parent),
            when: when.map_or(When::Always, |p| When::Matches(Pattern::new(p))),
            child: Pattern::new(child),
            expected_count,
        },
    }
}
