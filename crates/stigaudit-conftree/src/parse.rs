use regex::Regex;
use std::collections::BTreeMap;
use stigaudit_domain::{ConfigNode, ConfigTree, TreeError};

#[derive(Clone, Debug)]
struct Node {
    line: u32,
    indent: usize,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Exclusive end of this node's subtree in `ConfTree::nodes`.
    end: usize,
}

/// A parsed configuration: every non-blank line, linked to its parent by indentation.
///
/// Nodes are stored in document order, so the descendants of a node are exactly the
/// contiguous run of nodes after it up to `end`.
#[derive(Clone, Debug, Default)]
pub struct ConfTree {
    nodes: Vec<Node>,
    by_line: BTreeMap<u32, usize>,
}

/// Leading whitespace width; a tab counts as one column like a space.
fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

impl ConfTree {
    pub fn parse(text: &str) -> Self {
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line_text = raw.strip_suffix('\r').unwrap_or(raw);
            if line_text.trim().is_empty() {
                continue;
            }
            let indent = indent_of(line_text);
            let idx = nodes.len();

            while let Some(&top) = stack.last() {
                if nodes[top].indent < indent {
                    break;
                }
                nodes[top].end = idx;
                stack.pop();
            }

            let parent = stack.last().copied();
            if let Some(p) = parent {
                nodes[p].children.push(idx);
            }

            nodes.push(Node {
                line: u32::try_from(i + 1).unwrap_or(u32::MAX),
                indent,
                text: line_text.to_string(),
                parent,
                children: Vec::new(),
                end: idx + 1,
            });
            stack.push(idx);
        }

        let total = nodes.len();
        for idx in stack {
            nodes[idx].end = total;
        }

        let by_line = nodes.iter().enumerate().map(|(i, n)| (n.line, i)).collect();
        Self { nodes, by_line }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in document order.
    pub fn nodes(&self) -> impl Iterator<Item = ConfigNode> + '_ {
        self.nodes.iter().map(to_config_node)
    }

    /// Top-level (unindented relative to nothing) nodes.
    pub fn roots(&self) -> Vec<ConfigNode> {
        self.nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(to_config_node)
            .collect()
    }

    /// Immediate children of `node`, in document order.
    pub fn children(&self, node: &ConfigNode) -> Result<Vec<ConfigNode>, TreeError> {
        let idx = self.index_of(node)?;
        Ok(self.nodes[idx]
            .children
            .iter()
            .map(|&c| to_config_node(&self.nodes[c]))
            .collect())
    }

    pub fn parent(&self, node: &ConfigNode) -> Result<Option<ConfigNode>, TreeError> {
        let idx = self.index_of(node)?;
        Ok(self.nodes[idx].parent.map(|p| to_config_node(&self.nodes[p])))
    }

    fn index_of(&self, node: &ConfigNode) -> Result<usize, TreeError> {
        let &idx = self
            .by_line
            .get(&node.line)
            .ok_or(TreeError::UnknownLine { line: node.line })?;
        let found = &self.nodes[idx].text;
        if *found != node.text {
            return Err(TreeError::ForeignNode {
                line: node.line,
                expected: node.text.clone(),
                found: found.clone(),
            });
        }
        Ok(idx)
    }
}

fn to_config_node(n: &Node) -> ConfigNode {
    ConfigNode::new(n.line, n.text.clone())
}

impl ConfigTree for ConfTree {
    fn find_all(&self, pattern: &Regex) -> Vec<ConfigNode> {
        self.nodes
            .iter()
            .filter(|n| pattern.is_match(&n.text))
            .map(to_config_node)
            .collect()
    }

    fn search_descendants(
        &self,
        node: &ConfigNode,
        pattern: &Regex,
    ) -> Result<Vec<ConfigNode>, TreeError> {
        let idx = self.index_of(node)?;
        let end = self.nodes[idx].end;
        Ok(self.nodes[idx + 1..end]
            .iter()
            .filter(|n| pattern.is_match(&n.text))
            .map(to_config_node)
            .collect())
    }
}
