//! The read-only view of a parsed configuration that the engine searches.

use regex::Regex;

/// One configuration line.
///
/// Identity is positional: `line` is the 1-based line number in the original file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigNode {
    pub line: u32,
    pub text: String,
}

impl ConfigNode {
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Search operations the engine needs from a configuration tree.
///
/// Patterns are searched against the full verbatim line text, so `^` and `$` anchor to the line.
/// Results are always in document order.
pub trait ConfigTree {
    /// Every node anywhere in the tree whose text matches `pattern`.
    fn find_all(&self, pattern: &Regex) -> Vec<ConfigNode>;

    /// Every descendant of `node` (any depth) whose text matches `pattern`.
    ///
    /// Fails when `node` does not belong to this tree.
    fn search_descendants(
        &self,
        node: &ConfigNode,
        pattern: &Regex,
    ) -> Result<Vec<ConfigNode>, TreeError>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no configuration line {line} in tree")]
    UnknownLine { line: u32 },

    #[error("line {line} does not belong to this tree (expected {expected:?}, found {found:?})")]
    ForeignNode {
        line: u32,
        expected: String,
        found: String,
    },
}
