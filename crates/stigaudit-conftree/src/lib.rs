//! Device configuration adapters: read a configuration file and build a searchable tree.
//!
//! Lines are organized into parent/child relationships by indentation. The tree is read-only
//! once built and implements [`stigaudit_domain::ConfigTree`] for the evaluation engine.

#![forbid(unsafe_code)]

pub mod markers;
mod parse;

use camino::Utf8Path;

pub use markers::{Markers, discover_markers};
pub use parse::ConfTree;

/// The configuration file could not be turned into a tree. Fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigParseError {
    #[error("read configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration {path} is not valid UTF-8 (first bad byte at offset {offset})")]
    NotUtf8 { path: String, offset: usize },
}

/// Read and parse a configuration file.
pub fn read_config(path: &Utf8Path) -> Result<ConfTree, ConfigParseError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigParseError::Read {
        path: path.to_string(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| ConfigParseError::NotUtf8 {
        path: path.to_string(),
        offset: e.utf8_error().valid_up_to(),
    })?;
    Ok(ConfTree::parse(&text))
}

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text and walk every node's children and descendants.
    ///
    /// Returns the node count. **Never panics** on any input.
    pub fn parse_and_walk(text: &str) -> usize {
        let tree = ConfTree::parse(text);
        if let Ok(any) = regex::Regex::new("") {
            for node in tree.nodes() {
                let _ = tree.children(&node);
                let _ = stigaudit_domain::ConfigTree::search_descendants(&tree, &node, &any);
            }
        }
        let _ = discover_markers(&tree);
        tree.len()
    }
}
