use crate::tree::TreeError;

/// Why a single rule could not be evaluated.
///
/// Both variants are per-rule: the caller records them and moves on to the next rule.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("malformed pattern {pattern:?}: {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration tree: {0}")]
    InvalidTree(#[from] TreeError),
}
