//! Pure rule evaluation (no IO).
//!
//! Input: a configuration tree behind [`tree::ConfigTree`] and rules built elsewhere.
//! Output: per-rule outcomes folded into a run summary and an exit status.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod outcome;
pub mod policy;
pub mod select;
pub mod summary;
pub mod tree;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use error::EvalError;
pub use model::{Check, Pattern, Rule, RuleId, When};
pub use outcome::{Classified, RuleOutcome};
pub use policy::ExitPolicy;
pub use select::select_applicable;
pub use summary::{Aggregator, RuleError, RuleResult, RunSummary, VerdictCounts};
pub use tree::{ConfigNode, ConfigTree, TreeError};
