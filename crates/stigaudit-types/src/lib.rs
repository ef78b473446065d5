//! Stable DTOs and IDs used across the stigaudit workspace.
//!
//! This crate is intentionally boring:
//! - the tri-state rule verdict and the output verbosity levels
//! - stable string IDs, marker prefixes, and exit status constants
//! - data types for the emitted JSON audit report

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;
mod verdict;

pub use receipt::{
    AuditReport, ErrorRecord, NodeRecord, ReportCounts, RuleRecord, SCHEMA_REPORT_V1, ToolMeta,
};
pub use verdict::{Verbosity, Verdict};
