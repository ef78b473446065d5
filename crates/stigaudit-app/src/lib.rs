//! Use case orchestration for stigaudit.
//!
//! This crate provides the application layer: use cases that coordinate the conftree, catalog,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing, logging setup, and I/O.

#![forbid(unsafe_code)]

mod audit;
mod render;
mod report;

pub use audit::{AuditError, AuditInput, AuditOutput, resolve_settings, run_audit};
pub use render::{render_lines, render_markdown, renderable_outcome};
pub use report::{ReportContext, build_report, parse_report_json, serialize_report, to_renderable};
