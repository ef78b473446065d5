//! Rendering for audit results: terminal lines at three verbosity levels and a Markdown summary.
//!
//! Renderers are pure: they take already-evaluated outcomes and return strings.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;

pub use markdown::render_markdown;
pub use model::{RenderableCounts, RenderableError, RenderableOutcome, RenderableRun};
pub use text::{render_brief, render_detail, render_outcome, render_record};
