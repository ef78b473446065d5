use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Rule files directly inside `dir` whose file name matches one of `globs`.
///
/// Behavior:
/// - Not recursive: one platform directory holds one flat catalog.
/// - Sorted lexicographically by path so runs are reproducible.
pub fn discover_rule_files(dir: &Utf8Path, globs: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("rule catalog directory not found: {}", dir);
    }
    let set = build_globset(globs).context("compile rule globset")?;

    let mut out: Vec<Utf8PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| set.is_match(e.file_name()))
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
