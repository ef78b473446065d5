use crate::model::Rule;
use std::collections::BTreeSet;

/// Rules whose applicability tags intersect the requested audits, ordered by rule id.
///
/// Rules outside the request are dropped entirely: not evaluated, not reported, not counted.
pub fn select_applicable<'a>(catalog: &'a [Rule], requested: &BTreeSet<String>) -> Vec<&'a Rule> {
    let mut selected: Vec<&Rule> = catalog.iter().filter(|r| r.applies_to(requested)).collect();
    selected.sort_by(|a, b| a.id.cmp(&b.id));
    selected
}
