//! Shared test utilities for the stigaudit workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `stigaudit-types` would not suffice.

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: when the root object looks like an audit report (has
///    `schema`, `tool`, `verdict`, `counts` and `rules`), `tool.version`
///    becomes `"__VERSION__"` and `config_file` is reduced to its file name,
///    since fixture paths differ per checkout.
///
/// 2. **Recursive**: `started_at` and `finished_at` are replaced with
///    `"__TIMESTAMP__"` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = ["schema", "tool", "verdict", "counts", "rules"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_report {
            if let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
                && tool_obj.contains_key("version")
            {
                tool_obj.insert(
                    "version".to_string(),
                    Value::String("__VERSION__".to_string()),
                );
            }
            if let Some(Value::String(path)) = obj.get_mut("config_file") {
                *path = file_name(path).to_string();
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
