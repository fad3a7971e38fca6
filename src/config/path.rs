//! Dot-path addressing into a configuration tree.
//!
//! Paths like `mqtt.port` are split on `.` and walked segment by segment
//! through nested JSON objects. Reads are total: any absent segment or
//! non-mapping intermediate resolves to not-found rather than an error, which
//! is what lets `ConfigStore::get` offer a silent default-fallback path.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};

/// Resolve a dot-path for reading.
///
/// Returns `None` when any segment is absent or an intermediate is not a
/// mapping. The empty path and paths with empty segments (`"a..b"`) resolve
/// to `None`.
pub fn read<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write a value at a dot-path, creating empty mappings for any missing
/// intermediate segment.
///
/// An intermediate segment that exists but holds a non-mapping value is
/// rejected with [`ConfigError::PathConflict`]; the existing scalar is never
/// silently replaced by a mapping.
pub fn write(tree: &mut Value, path: &str, value: Value) -> ConfigResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    // split('.') yields at least one segment, even for the empty path
    let Some((last, intermediates)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = tree;
    for segment in intermediates {
        let map = current
            .as_object_mut()
            .ok_or_else(|| conflict(path, segment))?;
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !current.is_object() {
            return Err(conflict(path, segment));
        }
    }

    current
        .as_object_mut()
        .ok_or_else(|| conflict(path, last))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Resolve a dot-path to a mapping for iteration.
///
/// Unlike [`read`], absence is represented as an empty map, so callers can
/// always iterate the result. A present value that is not a mapping also
/// yields an empty map.
pub fn section(tree: &Value, path: &str) -> Map<String, Value> {
    match read(tree, path) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

fn conflict(path: &str, segment: &str) -> ConfigError {
    ConfigError::PathConflict {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}
