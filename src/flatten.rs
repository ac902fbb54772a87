//! Flatten nested JSON into an ordered map of leaf paths

use crate::types::{JsonPath, PathSegment};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Leaf paths in depth-first pre-order, mapped to their scalar values
pub type FlatMap = IndexMap<JsonPath, Value>;

/// Flatten a whole document.
///
/// Every scalar (string, number, boolean, null) becomes one entry.
/// Objects and arrays never appear as entries themselves, so an empty
/// object or array contributes nothing. A document that is itself a
/// scalar yields a single entry at the root path.
pub fn flatten(value: &Value) -> FlatMap {
    flatten_with_prefix(value, JsonPath::root())
}

/// Flatten `value` as if it were found at `prefix` inside a larger document
pub fn flatten_with_prefix(value: &Value, prefix: JsonPath) -> FlatMap {
    let mut out = FlatMap::new();
    let mut path = prefix;
    flatten_into(value, &mut path, &mut out);

    tracing::debug!(leaves = out.len(), "flattened document");
    out
}

/// Recursively collect leaves below `path`
fn flatten_into(value: &Value, path: &mut JsonPath, out: &mut FlatMap) {
    match value {
        Value::Object(obj) => flatten_object(obj, path, out),
        Value::Array(arr) => flatten_array(arr, path, out),
        leaf => {
            tracing::trace!(path = %path, "leaf");
            out.insert(path.clone(), leaf.clone());
        }
    }
}

fn flatten_object(obj: &Map<String, Value>, path: &mut JsonPath, out: &mut FlatMap) {
    for (key, child) in obj {
        path.push(PathSegment::Key(key.clone()));
        flatten_into(child, path, out);
        path.pop();
    }
}

fn flatten_array(arr: &[Value], path: &mut JsonPath, out: &mut FlatMap) {
    for (idx, child) in arr.iter().enumerate() {
        path.push(PathSegment::Index(idx));
        flatten_into(child, path, out);
        path.pop();
    }
}
