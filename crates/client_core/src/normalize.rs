//! Canonicalizes the envelope shapes the API wraps its responses in.

use serde_json::{Map, Value};
use tracing::warn;

use crate::Resource;

/// Reduces any known list envelope to the bare record sequence.
///
/// Recognized shapes, in order: a bare array; `{"data": ...}` (unwrapped
/// recursively, so paginated `{"data": {"data": [...]}}` works too); an array
/// under the resource name or one of its envelope keys; an object with
/// exactly one array-valued field. Anything else yields an empty list.
pub fn normalize_list(resource: Resource, body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(map) => normalize_object(resource, map),
        other => {
            warn!(
                resource = resource.path(),
                kind = value_kind(&other),
                "list response is not an array or object; treating as empty"
            );
            Vec::new()
        }
    }
}

fn normalize_object(resource: Resource, mut map: Map<String, Value>) -> Vec<Value> {
    if let Some(data) = map.remove("data") {
        if !data.is_null() {
            return normalize_list(resource, data);
        }
    }

    for key in std::iter::once(resource.path()).chain(resource.envelope_keys().iter().copied()) {
        if let Some(Value::Array(items)) = map.get_mut(key).map(Value::take) {
            return items;
        }
    }

    let mut arrays = map.into_iter().filter_map(|(_, value)| match value {
        Value::Array(items) => Some(items),
        _ => None,
    });
    match (arrays.next(), arrays.next()) {
        (Some(items), None) => items,
        (None, _) => {
            warn!(
                resource = resource.path(),
                "list response carries no record array; treating as empty"
            );
            Vec::new()
        }
        (Some(_), Some(_)) => {
            warn!(
                resource = resource.path(),
                "list response carries several arrays and none is recognized; treating as empty"
            );
            Vec::new()
        }
    }
}

/// Unwraps a single-record response (`{"data": {...}, ...}` or the bare record).
pub fn normalize_record(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
