//! JSON path resolution.
//!
//! Resolves dot-notation paths like "location.latitude" to values in a
//! stored document.

use serde_json::Value;

/// Resolve a dot-notation path to a value in JSON.
///
/// # Examples
/// ```
/// use roadaid_core::extraction::resolve_json_path;
/// use serde_json::json;
/// let data = json!({"location": {"latitude": 8.88}});
/// let value = resolve_json_path(&data, "location.latitude");
/// assert_eq!(value, Some(&json!(8.88)));
/// ```
pub fn resolve_json_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }

    let mut current = data;
    for part in path.split('.') {
        match current {
            Value::Object(obj) => {
                current = obj.get(part)?;
            }
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Strict numeric read: only JSON numbers qualify, never numeric strings.
pub fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a field stored as text. Numbers are accepted too, since older
/// clients wrote picker values such as vehicle counts unquoted.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolve `path` and parse it into one of the closed vocabularies.
pub fn resolve_vocabulary<T: std::str::FromStr>(data: &Value, path: &str) -> Option<T> {
    resolve_json_path(data, path)
        .and_then(value_as_text)
        .and_then(|s| s.parse().ok())
}
