//! Feature property access.
//!
//! Boundary datasets exported from some GIS portals wrap scalar properties in
//! single-element arrays (`"ste_name": ["California"]`). Readers accept both
//! shapes; `normalize_wrapped` rewrites the wrapped shape in place.

use serde_json::{Map, Value};

/// String property, unwrapping a single-element array if needed.
pub fn property_str<'a>(properties: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    match properties.get(key)? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.first().and_then(|v| v.as_str()),
        _ => None,
    }
}

/// Replace an array-wrapped value with its first element.
///
/// Returns `true` if the property changed.
pub fn normalize_wrapped(properties: &mut Map<String, Value>, key: &str) -> bool {
    let Some(Value::Array(items)) = properties.get(key) else {
        return false;
    };
    let first = items.first().cloned().unwrap_or(Value::Null);
    properties.insert(key.to_string(), first);
    true
}

#[cfg(test)]
mod tests {
    use super::{normalize_wrapped, property_str};
    use serde_json::{Map, Value, json};

    fn props(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn reads_plain_and_wrapped_strings() {
        let p = props(json!({"a": "Texas", "b": ["Ohio"], "c": 3, "d": []}));
        assert_eq!(property_str(&p, "a"), Some("Texas"));
        assert_eq!(property_str(&p, "b"), Some("Ohio"));
        assert_eq!(property_str(&p, "c"), None);
        assert_eq!(property_str(&p, "d"), None);
        assert_eq!(property_str(&p, "missing"), None);
    }

    #[test]
    fn normalizes_in_place_once() {
        let mut p = props(json!({"ste_name": ["Utah"], "ste_code": "49"}));
        assert!(normalize_wrapped(&mut p, "ste_name"));
        assert_eq!(p.get("ste_name"), Some(&json!("Utah")));
        assert!(!normalize_wrapped(&mut p, "ste_name"));
        assert!(!normalize_wrapped(&mut p, "ste_code"));
    }
}
