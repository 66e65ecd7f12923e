//! Dot-delimited addressing into a JSON tree.
//!
//! Segments address object keys and array indices interchangeably
//! (`assets.2.layers.0.shapes.1.it.3`). There is no escaping, so keys that
//! contain a literal `.` cannot be addressed.

use serde_json::Value;

/// Outcome of walking a path. `Empty` absorbs every remaining segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found(&'a Value),
    Empty,
}

impl<'a> Resolved<'a> {
    /// Step one segment further.
    pub fn get(self, segment: &str) -> Resolved<'a> {
        match self {
            Resolved::Found(value) => match child(value, segment) {
                Some(next) => Resolved::Found(next),
                None => Resolved::Empty,
            },
            Resolved::Empty => Resolved::Empty,
        }
    }

    pub fn value(self) -> Option<&'a Value> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Resolved::Empty)
    }
}

/// Split a path into segments. The empty path has no segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(move |_| !path.is_empty())
}

/// Resolve `path` against `root`.
///
/// Never fails: a missing key, an out-of-range index or a scalar in the middle
/// of the walk yields [`Resolved::Empty`]. The empty path yields the root.
pub fn resolve<'a>(path: &str, root: &'a Value) -> Resolved<'a> {
    segments(path).fold(Resolved::Found(root), Resolved::get)
}

/// Mutable counterpart of [`resolve`]; `None` plays the role of `Empty`.
pub fn resolve_mut<'a>(path: &str, root: &'a mut Value) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in segments(path) {
        current = child_mut(current, segment)?;
    }
    Some(current)
}

/// Join a base path and one more segment.
pub fn join(base: &str, segment: impl std::fmt::Display) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}.{segment}")
    }
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => index(segment).and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

// Canonical decimal only: `+1` and `01` are keys, not indices.
fn index(segment: &str) -> Option<usize> {
    let i = segment.parse::<usize>().ok()?;
    (i.to_string() == segment).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "layers": [
                { "nm": "a", "shapes": [{ "ty": "gr", "it": [{ "ty": "fl" }] }] }
            ],
            "0": "numeric key"
        })
    }

    #[test]
    fn resolves_mixed_keys_and_indices() {
        let doc = doc();
        assert_eq!(
            resolve("layers.0.shapes.0.it.0.ty", &doc).value(),
            Some(&json!("fl"))
        );
        assert_eq!(resolve("0", &doc).value(), Some(&json!("numeric key")));
    }

    #[test]
    fn empty_path_is_root() {
        let doc = doc();
        assert_eq!(resolve("", &doc), Resolved::Found(&doc));
    }

    #[test]
    fn misses_are_empty_not_errors() {
        let doc = doc();
        assert!(resolve("layers.99.shapes.0", &doc).is_empty());
        assert!(resolve("layers.0.nm.length", &doc).is_empty());
        assert!(resolve("layers.x", &doc).is_empty());
        assert!(resolve("layers..0", &doc).is_empty());
    }

    #[test]
    fn only_canonical_indices_address_arrays() {
        let doc = json!({ "items": ["a", "b"] });
        assert_eq!(resolve("items.1", &doc).value(), Some(&json!("b")));
        assert!(resolve("items.+1", &doc).is_empty());
        assert!(resolve("items.01", &doc).is_empty());
        let mut doc = doc;
        assert!(resolve_mut("items.01", &mut doc).is_none());
    }

    #[test]
    fn empty_short_circuits() {
        assert!(Resolved::Empty.get("anything").is_empty());
    }

    #[test]
    fn resolve_mut_writes_through() {
        let mut doc = doc();
        *resolve_mut("layers.0.nm", &mut doc).unwrap() = json!("b");
        assert_eq!(doc["layers"][0]["nm"], json!("b"));
        assert!(resolve_mut("layers.3.nm", &mut doc).is_none());
    }

    #[test]
    fn join_handles_empty_base() {
        assert_eq!(join("", "layers"), "layers");
        assert_eq!(join("assets.1", "layers"), "assets.1.layers");
        assert_eq!(join("layers", 4), "layers.4");
    }
}
