//! The decoded value tree.
//!
//! Scalars keep their source text where the launcher only ever compares text:
//! numbers stay as the raw literal (`Number("1.0")` is not `Number("1")`), and
//! unquoted words the decoder does not recognize are kept as [`JsonValue::Literal`]
//! instead of being rejected.

use std::collections::HashMap;
use std::fmt;

/// A decoded JSON value. Mirrors JSON types, plus `Literal` for unquoted text
/// that is neither a keyword nor a number.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// Raw number text, exactly as it appeared in the document.
    Number(String),
    String(String),
    /// Any other unquoted scalar (`undefined`, `NaN`, a truncated `tru`, ...).
    Literal(String),
    Array(Vec<JsonValue>),
    Object(Object),
}

/// Shape of a [`JsonValue`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Literal,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Literal => "literal",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl JsonValue {
    pub fn kind(&self) -> Kind {
        match self {
            JsonValue::Null => Kind::Null,
            JsonValue::Bool(_) => Kind::Bool,
            JsonValue::Number(_) => Kind::Number,
            JsonValue::String(_) => Kind::String,
            JsonValue::Literal(_) => Kind::Literal,
            JsonValue::Array(_) => Kind::Array,
            JsonValue::Object(_) => Kind::Object,
        }
    }

    /// Look up a key. `None` if this is not an object or the key is absent.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Index into an array. `None` if this is not an array or `i` is out of range.
    pub fn index(&self, i: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(items) => items.get(i),
            _ => None,
        }
    }

    /// Follow a dot-separated path such as `"downloads.artifact.url"` or `"a.0.b"`.
    ///
    /// Each segment selects an object key; on arrays a segment is parsed as a
    /// decimal index. Any miss along the way yields `None`. The empty path
    /// returns `self`.
    pub fn path(&self, path: &str) -> Option<&JsonValue> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// The text of a `String` value only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual view of any scalar, for comparisons like `id == version`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) | JsonValue::Number(s) | JsonValue::Literal(s) => Some(s),
            JsonValue::Bool(true) => Some("true"),
            JsonValue::Bool(false) => Some("false"),
            JsonValue::Null => Some("null"),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            JsonValue::Number(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Convert into a `serde_json::Value` for pretty-printing or interop.
    ///
    /// A `Number` whose text is not a valid `serde_json::Number` and every
    /// `Literal` become JSON strings, so the conversion never fails.
    pub fn to_serde(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.parse::<serde_json::Number>() {
                Ok(num) => Value::Number(num),
                Err(_) => Value::String(n.clone()),
            },
            JsonValue::String(s) | JsonValue::Literal(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(JsonValue::to_serde).collect()),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), v.to_serde()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for JsonValue {
    /// Compact text in the decoder's own scalar convention (see [`crate::encode`]).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encoder::encode(self))
    }
}

/// String-keyed mapping with unique keys. Keeps insertion order for
/// re-serialization; equality and lookup ignore order.
///
/// Uses `Vec<(String, JsonValue)>` rather than a hash map: manifest objects are
/// small, and lookups by key are rare compared to whole-tree walks.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: Vec<(String, JsonValue)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. An existing key keeps its position and has its value
    /// replaced; the old value is returned.
    ///
    /// The duplicate check is a linear scan, so building a large object by
    /// repeated `insert` is quadratic. Collecting from an iterator is linear.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn entries(&self) -> &[(String, JsonValue)] {
        &self.entries
    }
}

/// Accumulates entries with the same semantics as [`Object::insert`], using
/// a key index so duplicates are found in constant time.
#[derive(Debug, Default)]
pub(crate) struct ObjectBuilder {
    entries: Vec<(String, JsonValue)>,
    positions: HashMap<String, usize>,
}

impl ObjectBuilder {
    pub(crate) fn insert(&mut self, key: String, value: JsonValue) {
        match self.positions.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub(crate) fn finish(self) -> Object {
        Object {
            entries: self.entries,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(String, JsonValue)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        let mut builder = ObjectBuilder::default();
        for (k, v) in iter {
            builder.insert(k, v);
        }
        builder.finish()
    }
}

impl IntoIterator for Object {
    type Item = (String, JsonValue);
    type IntoIter = std::vec::IntoIter<(String, JsonValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Object::new();
        map.insert("a", JsonValue::Number("1".into()));
        map.insert("b", JsonValue::Number("2".into()));
        let old = map.insert("a", JsonValue::Number("3".into()));
        assert_eq!(old, Some(JsonValue::Number("1".into())));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(&JsonValue::Number("3".into())));
    }

    #[test]
    fn equality_ignores_order() {
        let a: Object = [
            ("x".to_string(), JsonValue::Null),
            ("y".to_string(), JsonValue::Bool(true)),
        ]
        .into_iter()
        .collect();
        let b: Object = [
            ("y".to_string(), JsonValue::Bool(true)),
            ("x".to_string(), JsonValue::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn collect_keeps_first_position_and_last_value() {
        let map: Object = [
            ("a".to_string(), JsonValue::Number("1".into())),
            ("b".to_string(), JsonValue::Null),
            ("a".to_string(), JsonValue::Number("2".into())),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(&JsonValue::Number("2".into())));
    }

    #[test]
    fn typed_accessors() {
        let items = JsonValue::Array(vec![
            JsonValue::Bool(true),
            JsonValue::Number("-2.5e1".into()),
            JsonValue::Null,
        ]);
        assert_eq!(items.index(0).and_then(JsonValue::as_bool), Some(true));
        assert_eq!(items.index(1).and_then(JsonValue::as_f64), Some(-25.0));
        assert!(items.index(2).is_some_and(JsonValue::is_null));
        assert_eq!(items.index(3), None);
        assert_eq!(JsonValue::Null.index(0), None);

        assert_eq!(JsonValue::Number("1".into()).as_bool(), None);
        assert_eq!(JsonValue::Literal("NaN".into()).as_f64(), None);
        assert!(!JsonValue::Literal("null".into()).is_null());
    }

    #[test]
    fn as_text_covers_every_scalar() {
        assert_eq!(JsonValue::Null.as_text(), Some("null"));
        assert_eq!(JsonValue::Bool(false).as_text(), Some("false"));
        assert_eq!(JsonValue::Number("1.5".into()).as_text(), Some("1.5"));
        assert_eq!(JsonValue::Literal("NaN".into()).as_text(), Some("NaN"));
        assert_eq!(JsonValue::Array(vec![]).as_text(), None);
    }
}
