//! Represents a parsed JSON object.

use core::fmt::{self, Debug};

use faststr::FastStr;
use indexmap::IndexMap;

use crate::access::AccessError;
use crate::value::Value;

/// A JSON object: a mapping from string keys to values.
///
/// Keys are unique; insertion order is preserved for iteration and
/// re-serialization while lookups stay O(1) expected. Equality ignores
/// order: two objects are equal iff they contain the same keys mapped to
/// equal values.
///
/// # Examples
/// ```
/// use decjson::{from_str, Object, Value};
///
/// let value: Value = from_str(r#"{"a": 1, "b": true}"#).unwrap();
/// let obj: &Object = value.as_object().unwrap();
/// assert_eq!(obj.len(), 2);
/// assert_eq!(obj.get("a").unwrap(), &Value::Int64(1));
/// assert!(obj.get("missing").is_none());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Object {
    map: IndexMap<FastStr, Value>,
}

impl Object {
    /// Create a new empty object.
    #[inline]
    pub fn new() -> Self {
        Object {
            map: IndexMap::new(),
        }
    }

    /// Create a new empty object with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Object {
            map: IndexMap::with_capacity(capacity),
        }
    }

    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the object has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all entries, keeping the allocated memory.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    /// Returns the stored key and the value for `key`.
    #[inline]
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Value)> {
        self.map.get_key_value(key).map(|(k, v)| (k.as_ref(), v))
    }

    /// Returns `true` if the object contains the key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was already present the value is replaced in place (the
    /// entry keeps its original position) and the old value is returned.
    ///
    /// # Examples
    /// ```
    /// use decjson::Object;
    ///
    /// let mut obj = Object::new();
    /// assert_eq!(obj.insert("a", 1i64), None);
    /// assert!(obj.insert("a", 2i64).is_some());
    /// assert_eq!(obj.get("a").unwrap(), &2i64);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: impl Into<FastStr>, value: impl Into<Value>) -> Option<Value> {
        self.map.insert(key.into(), value.into())
    }

    /// Removes a key from the object, preserving the order of the
    /// remaining entries, and returns its value.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    /// Iterate the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterate the entries with mutable values, in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.map.iter_mut().map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterate the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(FastStr::as_ref)
    }

    /// Iterate the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.map.values()
    }

    /// Iterate the values mutably, in insertion order.
    #[inline]
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.map.values_mut()
    }

    /// Look up `key` and run `access` on its value, prefixing the key onto
    /// the path of any error the closure reports.
    ///
    /// This is the nesting form of the typed accessors: each `at` call is
    /// one lookup boundary, so a failure deep in the closure surfaces with
    /// the full path from this object. A missing key is presented to the
    /// closure as `null`, so required accessors fail and optional ones
    /// yield `None`.
    ///
    /// # Examples
    /// ```
    /// use decjson::{from_str, Value};
    ///
    /// let root: Value = from_str(r#"{"user": {"tags": [1]}}"#).unwrap();
    /// let err = root
    ///     .get_object()
    ///     .unwrap()
    ///     .at("user", |user| {
    ///         user.get_object()?
    ///             .at("tags", |tags| {
    ///                 tags.get_array()?.at(0, |tag| tag.get_str().map(drop))
    ///             })
    ///     })
    ///     .unwrap_err();
    /// assert_eq!(err.path(), Some("user.tags[0]"));
    /// ```
    pub fn at<'v, T, F>(&'v self, key: &str, access: F) -> Result<T, AccessError>
    where
        F: FnOnce(&'v Value) -> Result<T, AccessError>,
    {
        static NULL: Value = Value::Null;
        let value = self.get(key).unwrap_or(&NULL);
        access(value).map_err(|e| e.with_key(key))
    }

    pub(crate) fn entry_or_null(&mut self, key: &str) -> &mut Value {
        self.map
            .entry(FastStr::from(key.to_owned()))
            .or_insert(Value::Null)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<FastStr>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Object {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Object
where
    K: Into<FastStr>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.map
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Object {
    type Item = (FastStr, Value);
    type IntoIter = indexmap::map::IntoIter<FastStr, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a FastStr, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, FastStr, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut obj = Object::new();
        obj.insert("z", 1i64);
        obj.insert("a", 2i64);
        obj.insert("m", 3i64);
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut obj = Object::new();
        obj.insert("a", 1i64);
        obj.insert("b", 2i64);
        obj.insert("a", 3i64);
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(obj.get("a").unwrap(), &3i64);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: Object = [("x", 1i64), ("y", 2i64)].into_iter().collect();
        let b: Object = [("y", 2i64), ("x", 1i64)].into_iter().collect();
        assert_eq!(a, b);

        let c: Object = [("x", 1i64)].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut obj: Object = [("a", 1i64), ("b", 2i64), ("c", 3i64)].into_iter().collect();
        assert_eq!(obj.remove("b"), Some(Value::Int64(2)));
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }
}
