//! Represents a parsed JSON array.

use core::fmt::{self, Debug};

use crate::access::AccessError;
use crate::value::Value;

/// A JSON array: an ordered sequence of values.
///
/// Equality is element-wise and positional.
///
/// # Examples
/// ```
/// use decjson::{from_str, Array, Value};
///
/// let value: Value = from_str(r#"[1, true, "x"]"#).unwrap();
/// let arr: &Array = value.as_array().unwrap();
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.get(1).unwrap(), &true);
/// assert!(arr.get(9).is_none());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Array {
    vec: Vec<Value>,
}

impl Array {
    /// Create a new empty array.
    #[inline]
    pub fn new() -> Self {
        Array { vec: Vec::new() }
    }

    /// Create a new empty array with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            vec: Vec::with_capacity(capacity),
        }
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns true if the array has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Remove all elements, keeping the allocated memory.
    #[inline]
    pub fn clear(&mut self) {
        self.vec.clear();
    }

    /// Returns a reference to the element at `index`, if in bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.vec.get(index)
    }

    /// Returns a mutable reference to the element at `index`, if in bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.vec.get_mut(index)
    }

    /// The first element.
    #[inline]
    pub fn first(&self) -> Option<&Value> {
        self.vec.first()
    }

    /// The last element.
    #[inline]
    pub fn last(&self) -> Option<&Value> {
        self.vec.last()
    }

    /// Append an element.
    #[inline]
    pub fn push(&mut self, value: impl Into<Value>) {
        self.vec.push(value.into());
    }

    /// Remove and return the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.vec.pop()
    }

    /// Insert an element at `index`, shifting later elements right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        self.vec.insert(index, value.into());
    }

    /// Remove and return the element at `index`, shifting later elements
    /// left.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Value {
        self.vec.remove(index)
    }

    /// Iterate the elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.vec.iter()
    }

    /// Iterate the elements mutably.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Value> {
        self.vec.iter_mut()
    }

    /// Run `access` on the element at `index`, prefixing `[index]` onto the
    /// path of any error the closure reports.
    ///
    /// An out-of-bounds index is presented to the closure as `null`, so
    /// required accessors fail and optional ones yield `None`.
    pub fn at<'v, T, F>(&'v self, index: usize, access: F) -> Result<T, AccessError>
    where
        F: FnOnce(&'v Value) -> Result<T, AccessError>,
    {
        static NULL: Value = Value::Null;
        let value = self.get(index).unwrap_or(&NULL);
        access(value).map_err(|e| e.with_index(index))
    }

    /// Transform every element, pushing the element's index onto the path
    /// of any error the transform reports.
    ///
    /// # Examples
    /// ```
    /// use decjson::{from_str, Value};
    ///
    /// let value: Value = from_str(r#"[1, 2, "three"]"#).unwrap();
    /// let arr = value.get_array().unwrap();
    ///
    /// let err = arr.try_map(|v| v.get_i64()).unwrap_err();
    /// assert_eq!(err.path(), Some("[2]"));
    ///
    /// let value: Value = from_str("[1, 2, 3]").unwrap();
    /// let doubled = value.get_array().unwrap().try_map(|v| Ok(v.get_i64()? * 2)).unwrap();
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    pub fn try_map<T, F>(&self, mut transform: F) -> Result<Vec<T>, AccessError>
    where
        F: FnMut(&Value) -> Result<T, AccessError>,
    {
        self.vec
            .iter()
            .enumerate()
            .map(|(i, v)| transform(v).map_err(|e| e.with_index(i)))
            .collect()
    }

    /// Transform every element, dropping `None` results. Errors have the
    /// element's index pushed onto their path.
    pub fn try_filter_map<T, F>(&self, mut transform: F) -> Result<Vec<T>, AccessError>
    where
        F: FnMut(&Value) -> Result<Option<T>, AccessError>,
    {
        let mut out = Vec::with_capacity(self.len());
        for (i, v) in self.vec.iter().enumerate() {
            if let Some(item) = transform(v).map_err(|e| e.with_index(i))? {
                out.push(item);
            }
        }
        Ok(out)
    }

    /// Transform every element into a sequence and concatenate the results.
    /// Errors have the element's index pushed onto their path.
    pub fn try_flat_map<T, I, F>(&self, mut transform: F) -> Result<Vec<T>, AccessError>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&Value) -> Result<I, AccessError>,
    {
        let mut out = Vec::with_capacity(self.len());
        for (i, v) in self.vec.iter().enumerate() {
            out.extend(transform(v).map_err(|e| e.with_index(i))?);
        }
        Ok(out)
    }

    /// Visit every element. Errors have the element's index pushed onto
    /// their path.
    pub fn try_for_each<F>(&self, mut visit: F) -> Result<(), AccessError>
    where
        F: FnMut(&Value) -> Result<(), AccessError>,
    {
        for (i, v) in self.vec.iter().enumerate() {
            visit(v).map_err(|e| e.with_index(i))?;
        }
        Ok(())
    }
}

impl Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl From<Vec<Value>> for Array {
    fn from(vec: Vec<Value>) -> Self {
        Array { vec }
    }
}

impl<T: Into<Value>> FromIterator<T> for Array {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array {
            vec: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Value>> Extend<T> for Array {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.vec.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_push_and_index_order() {
        let mut arr = Array::new();
        arr.push(1i64);
        arr.push("two");
        arr.push(true);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0).unwrap(), &1i64);
        assert_eq!(arr.get(1).unwrap(), &"two");
        assert_eq!(arr.get(2).unwrap(), &true);
    }

    #[test]
    fn test_positional_equality() {
        let a: Array = [1i64, 2].into_iter().collect();
        let b: Array = [2i64, 1].into_iter().collect();
        assert_ne!(a, b);
        let c: Array = [1i64, 2].into_iter().collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_try_filter_map_drops_none() {
        let arr: Array = [1i64, 2, 3, 4].into_iter().collect();
        let evens = arr
            .try_filter_map(|v| {
                let n = v.get_i64()?;
                Ok((n % 2 == 0).then_some(n))
            })
            .unwrap();
        assert_eq!(evens, [2, 4]);
    }

    #[test]
    fn test_try_flat_map_concatenates() {
        let arr: Array = [1i64, 2].into_iter().collect();
        let out = arr.try_flat_map(|v| Ok(vec![v.get_i64()?, 0])).unwrap();
        assert_eq!(out, [1, 0, 2, 0]);
    }

    #[test]
    fn test_try_for_each_prefixes_index() {
        let arr: Array = [1i64].into_iter().collect();
        let err = arr.try_for_each(|v| v.get_str().map(drop)).unwrap_err();
        assert_eq!(err.path(), Some("[0]"));
    }
}
