//! Square-bracket indexing into values.

use faststr::FastStr;

use crate::value::{Array, Object, Value};

mod private {
    pub trait Sealed {}

    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for faststr::FastStr {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// An indexing trait for JSON, implemented for `usize` and string types.
/// Sealed; cannot be implemented outside of decjson.
pub trait Index: private::Sealed {
    /// Return None if the index is not already in the array or object.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;

    /// Return None if the index is not already in the array or object.
    #[doc(hidden)]
    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value>;

    /// Panic if the array index is out of bounds. If the key is not already
    /// in the object, insert it with a value of null. Panic on a value that
    /// cannot be indexed into, except that null is treated as an empty
    /// object by string indices.
    #[doc(hidden)]
    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value;
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        v.as_array().and_then(|a| a.get(*self))
    }

    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        v.as_array_mut().and_then(|a| a.get_mut(*self))
    }

    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        let typ = v.json_type();
        let array = v
            .as_array_mut()
            .unwrap_or_else(|| panic!("cannot access index in non-array value type {typ}"));
        let len = array.len();
        array
            .get_mut(*self)
            .unwrap_or_else(|| panic!("index {self} out of bounds (len: {len})"))
    }
}

macro_rules! impl_str_index {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                #[inline]
                fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
                    v.as_object().and_then(|o| o.get(self.as_ref()))
                }

                #[inline]
                fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
                    v.as_object_mut().and_then(|o| o.get_mut(self.as_ref()))
                }

                #[inline]
                fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
                    if v.is_null() {
                        *v = Value::Object(Object::new());
                    }
                    let typ = v.json_type();
                    v.as_object_mut()
                        .unwrap_or_else(|| panic!("cannot access key in non-object value type {typ}"))
                        .entry_or_null(self.as_ref())
                }
            }
        )*
    };
}

impl_str_index!(str, String, FastStr);

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    #[inline]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }

    #[inline]
    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        (**self).index_into_mut(v)
    }

    #[inline]
    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        (**self).index_or_insert(v)
    }
}

impl<I> std::ops::Index<I> for Value
where
    I: Index,
{
    type Output = Value;

    /// Index into an array `Value` with `value[0]` and into an object
    /// `Value` with `value["k"]`.
    ///
    /// Returns a null `Value` if the `Value` type does not match the index,
    /// or the index does not exist in the array or object.
    ///
    /// # Examples
    /// ```
    /// use decjson::json;
    ///
    /// let data = json!({"x": {"y": ["z", "zz"]}});
    ///
    /// assert_eq!(data["x"]["y"][0], "z");
    /// assert_eq!(data["a"], json!(null)); // undefined values are null
    /// assert_eq!(data["a"]["b"], json!(null)); // and do not panic
    /// ```
    #[inline]
    fn index(&self, index: I) -> &Value {
        static NULL: Value = Value::Null;
        index.index_into(self).unwrap_or(&NULL)
    }
}

impl<I: Index> std::ops::IndexMut<I> for Value {
    /// Write into an array with `value[0] = ...` and into an object with
    /// `value["k"] = ...`.
    ///
    /// A numeric index requires an array longer than the index. A string
    /// index requires an object or null (treated as an empty object); an
    /// absent key is inserted with a null value first.
    ///
    /// # Examples
    /// ```
    /// use decjson::json;
    ///
    /// let mut data = json!({ "x": 0 });
    /// data["x"] = json!(1);
    /// data["y"] = json!([1, 2]);
    /// data["y"][0] = json!(true);
    /// data["a"]["b"] = json!("nested");
    ///
    /// assert_eq!(data, json!({"x": 1, "y": [true, 2], "a": {"b": "nested"}}));
    /// ```
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Value {
        index.index_or_insert(self)
    }
}

impl std::ops::Index<usize> for Array {
    type Output = Value;

    /// # Panics
    /// Panics if the index is out of bounds, like `Vec` indexing.
    #[inline]
    fn index(&self, index: usize) -> &Value {
        self.get(index).expect("index out of bounds")
    }
}

impl std::ops::Index<&str> for Object {
    type Output = Value;

    /// # Panics
    /// Panics if the key is absent.
    #[inline]
    fn index(&self, key: &str) -> &Value {
        self.get(key).expect("no entry found for key")
    }
}

#[cfg(test)]
mod test {
    use crate::json;
    use crate::value::Value;

    #[test]
    fn test_read_indexing_defaults_to_null() {
        let data = json!({"a": [1, 2]});
        assert_eq!(data["a"][1], 2i64);
        assert!(data["missing"].is_null());
        assert!(data["a"][9].is_null());
        assert!(data[0].is_null()); // object indexed by number
    }

    #[test]
    fn test_write_indexing_inserts() {
        let mut data = json!({});
        data["a"] = json!(1);
        data["b"]["c"] = json!([2]);
        data["b"]["c"][0] = json!(3);
        assert_eq!(data, json!({"a": 1, "b": {"c": [3]}}));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_write_indexing_panics_past_end() {
        let mut data = json!([1]);
        data[3] = Value::Null;
    }
}
