//! Conversions into [`Value`].

use faststr::FastStr;

use crate::decimal::Decimal;
use crate::value::{Array, Object, Value};

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Int64(value as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Double(value as f64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(FastStr::new(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(FastStr::from(value))
    }
}

impl From<FastStr> for Value {
    #[inline]
    fn from(value: FastStr) -> Self {
        Value::String(value)
    }
}

impl From<Decimal> for Value {
    #[inline]
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<Object> for Value {
    #[inline]
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    #[inline]
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `null`.
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(Value::from(3u16), Value::Int64(3));
        assert_eq!(Value::from(-3i64), Value::Int64(-3));
        assert_eq!(Value::from(1.5f64), Value::Double(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("x"), Value::String(FastStr::new("x")));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2i64)), Value::Int64(2));
    }

    #[test]
    fn test_collect_into_array_value() {
        let value: Value = (1i64..=3).collect();
        assert_eq!(value, Value::Array([1i64, 2, 3].into_iter().collect()));
    }
}
