//! Typed accessors over [`Value`], [`Object`] and [`Array`].
//!
//! Two families exist for every category. The get-family performs a strict
//! category check (the three number representations count as one category).
//! The to-family additionally coerces: numbers and booleans stringify,
//! strings parse as numbers, doubles and decimals truncate toward zero when
//! an integer is requested. Every accessor comes in a required shape, which
//! errors on `null` and absence, and an optional `_opt` shape, which yields
//! `None` instead.

use faststr::FastStr;

use crate::access::{AccessError, Expected};
use crate::decimal::Decimal;
use crate::value::{Array, JsonType, Object, Value};

/// 2^63 as a double; the smallest double no longer representable as `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn f64_to_i64(value: f64, target: &'static str) -> Result<i64, AccessError> {
    // Truncation toward zero; `as` would saturate silently, so range-check
    // first. The lower bound is exact and inclusive, the upper exclusive.
    if value.is_finite() && value >= -I64_BOUND && value < I64_BOUND {
        Ok(value as i64)
    } else {
        Err(AccessError::out_of_range_f64(value, target))
    }
}

fn decimal_to_i64(value: &Decimal, target: &'static str) -> Result<i64, AccessError> {
    value
        .to_i64()
        .ok_or_else(|| AccessError::out_of_range_decimal(value.clone(), target))
}

fn narrow_to_isize(value: i64) -> Result<isize, AccessError> {
    isize::try_from(value).map_err(|_| AccessError::out_of_range_i64(value, "isize"))
}

fn nonfinite_text(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

impl Value {
    fn mismatch(&self, expected: Expected) -> AccessError {
        AccessError::type_mismatch(expected, self.json_type())
    }

    fn bool_with(&self, expected: Expected) -> Result<bool, AccessError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(expected)),
        }
    }

    fn str_with(&self, expected: Expected) -> Result<&str, AccessError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(expected)),
        }
    }

    fn i64_with(&self, expected: Expected) -> Result<i64, AccessError> {
        match self {
            Value::Int64(v) => Ok(*v),
            Value::Double(d) => f64_to_i64(*d, "i64"),
            Value::Decimal(d) => decimal_to_i64(d, "i64"),
            other => Err(other.mismatch(expected)),
        }
    }

    fn f64_with(&self, expected: Expected) -> Result<f64, AccessError> {
        match self {
            Value::Int64(v) => Ok(*v as f64),
            Value::Double(d) => Ok(*d),
            Value::Decimal(d) => Ok(d.to_f64()),
            other => Err(other.mismatch(expected)),
        }
    }

    fn decimal_with(&self, expected: Expected) -> Result<Decimal, AccessError> {
        match self {
            Value::Decimal(d) => Ok(d.clone()),
            Value::Int64(v) => Ok(Decimal::from(*v)),
            Value::Double(d) => {
                Decimal::from_f64(*d).ok_or_else(|| AccessError::out_of_range_f64(*d, "decimal"))
            }
            other => Err(other.mismatch(expected)),
        }
    }

    fn object_with(&self, expected: Expected) -> Result<&Object, AccessError> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(expected)),
        }
    }

    fn array_with(&self, expected: Expected) -> Result<&Array, AccessError> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(expected)),
        }
    }

    /// Strictly typed access: `Bool` only.
    pub fn get_bool(&self) -> Result<bool, AccessError> {
        self.bool_with(Expected::required(JsonType::Bool))
    }

    /// Optional shape of [`get_bool`](Value::get_bool): `null` yields `None`.
    pub fn get_bool_opt(&self) -> Result<Option<bool>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.bool_with(Expected::optional(JsonType::Bool)).map(Some)
    }

    /// Strictly typed access: `String` only.
    pub fn get_str(&self) -> Result<&str, AccessError> {
        self.str_with(Expected::required(JsonType::String))
    }

    /// Optional shape of [`get_str`](Value::get_str).
    pub fn get_str_opt(&self) -> Result<Option<&str>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.str_with(Expected::optional(JsonType::String)).map(Some)
    }

    /// Number access as `i64`.
    ///
    /// `Int64` passes through. A `Double` or `Decimal` converts iff finite
    /// and within the `i64` range, truncating toward zero.
    pub fn get_i64(&self) -> Result<i64, AccessError> {
        self.i64_with(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`get_i64`](Value::get_i64).
    pub fn get_i64_opt(&self) -> Result<Option<i64>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.i64_with(Expected::optional(JsonType::Number)).map(Some)
    }

    /// Number access narrowed to the platform integer width.
    pub fn get_int(&self) -> Result<isize, AccessError> {
        self.get_i64().and_then(narrow_to_isize)
    }

    /// Optional shape of [`get_int`](Value::get_int).
    pub fn get_int_opt(&self) -> Result<Option<isize>, AccessError> {
        match self.get_i64_opt()? {
            Some(v) => narrow_to_isize(v).map(Some),
            None => Ok(None),
        }
    }

    /// Number access as `f64`.
    ///
    /// `Int64` and `Decimal` convert to the nearest representable double;
    /// `Double` passes through.
    pub fn get_f64(&self) -> Result<f64, AccessError> {
        self.f64_with(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`get_f64`](Value::get_f64).
    pub fn get_f64_opt(&self) -> Result<Option<f64>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.f64_with(Expected::optional(JsonType::Number)).map(Some)
    }

    /// Number access as [`Decimal`]. A `Double` converts through its
    /// shortest round-trip form; NaN and the infinities are out of range.
    pub fn get_decimal(&self) -> Result<Decimal, AccessError> {
        self.decimal_with(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`get_decimal`](Value::get_decimal).
    pub fn get_decimal_opt(&self) -> Result<Option<Decimal>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.decimal_with(Expected::optional(JsonType::Number))
            .map(Some)
    }

    /// Strictly typed access: `Object` only.
    pub fn get_object(&self) -> Result<&Object, AccessError> {
        self.object_with(Expected::required(JsonType::Object))
    }

    /// Optional shape of [`get_object`](Value::get_object).
    pub fn get_object_opt(&self) -> Result<Option<&Object>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.object_with(Expected::optional(JsonType::Object))
            .map(Some)
    }

    /// Strictly typed access: `Array` only.
    pub fn get_array(&self) -> Result<&Array, AccessError> {
        self.array_with(Expected::required(JsonType::Array))
    }

    /// Optional shape of [`get_array`](Value::get_array).
    pub fn get_array_opt(&self) -> Result<Option<&Array>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.array_with(Expected::optional(JsonType::Array)).map(Some)
    }

    fn text_coerced(&self, expected: Expected) -> Result<FastStr, AccessError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Bool(true) => Ok(FastStr::new("true")),
            Value::Bool(false) => Ok(FastStr::new("false")),
            Value::Int64(v) => Ok(FastStr::new(itoa::Buffer::new().format(*v))),
            Value::Double(d) if d.is_finite() => {
                Ok(FastStr::new(ryu::Buffer::new().format_finite(*d)))
            }
            Value::Double(d) => Ok(FastStr::new(nonfinite_text(*d))),
            Value::Decimal(d) => Ok(FastStr::new(d.to_string())),
            other => Err(other.mismatch(expected)),
        }
    }

    /// Coercing stringification.
    ///
    /// A `String` passes through; booleans and numbers stringify in their
    /// canonical forms; `null` yields the literal `"null"`. Objects and
    /// arrays error.
    ///
    /// # Examples
    /// ```
    /// use decjson::{json, Value};
    ///
    /// assert_eq!(json!(1.5).to_text().unwrap(), "1.5");
    /// assert_eq!(json!(true).to_text().unwrap(), "true");
    /// assert_eq!(json!(null).to_text().unwrap(), "null");
    /// assert_eq!(json!(null).to_text_opt().unwrap(), None);
    /// assert!(json!([1]).to_text().is_err());
    /// ```
    pub fn to_text(&self) -> Result<FastStr, AccessError> {
        if self.is_null() {
            return Ok(FastStr::new("null"));
        }
        self.text_coerced(Expected::required(JsonType::String))
    }

    /// Optional shape of [`to_text`](Value::to_text): `null` yields `None`.
    pub fn to_text_opt(&self) -> Result<Option<FastStr>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.text_coerced(Expected::optional(JsonType::String))
            .map(Some)
    }

    fn i64_coerced(&self, expected: Expected) -> Result<i64, AccessError> {
        match self {
            Value::String(s) => match s.parse::<i64>() {
                Ok(v) => Ok(v),
                Err(_) => match s.parse::<f64>() {
                    Ok(d) => f64_to_i64(d, "i64"),
                    Err(_) => Err(self.mismatch(expected)),
                },
            },
            other => other.i64_with(expected),
        }
    }

    /// Coercing access as `i64`.
    ///
    /// In addition to the [`get_i64`](Value::get_i64) conversions, a
    /// `String` parses as a base-10 integer first, falling through to the
    /// double grammar (so `"1e3"` converts and
    /// `"18446744073709551616"` reports an out-of-range double).
    pub fn to_i64(&self) -> Result<i64, AccessError> {
        self.i64_coerced(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`to_i64`](Value::to_i64).
    pub fn to_i64_opt(&self) -> Result<Option<i64>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.i64_coerced(Expected::optional(JsonType::Number))
            .map(Some)
    }

    /// Coercing access narrowed to the platform integer width.
    pub fn to_int(&self) -> Result<isize, AccessError> {
        self.to_i64().and_then(narrow_to_isize)
    }

    /// Optional shape of [`to_int`](Value::to_int).
    pub fn to_int_opt(&self) -> Result<Option<isize>, AccessError> {
        match self.to_i64_opt()? {
            Some(v) => narrow_to_isize(v).map(Some),
            None => Ok(None),
        }
    }

    fn f64_coerced(&self, expected: Expected) -> Result<f64, AccessError> {
        match self {
            Value::String(s) => s.parse::<f64>().map_err(|_| self.mismatch(expected)),
            other => other.f64_with(expected),
        }
    }

    /// Coercing access as `f64`; a `String` parses with the standard
    /// floating-point grammar.
    pub fn to_f64(&self) -> Result<f64, AccessError> {
        self.f64_coerced(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`to_f64`](Value::to_f64).
    pub fn to_f64_opt(&self) -> Result<Option<f64>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.f64_coerced(Expected::optional(JsonType::Number))
            .map(Some)
    }

    fn decimal_coerced(&self, expected: Expected) -> Result<Decimal, AccessError> {
        match self {
            Value::String(s) => Decimal::parse(s).map_err(|_| self.mismatch(expected)),
            other => other.decimal_with(expected),
        }
    }

    /// Coercing access as [`Decimal`]; a `String` parses with the decimal
    /// grammar.
    pub fn to_decimal(&self) -> Result<Decimal, AccessError> {
        self.decimal_coerced(Expected::required(JsonType::Number))
    }

    /// Optional shape of [`to_decimal`](Value::to_decimal).
    pub fn to_decimal_opt(&self) -> Result<Option<Decimal>, AccessError> {
        if self.is_null() {
            return Ok(None);
        }
        self.decimal_coerced(Expected::optional(JsonType::Number))
            .map(Some)
    }

    /// Coercing access as `bool`. No coercion applies beyond the strict
    /// check; present for matrix completeness.
    pub fn to_bool(&self) -> Result<bool, AccessError> {
        self.get_bool()
    }

    /// Optional shape of [`to_bool`](Value::to_bool).
    pub fn to_bool_opt(&self) -> Result<Option<bool>, AccessError> {
        self.get_bool_opt()
    }
}

macro_rules! keyed_required {
    ($($name:ident => $delegate:ident -> $ret:ty, $cat:expr;)*) => {
        impl Object {$(
            #[doc = concat!(
                "Look up `key` and delegate to [`Value::", stringify!($delegate),
                "`], prefixing the key onto the path of any error. A missing key is an error.",
            )]
            pub fn $name(&self, key: &str) -> Result<$ret, AccessError> {
                match self.get(key) {
                    Some(value) => value.$delegate().map_err(|e| e.with_key(key)),
                    None => Err(AccessError::missing(Expected::required($cat)).with_key(key)),
                }
            }
        )*}
    };
}

macro_rules! keyed_optional {
    ($($name:ident => $delegate:ident -> $ret:ty;)*) => {
        impl Object {$(
            #[doc = concat!(
                "Look up `key` and delegate to [`Value::", stringify!($delegate),
                "`], prefixing the key onto the path of any error. A missing key yields `None`.",
            )]
            pub fn $name(&self, key: &str) -> Result<Option<$ret>, AccessError> {
                match self.get(key) {
                    Some(value) => value.$delegate().map_err(|e| e.with_key(key)),
                    None => Ok(None),
                }
            }
        )*}
    };
}

macro_rules! indexed_required {
    ($($name:ident => $delegate:ident -> $ret:ty, $cat:expr;)*) => {
        impl Array {$(
            #[doc = concat!(
                "Delegate to [`Value::", stringify!($delegate),
                "`] at `index`, prefixing `[index]` onto the path of any error. ",
                "An out-of-bounds index is an error.",
            )]
            pub fn $name(&self, index: usize) -> Result<$ret, AccessError> {
                match self.get(index) {
                    Some(value) => value.$delegate().map_err(|e| e.with_index(index)),
                    None => Err(AccessError::missing(Expected::required($cat)).with_index(index)),
                }
            }
        )*}
    };
}

macro_rules! indexed_optional {
    ($($name:ident => $delegate:ident -> $ret:ty;)*) => {
        impl Array {$(
            #[doc = concat!(
                "Delegate to [`Value::", stringify!($delegate),
                "`] at `index`, prefixing `[index]` onto the path of any error. ",
                "An out-of-bounds index yields `None`.",
            )]
            pub fn $name(&self, index: usize) -> Result<Option<$ret>, AccessError> {
                match self.get(index) {
                    Some(value) => value.$delegate().map_err(|e| e.with_index(index)),
                    None => Ok(None),
                }
            }
        )*}
    };
}

keyed_required! {
    get_bool => get_bool -> bool, JsonType::Bool;
    get_str => get_str -> &str, JsonType::String;
    get_i64 => get_i64 -> i64, JsonType::Number;
    get_int => get_int -> isize, JsonType::Number;
    get_f64 => get_f64 -> f64, JsonType::Number;
    get_decimal => get_decimal -> Decimal, JsonType::Number;
    get_object => get_object -> &Object, JsonType::Object;
    get_array => get_array -> &Array, JsonType::Array;
    to_text => to_text -> FastStr, JsonType::String;
    to_bool => to_bool -> bool, JsonType::Bool;
    to_i64 => to_i64 -> i64, JsonType::Number;
    to_int => to_int -> isize, JsonType::Number;
    to_f64 => to_f64 -> f64, JsonType::Number;
    to_decimal => to_decimal -> Decimal, JsonType::Number;
}

keyed_optional! {
    get_bool_opt => get_bool_opt -> bool;
    get_str_opt => get_str_opt -> &str;
    get_i64_opt => get_i64_opt -> i64;
    get_int_opt => get_int_opt -> isize;
    get_f64_opt => get_f64_opt -> f64;
    get_decimal_opt => get_decimal_opt -> Decimal;
    get_object_opt => get_object_opt -> &Object;
    get_array_opt => get_array_opt -> &Array;
    to_text_opt => to_text_opt -> FastStr;
    to_bool_opt => to_bool_opt -> bool;
    to_i64_opt => to_i64_opt -> i64;
    to_int_opt => to_int_opt -> isize;
    to_f64_opt => to_f64_opt -> f64;
    to_decimal_opt => to_decimal_opt -> Decimal;
}

indexed_required! {
    get_bool => get_bool -> bool, JsonType::Bool;
    get_str => get_str -> &str, JsonType::String;
    get_i64 => get_i64 -> i64, JsonType::Number;
    get_int => get_int -> isize, JsonType::Number;
    get_f64 => get_f64 -> f64, JsonType::Number;
    get_decimal => get_decimal -> Decimal, JsonType::Number;
    get_object => get_object -> &Object, JsonType::Object;
    get_array => get_array -> &Array, JsonType::Array;
    to_text => to_text -> FastStr, JsonType::String;
    to_bool => to_bool -> bool, JsonType::Bool;
    to_i64 => to_i64 -> i64, JsonType::Number;
    to_int => to_int -> isize, JsonType::Number;
    to_f64 => to_f64 -> f64, JsonType::Number;
    to_decimal => to_decimal -> Decimal, JsonType::Number;
}

indexed_optional! {
    get_bool_opt => get_bool_opt -> bool;
    get_str_opt => get_str_opt -> &str;
    get_i64_opt => get_i64_opt -> i64;
    get_int_opt => get_int_opt -> isize;
    get_f64_opt => get_f64_opt -> f64;
    get_decimal_opt => get_decimal_opt -> Decimal;
    get_object_opt => get_object_opt -> &Object;
    get_array_opt => get_array_opt -> &Array;
    to_text_opt => to_text_opt -> FastStr;
    to_bool_opt => to_bool_opt -> bool;
    to_i64_opt => to_i64_opt -> i64;
    to_int_opt => to_int_opt -> isize;
    to_f64_opt => to_f64_opt -> f64;
    to_decimal_opt => to_decimal_opt -> Decimal;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::access::AccessErrorKind;
    use crate::de::from_str;

    fn value(json: &str) -> Value {
        from_str(json).unwrap()
    }

    #[test]
    fn test_get_family_is_category_strict() {
        assert_eq!(value("true").get_bool().unwrap(), true);
        assert_eq!(value(r#""x""#).get_str().unwrap(), "x");
        assert!(value("1").get_str().is_err());
        assert!(value(r#""1""#).get_i64().is_err());
        assert!(value("{}").get_array().is_err());
    }

    #[test]
    fn test_number_representations_share_a_category() {
        assert_eq!(value("7").get_i64().unwrap(), 7);
        assert_eq!(value("7.0").get_i64().unwrap(), 7);
        assert_eq!(value("7.9").get_i64().unwrap(), 7);
        assert_eq!(value("-7.9").get_i64().unwrap(), -7);
        assert_eq!(value("7").get_f64().unwrap(), 7.0);
        assert_eq!(value("7").get_decimal().unwrap(), Decimal::from(7));
    }

    #[test]
    fn test_optional_equals_required_on_non_null() {
        let v = value(r#"{"a": 1, "s": "x"}"#);
        let obj = v.get_object().unwrap();
        assert_eq!(obj.get_i64("a").unwrap(), obj.get_i64_opt("a").unwrap().unwrap());
        assert_eq!(obj.get_str("s").unwrap(), obj.get_str_opt("s").unwrap().unwrap());
    }

    #[test]
    fn test_optional_yields_none_on_null_and_missing() {
        let v = value(r#"{"n": null}"#);
        let obj = v.get_object().unwrap();
        assert_eq!(obj.get_bool_opt("n").unwrap(), None);
        assert_eq!(obj.get_bool_opt("missing").unwrap(), None);
        assert!(obj.get_bool("missing").is_err());

        let v = value("[]");
        let arr = v.get_array().unwrap();
        assert_eq!(arr.get_i64_opt(5).unwrap(), None);
        assert!(arr.get_i64(5).is_err());
    }

    #[test]
    fn test_string_to_i64_falls_through_double_grammar() {
        assert_eq!(value(r#""42""#).to_i64().unwrap(), 42);
        assert_eq!(value(r#""1e3""#).to_i64().unwrap(), 1000);
        let err = value(r#""18446744073709551616""#).to_i64().unwrap_err();
        assert!(matches!(
            err.kind(),
            AccessErrorKind::OutOfRangeDouble { target: "i64", .. }
        ));
    }

    #[test]
    fn test_double_out_of_i64_range() {
        let err = value("1e300").get_i64().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::OutOfRangeDouble { .. }));
        // The exclusive upper bound: 2^63 itself does not fit.
        assert!(f64_to_i64(I64_BOUND, "i64").is_err());
        assert_eq!(f64_to_i64(-I64_BOUND, "i64").unwrap(), i64::MIN);
    }

    #[test]
    fn test_decimal_out_of_i64_range() {
        let cfg = crate::ParseCfg::new().with_use_decimals(true);
        let v = crate::de::from_str_with("9223372036854775808", cfg).unwrap();
        let err = v.get_i64().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::OutOfRangeDecimal { .. }));
    }

    #[test]
    fn test_narrowing_to_int() {
        assert_eq!(value("5").get_int().unwrap(), 5isize);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(value("9223372036854775807").get_int().unwrap(), isize::MAX);
    }

    #[test]
    fn test_error_path_concatenates_lookups() {
        let root = value(r#"{"user": {"tags": ["a", "b", 7]}}"#);
        let obj = root.get_object().unwrap();
        let err = obj
            .at("user", |user| {
                user.get_object()?.at("tags", |tags| {
                    tags.get_array()?.at(2, |tag| tag.get_str().map(str::to_owned))
                })
            })
            .unwrap_err();
        assert_eq!(err.path(), Some("user.tags[2]"));
        assert_eq!(err.to_string(), "user.tags[2]: expected string, found number");
        assert!(matches!(
            err.kind(),
            AccessErrorKind::MissingOrInvalidType {
                actual: Some(JsonType::Number),
                ..
            }
        ));
    }

    #[test]
    fn test_keyed_accessors_prefix_one_hop() {
        let root = value(r#"{"port": "eighty"}"#);
        let obj = root.get_object().unwrap();
        let err = obj.to_i64("port").unwrap_err();
        assert_eq!(err.path(), Some("port"));

        let err = obj.get_i64("missing").unwrap_err();
        assert_eq!(err.path(), Some("missing"));
        assert!(matches!(
            err.kind(),
            AccessErrorKind::MissingOrInvalidType { actual: None, .. }
        ));
    }

    #[test]
    fn test_to_text_matrix() {
        assert_eq!(value("150").to_text().unwrap(), "150");
        assert_eq!(value("false").to_text().unwrap(), "false");
        assert_eq!(value(r#""s""#).to_text().unwrap(), "s");
        assert!(value("{}").to_text().is_err());
        assert!(value("[]").to_text_opt().is_err());
    }
}
