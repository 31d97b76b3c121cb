//! The JSON value model: [`Value`], [`Object`] and [`Array`].

mod array;
mod from;
mod get;
mod macros;
mod object;
mod partial_eq;

pub use array::Array;
pub use object::Object;

use core::fmt::{self, Display};
use core::str::FromStr;

use faststr::FastStr;

use crate::config::EncodeCfg;
use crate::decimal::Decimal;
use crate::error::{Error, Result};

/// The coarse classification of a JSON value, used for type errors.
///
/// All three number representations (`Int64`, `Double`, `Decimal`) share the
/// `Number` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// The `null` literal.
    Null,
    /// `true` or `false`.
    Bool,
    /// A string.
    String,
    /// Any of the three number representations.
    Number,
    /// An object.
    Object,
    /// An array.
    Array,
}

impl JsonType {
    /// The lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::Array => "array",
        }
    }
}

impl Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON value.
///
/// Numbers keep their source representation: an integer literal that fits
/// signed 64 bits is `Int64`, any other number literal is `Double` by
/// default or [`Decimal`] when parsed with
/// [`use_decimals`](crate::ParseCfg::use_decimals).
///
/// Values are immutable once shared; mutation happens through `&mut`
/// access on [`Object`] and [`Array`] before publication.
///
/// # Examples
/// ```
/// use decjson::{from_str, Value};
///
/// let value: Value = from_str(r#"{"a": 1, "b": [true, null]}"#).unwrap();
/// assert!(value.is_object());
/// assert_eq!(value["a"], 1i64);
/// assert_eq!(value["b"][0], true);
/// assert!(value["b"][1].is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// A boolean.
    Bool(bool),
    /// A string of Unicode scalars.
    String(FastStr),
    /// An integer literal that fits signed 64 bits.
    Int64(i64),
    /// An IEEE-754 binary64 number.
    Double(f64),
    /// An arbitrary-precision base-10 number.
    Decimal(Decimal),
    /// A key-value mapping preserving insertion order.
    Object(Object),
    /// An ordered sequence of values.
    Array(Array),
}

impl Value {
    /// A `null` value.
    #[inline]
    pub const fn new() -> Self {
        Value::Null
    }

    /// The category of this value.
    ///
    /// # Examples
    /// ```
    /// use decjson::{from_str, JsonType, Value};
    ///
    /// let value: Value = from_str(r#"{"a": 1.5}"#).unwrap();
    /// assert_eq!(value.json_type(), JsonType::Object);
    /// assert_eq!(value["a"].json_type(), JsonType::Number);
    /// ```
    pub fn json_type(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::String(_) => JsonType::String,
            Value::Int64(_) | Value::Double(_) | Value::Decimal(_) => JsonType::Number,
            Value::Object(_) => JsonType::Object,
            Value::Array(_) => JsonType::Array,
        }
    }

    /// Returns true if the value is `null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if the value is a boolean.
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if the value is a string.
    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true for any of the three number representations.
    #[inline]
    pub fn is_number(&self) -> bool {
        self.json_type() == JsonType::Number
    }

    /// Returns true if the value is an `Int64`.
    #[inline]
    pub fn is_i64(&self) -> bool {
        matches!(self, Value::Int64(_))
    }

    /// Returns true if the value is a `Double`.
    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns true if the value is a `Decimal`.
    #[inline]
    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::Decimal(_))
    }

    /// Returns true if the value is an object.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if the value is an array.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The boolean payload, if this is a `Bool`.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string payload, if this is a `String`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int64`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// The double payload, if this is a `Double`.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The decimal payload, if this is a `Decimal`.
    #[inline]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// The object payload, if this is an `Object`.
    #[inline]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable access to the object payload.
    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The array payload, if this is an `Array`.
    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable access to the array payload.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Value::Null
    }
}

impl Display for Value {
    /// Renders compact JSON. Non-finite doubles are rendered as the strings
    /// `"NaN"`, `"Infinity"` and `"-Infinity"` so that `Display` cannot
    /// fail.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = EncodeCfg::new().with_allow_nonfinite_numbers(true);
        let text = crate::ser::to_string_with(self, &cfg).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Value {
    type Err = Error;

    /// Parses with the default (lenient) options.
    fn from_str(s: &str) -> Result<Self> {
        crate::de::from_str(s)
    }
}
