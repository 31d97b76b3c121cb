//! Typed-access errors, annotated with a structural path.
//!
//! Accessor errors propagate unchanged except when crossing a keyed or
//! indexed lookup boundary, where the key or `[index]` is prepended to the
//! error's path. The resulting display format joins keys with `.` and
//! attaches indices without a preceding dot: `user.addresses[0].zip`.

use core::fmt::{self, Display};

use thiserror::Error as ErrorTrait;

use crate::decimal::Decimal;
use crate::value::JsonType;

/// What an accessor was asked to produce: a category, required or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    required: bool,
    category: JsonType,
}

impl Expected {
    /// A required value of the given category.
    #[inline]
    pub fn required(category: JsonType) -> Self {
        Expected {
            required: true,
            category,
        }
    }

    /// An optional value of the given category.
    #[inline]
    pub fn optional(category: JsonType) -> Self {
        Expected {
            required: false,
            category,
        }
    }

    /// True unless this expectation tolerates `null` and absence.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The expected category.
    #[inline]
    pub fn category(&self) -> JsonType {
        self.category
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.required {
            Display::fmt(&self.category, f)
        } else {
            write!(f, "optional {}", self.category)
        }
    }
}

fn actual_name(actual: &Option<JsonType>) -> &'static str {
    match actual {
        Some(category) => category.as_str(),
        None => "nothing",
    }
}

/// The reason a typed access failed.
#[derive(ErrorTrait, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AccessErrorKind {
    /// No value at the position, or a value of the wrong category.
    #[error("expected {expected}, found {}", actual_name(.actual))]
    MissingOrInvalidType {
        /// The requested category and requiredness.
        expected: Expected,
        /// The observed category; `None` when the position held no value.
        actual: Option<JsonType>,
    },

    /// An integer did not fit the narrower integer target.
    #[error("integer {value} out of range for {target}")]
    OutOfRangeInt64 {
        /// The observed value.
        value: i64,
        /// The name of the target type.
        target: &'static str,
    },

    /// A double was non-finite or outside the integer target's range.
    #[error("double {value} out of range for {target}")]
    OutOfRangeDouble {
        /// The observed value.
        value: f64,
        /// The name of the target type.
        target: &'static str,
    },

    /// A decimal was outside the target's range.
    #[error("decimal {value} out of range for {target}")]
    OutOfRangeDecimal {
        /// The observed value.
        value: Decimal,
        /// The name of the target type.
        target: &'static str,
    },
}

/// A typed access failed; carries the structural path from the root.
///
/// The path is display-only: keys containing `.` or `[` are not escaped, so
/// the string cannot be reverse-parsed unambiguously.
///
/// # Examples
/// ```
/// use decjson::{from_str, Value};
///
/// let root: Value = from_str(r#"{"user": {"tags": [1]}}"#).unwrap();
/// let user = root.get_object().unwrap().get_object("user").unwrap();
/// let err = user
///     .at("tags", |tags| {
///         tags.get_array()?.at(0, |tag| tag.get_str().map(drop))
///     })
///     .unwrap_err();
/// assert_eq!(err.path(), Some("tags[0]"));
/// assert_eq!(err.to_string(), "tags[0]: expected string, found number");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AccessError {
    path: Option<String>,
    kind: AccessErrorKind,
}

impl AccessError {
    /// Build an error from a kind, with no path yet.
    pub fn new(kind: AccessErrorKind) -> Self {
        AccessError { path: None, kind }
    }

    /// A value of the wrong category was found.
    pub fn type_mismatch(expected: Expected, actual: JsonType) -> Self {
        AccessError::new(AccessErrorKind::MissingOrInvalidType {
            expected,
            actual: Some(actual),
        })
    }

    /// The position held no value at all.
    pub fn missing(expected: Expected) -> Self {
        AccessError::new(AccessErrorKind::MissingOrInvalidType {
            expected,
            actual: None,
        })
    }

    pub(crate) fn out_of_range_i64(value: i64, target: &'static str) -> Self {
        AccessError::new(AccessErrorKind::OutOfRangeInt64 { value, target })
    }

    pub(crate) fn out_of_range_f64(value: f64, target: &'static str) -> Self {
        AccessError::new(AccessErrorKind::OutOfRangeDouble { value, target })
    }

    pub(crate) fn out_of_range_decimal(value: Decimal, target: &'static str) -> Self {
        AccessError::new(AccessErrorKind::OutOfRangeDecimal { value, target })
    }

    /// The structural path from the root, if any lookup boundary has been
    /// crossed. `None` for an error at the leaf.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The reason the access failed.
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Prepend an object key to the path.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.path = Some(match self.path.take() {
            None => key.to_owned(),
            Some(rest) if rest.starts_with('[') => format!("{key}{rest}"),
            Some(rest) => format!("{key}.{rest}"),
        });
        self
    }

    /// Prepend an array index to the path.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.path = Some(match self.path.take() {
            None => format!("[{index}]"),
            Some(rest) if rest.starts_with('[') => format!("[{index}]{rest}"),
            Some(rest) => format!("[{index}].{rest}"),
        });
        self
    }
}

impl Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{path}: {}", self.kind),
            None => Display::fmt(&self.kind, f),
        }
    }
}

impl std::error::Error for AccessError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_path_builds_bottom_up() {
        let err = AccessError::type_mismatch(
            Expected::required(JsonType::String),
            JsonType::Number,
        )
        .with_index(2)
        .with_key("tags")
        .with_key("user");
        assert_eq!(err.path(), Some("user.tags[2]"));
        assert_eq!(
            err.to_string(),
            "user.tags[2]: expected string, found number"
        );
    }

    #[test]
    fn test_index_attaches_without_dot() {
        let err = AccessError::missing(Expected::required(JsonType::Number))
            .with_key("zip")
            .with_index(0)
            .with_key("addresses");
        assert_eq!(err.path(), Some("addresses[0].zip"));
    }

    #[test]
    fn test_leaf_error_has_no_path() {
        let err = AccessError::type_mismatch(
            Expected::optional(JsonType::Bool),
            JsonType::Array,
        );
        assert_eq!(err.path(), None);
        assert_eq!(err.to_string(), "expected optional bool, found array");
    }

    #[test]
    fn test_missing_displays_nothing() {
        let err = AccessError::missing(Expected::required(JsonType::Object));
        assert_eq!(err.to_string(), "expected object, found nothing");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = AccessError::out_of_range_f64(1.8e19, "i64").with_key("x");
        assert_eq!(err.to_string(), "x: double 18000000000000000000 out of range for i64");
    }
}
