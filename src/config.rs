//! Options controlling parsing and encoding.

use std::borrow::Cow;

/// Default nesting limit for objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for the parser and the value assembler.
///
/// The default configuration is lenient: comments, trailing commas, a leading
/// `+` and `.5`-style numbers are accepted. Set [`strict`](ParseCfg::strict)
/// to parse RFC 8259 JSON only.
///
/// # Examples
/// ```
/// use decjson::{from_str_with, ParseCfg};
///
/// let cfg = ParseCfg::new().with_strict(true);
/// assert!(from_str_with("[1,]", cfg).is_err());
/// assert!(from_str_with("[1]", cfg).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseCfg {
    /// Reject comments, trailing commas, a leading `+`, `.5`-style numbers,
    /// control characters in strings and unpaired surrogate escapes.
    pub strict: bool,
    /// Parse non-integer literals (and integer literals that overflow `i64`)
    /// as [`Decimal`](crate::Decimal) instead of `f64`.
    pub use_decimals: bool,
    /// Report an error on a duplicate object key instead of keeping the
    /// last occurrence.
    pub deny_duplicate_keys: bool,
    /// Allow multiple whitespace-separated top-level values, pulled one by
    /// one through [`ValueStream`](crate::ValueStream).
    pub streaming: bool,
    /// Accept `//…` and `/* … */` comments. Only consulted in lenient mode;
    /// strict mode always rejects comments.
    pub allow_comments: bool,
    /// Maximum nesting of objects and arrays.
    pub max_depth: usize,
}

impl Default for ParseCfg {
    fn default() -> Self {
        ParseCfg {
            strict: false,
            use_decimals: false,
            deny_duplicate_keys: false,
            streaming: false,
            allow_comments: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseCfg {
    /// Equivalent to `ParseCfg::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`strict`](ParseCfg::strict).
    #[inline]
    pub fn with_strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Set [`use_decimals`](ParseCfg::use_decimals).
    #[inline]
    pub fn with_use_decimals(mut self, yes: bool) -> Self {
        self.use_decimals = yes;
        self
    }

    /// Set [`deny_duplicate_keys`](ParseCfg::deny_duplicate_keys).
    #[inline]
    pub fn with_deny_duplicate_keys(mut self, yes: bool) -> Self {
        self.deny_duplicate_keys = yes;
        self
    }

    /// Set [`streaming`](ParseCfg::streaming).
    #[inline]
    pub fn with_streaming(mut self, yes: bool) -> Self {
        self.streaming = yes;
        self
    }

    /// Set [`allow_comments`](ParseCfg::allow_comments).
    #[inline]
    pub fn with_allow_comments(mut self, yes: bool) -> Self {
        self.allow_comments = yes;
        self
    }

    /// Set [`max_depth`](ParseCfg::max_depth).
    #[inline]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Options for the encoder.
///
/// # Examples
/// ```
/// use decjson::{json, to_string_with, EncodeCfg};
///
/// let v = json!({"b": 1, "a": [true]});
/// let cfg = EncodeCfg::new().with_sorted_keys(true);
/// assert_eq!(to_string_with(&v, &cfg).unwrap(), r#"{"a":[true],"b":1}"#);
/// ```
#[derive(Debug, Clone)]
pub struct EncodeCfg {
    /// Indent nested values and insert newlines between elements.
    pub pretty: bool,
    /// The indent unit used when `pretty` is set.
    pub indent: Cow<'static, str>,
    /// Serialize object keys in lexicographic order.
    pub sorted_keys: bool,
    /// Escape `/` as `\/`.
    pub escape_slashes: bool,
    /// Emit non-ASCII scalars as `\uXXXX` escapes (surrogate pairs outside
    /// the BMP) instead of verbatim UTF-8.
    pub ascii_only: bool,
    /// Serialize non-finite doubles as the strings `"NaN"`, `"Infinity"` and
    /// `"-Infinity"` instead of reporting an error.
    pub allow_nonfinite_numbers: bool,
}

impl Default for EncodeCfg {
    fn default() -> Self {
        EncodeCfg {
            pretty: false,
            indent: Cow::Borrowed("  "),
            sorted_keys: false,
            escape_slashes: false,
            ascii_only: false,
            allow_nonfinite_numbers: false,
        }
    }
}

impl EncodeCfg {
    /// Equivalent to `EncodeCfg::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`pretty`](EncodeCfg::pretty).
    #[inline]
    pub fn with_pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Set [`indent`](EncodeCfg::indent). Implies `pretty`.
    #[inline]
    pub fn with_indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self.pretty = true;
        self
    }

    /// Set [`sorted_keys`](EncodeCfg::sorted_keys).
    #[inline]
    pub fn with_sorted_keys(mut self, yes: bool) -> Self {
        self.sorted_keys = yes;
        self
    }

    /// Set [`escape_slashes`](EncodeCfg::escape_slashes).
    #[inline]
    pub fn with_escape_slashes(mut self, yes: bool) -> Self {
        self.escape_slashes = yes;
        self
    }

    /// Set [`ascii_only`](EncodeCfg::ascii_only).
    #[inline]
    pub fn with_ascii_only(mut self, yes: bool) -> Self {
        self.ascii_only = yes;
        self
    }

    /// Set [`allow_nonfinite_numbers`](EncodeCfg::allow_nonfinite_numbers).
    #[inline]
    pub fn with_allow_nonfinite_numbers(mut self, yes: bool) -> Self {
        self.allow_nonfinite_numbers = yes;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ParseCfg::default();
        assert!(!cfg.strict);
        assert!(cfg.allow_comments);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);

        let cfg = EncodeCfg::default();
        assert!(!cfg.pretty);
        assert_eq!(cfg.indent, "  ");
    }

    #[test]
    fn test_builders() {
        let cfg = ParseCfg::new().with_strict(true).with_max_depth(8);
        assert!(cfg.strict);
        assert_eq!(cfg.max_depth, 8);

        let cfg = EncodeCfg::new().with_indent("\t");
        assert!(cfg.pretty);
        assert_eq!(cfg.indent, "\t");
    }
}
