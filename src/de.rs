//! Assemble parser events into values.

use faststr::FastStr;

use crate::config::ParseCfg;
use crate::error::{Error, ErrorCode, Result};
use crate::parser::{Event, Parser};
use crate::value::{Array, Object, Value};

/// Parse a string into a [`Value`] with the default (lenient) options.
///
/// # Examples
/// ```
/// use decjson::{from_str, Value};
///
/// let value = from_str(r#"{"a": 1, "b": [true, null, "x"]}"#).unwrap();
/// assert_eq!(value["b"][2], "x");
///
/// assert!(from_str("").unwrap_err().to_string().contains("end of input"));
/// ```
pub fn from_str(data: &str) -> Result<Value> {
    from_slice(data.as_bytes())
}

/// Parse a string into a [`Value`] with explicit options.
pub fn from_str_with(data: &str, cfg: ParseCfg) -> Result<Value> {
    from_slice_with(data.as_bytes(), cfg)
}

/// Parse a byte buffer into a [`Value`] with the default options.
///
/// The buffer may be UTF-8, UTF-16 or UTF-32 in either byte order, with or
/// without a byte-order mark.
///
/// # Examples
/// ```
/// use decjson::{from_slice, json};
///
/// // "{}" in UTF-16 LE with a BOM.
/// let value = from_slice(b"\xff\xfe{\x00}\x00").unwrap();
/// assert_eq!(value, json!({}));
/// ```
pub fn from_slice(data: &[u8]) -> Result<Value> {
    from_slice_with(data, ParseCfg::default())
}

/// Parse a byte buffer into a [`Value`] with explicit options.
///
/// Exactly one top-level value is required regardless of the `streaming`
/// flag; multi-document input goes through [`ValueStream`].
pub fn from_slice_with(data: &[u8], cfg: ParseCfg) -> Result<Value> {
    let mut parser = Parser::new(data, ParseCfg { streaming: false, ..cfg });
    let first = parser.next_event()?;
    let value = assemble(&mut parser, first, &cfg)?;
    // The parser reports trailing data itself; this pull only confirms it.
    match parser.next_event()? {
        Event::EndOfInput => Ok(value),
        _ => Err(Error::syntax(
            ErrorCode::TrailingData,
            parser.position().line,
            parser.position().column,
        )),
    }
}

/// An iterator pulling whitespace-separated top-level values one by one.
///
/// This is the `streaming` mode of the parser: the input may hold any
/// number of JSON documents (JSON Lines, concatenated values, ...).
///
/// # Examples
/// ```
/// use decjson::{json, ParseCfg, Value, ValueStream};
///
/// let docs: Vec<Value> = ValueStream::new(b"{\"a\":1}\n[2]\n3", ParseCfg::new())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(docs, vec![json!({"a": 1}), json!([2]), json!(3)]);
/// ```
pub struct ValueStream<'a> {
    parser: Parser<'a>,
    cfg: ParseCfg,
    failed: bool,
}

impl<'a> ValueStream<'a> {
    /// Create a stream over a byte buffer. The `streaming` flag is implied.
    pub fn new(data: &'a [u8], cfg: ParseCfg) -> Self {
        ValueStream {
            parser: Parser::new(data, ParseCfg { streaming: true, ..cfg }),
            cfg,
            failed: false,
        }
    }
}

impl Iterator for ValueStream<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let first = match self.parser.next_event() {
            Ok(Event::EndOfInput) => return None,
            Ok(event) => event,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        match assemble(&mut self.parser, first, &self.cfg) {
            Ok(value) => Some(Ok(value)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

enum Parent {
    Object {
        object: Object,
        pending_key: Option<FastStr>,
    },
    Array(Array),
}

/// Build one complete value starting from `first`. Containers are built
/// iteratively on an explicit stack; nesting is already bounded by the
/// parser's depth limit.
fn assemble(parser: &mut Parser<'_>, first: Event, cfg: &ParseCfg) -> Result<Value> {
    let mut stack: Vec<Parent> = Vec::new();
    let mut event = first;
    loop {
        let completed: Value = match event {
            Event::ObjectStart => {
                stack.push(Parent::Object {
                    object: Object::new(),
                    pending_key: None,
                });
                event = parser.next_event()?;
                continue;
            }
            Event::ArrayStart => {
                stack.push(Parent::Array(Array::new()));
                event = parser.next_event()?;
                continue;
            }
            Event::ObjectEnd => match stack.pop() {
                Some(Parent::Object { object, .. }) => Value::Object(object),
                _ => unreachable!("parser verified container balance"),
            },
            Event::ArrayEnd => match stack.pop() {
                Some(Parent::Array(array)) => Value::Array(array),
                _ => unreachable!("parser verified container balance"),
            },
            Event::Null => Value::Null,
            Event::Bool(b) => Value::Bool(b),
            Event::Int64(v) => Value::Int64(v),
            Event::Double(v) => Value::Double(v),
            Event::Decimal(v) => Value::Decimal(v),
            Event::String(s) => {
                // Inside an object, a string with no pending key is the key.
                match stack.last_mut() {
                    Some(Parent::Object {
                        object,
                        pending_key,
                    }) if pending_key.is_none() => {
                        if cfg.deny_duplicate_keys && object.contains_key(&s) {
                            let pos = parser.position();
                            return Err(Error::syntax(
                                ErrorCode::DuplicateKey(s.to_string().into_boxed_str()),
                                pos.line,
                                pos.column,
                            ));
                        }
                        *pending_key = Some(s);
                        event = parser.next_event()?;
                        continue;
                    }
                    _ => Value::String(s),
                }
            }
            Event::EndOfInput => {
                unreachable!("parser yields a value event or an error here")
            }
        };
        match stack.last_mut() {
            None => return Ok(completed),
            Some(Parent::Array(array)) => array.push(completed),
            Some(Parent::Object {
                object,
                pending_key,
            }) => {
                let key = pending_key.take().expect("value inside object has a key");
                // Last occurrence wins under the default duplicate policy.
                object.insert(key, completed);
            }
        }
        event = parser.next_event()?;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json;

    #[test]
    fn test_scalar_documents() {
        assert_eq!(from_str("null").unwrap(), Value::Null);
        assert_eq!(from_str("true").unwrap(), Value::Bool(true));
        assert_eq!(from_str("-7").unwrap(), Value::Int64(-7));
        assert_eq!(from_str(r#""s""#).unwrap(), Value::from("s"));
    }

    #[test]
    fn test_nested_document() {
        let value = from_str(r#"{"a":1,"b":[true,null,"x"],"c":{"d":[]}}"#).unwrap();
        assert_eq!(
            value,
            json!({"a": 1, "b": [true, null, "x"], "c": {"d": []}})
        );
    }

    #[test]
    fn test_duplicate_keys_last_wins_by_default() {
        let value = from_str(r#"{"a":1,"b":0,"a":2}"#).unwrap();
        assert_eq!(value["a"], 2i64);
        assert_eq!(value.get_object().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_keys_denied() {
        let cfg = ParseCfg::new().with_deny_duplicate_keys(true);
        let err = from_str_with(r#"{"a":1,"a":2}"#, cfg).unwrap_err();
        assert!(matches!(err.code(), ErrorCode::DuplicateKey(k) if &**k == "a"));
    }

    #[test]
    fn test_exactly_one_top_level_value() {
        assert!(matches!(
            from_str("1 2").unwrap_err().code(),
            ErrorCode::TrailingData
        ));
        assert!(matches!(
            from_str("").unwrap_err().code(),
            ErrorCode::UnexpectedEof
        ));
        assert!(matches!(
            from_slice(b"\xEF\xBB\xBF").unwrap_err().code(),
            ErrorCode::UnexpectedEof
        ));
    }

    #[test]
    fn test_depth_limit_applies() {
        let deep = format!("{}1{}", "[".repeat(65), "]".repeat(65));
        assert!(matches!(
            from_str(&deep).unwrap_err().code(),
            ErrorCode::ExceededDepthLimit
        ));
        let ok = format!("{}1{}", "[".repeat(64), "]".repeat(64));
        assert!(from_str(&ok).is_ok());
    }

    #[test]
    fn test_utf16_document() {
        // {"1": 2} spelled in UTF-16 BE with BOM.
        let mut data: Vec<u8> = vec![0xFE, 0xFF];
        for unit in "{\"1\": 2}".encode_utf16() {
            data.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(from_slice(&data).unwrap(), json!({"1": 2}));
    }

    #[test]
    fn test_stream_pulls_documents() {
        let mut stream = ValueStream::new(b" 1 [2] ", ParseCfg::new());
        assert_eq!(stream.next().unwrap().unwrap(), json!(1));
        assert_eq!(stream.next().unwrap().unwrap(), json!([2]));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_stream_stops_after_error() {
        let mut stream = ValueStream::new(b"1 x 2", ParseCfg::new());
        assert_eq!(stream.next().unwrap().unwrap(), json!(1));
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_decimal_documents() {
        let cfg = ParseCfg::new().with_use_decimals(true);
        let value = from_str_with(r#"{"x": 9223372036854775808}"#, cfg).unwrap();
        assert_eq!(
            value["x"],
            Value::Decimal("9223372036854775808".parse().unwrap())
        );
        let value = from_str_with("[1.5e2]", cfg).unwrap();
        assert_eq!(value[0], Value::Decimal("150".parse().unwrap()));
    }
}
