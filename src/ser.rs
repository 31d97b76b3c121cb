//! Serialize values to JSON text.

use std::io;

use crate::config::EncodeCfg;
use crate::error::{Error, ErrorCode, Result};
use crate::format::{format_escaped_str, CompactFormatter, Formatter, PrettyFormatter};
use crate::value::{Array, Object, Value};
use crate::writer::ChunkedWriter;

macro_rules! tri {
    ($e:expr) => {
        $e.map_err(Error::io)?
    };
}

/// Serialize a value to a compact JSON string.
///
/// # Examples
/// ```
/// use decjson::{json, to_string};
///
/// let value = json!({"a": 1, "b": [true, null, "x"]});
/// assert_eq!(to_string(&value).unwrap(), r#"{"a":1,"b":[true,null,"x"]}"#);
/// ```
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with(value, &EncodeCfg::default())
}

/// Serialize a value to a pretty-printed JSON string with two-space
/// indentation.
///
/// # Examples
/// ```
/// use decjson::{json, to_string_pretty};
///
/// let value = json!({"a": [1]});
/// assert_eq!(to_string_pretty(&value).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
/// ```
pub fn to_string_pretty(value: &Value) -> Result<String> {
    to_string_with(value, &EncodeCfg::new().with_pretty(true))
}

/// Serialize a value to a JSON string with explicit options.
pub fn to_string_with(value: &Value, cfg: &EncodeCfg) -> Result<String> {
    let bytes = to_vec_with(value, cfg)?;
    // The serializer only emits string fragments and ASCII punctuation.
    Ok(String::from_utf8(bytes).expect("serializer emitted invalid UTF-8"))
}

/// Serialize a value to a compact JSON byte vector.
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_vec_with(value, &EncodeCfg::default())
}

/// Serialize a value to a JSON byte vector with explicit options.
pub fn to_vec_with(value: &Value, cfg: &EncodeCfg) -> Result<Vec<u8>> {
    let mut writer = ChunkedWriter::new();
    to_writer_with(&mut writer, value, cfg)?;
    Ok(writer.into_vec())
}

/// Serialize a value into an `io::Write` with the default options.
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> Result<()> {
    to_writer_with(writer, value, &EncodeCfg::default())
}

/// Serialize a value into an `io::Write` with explicit options.
pub fn to_writer_with<W: io::Write>(writer: W, value: &Value, cfg: &EncodeCfg) -> Result<()> {
    if cfg.pretty {
        let formatter = PrettyFormatter::with_indent(cfg.indent.as_bytes());
        Serializer {
            writer,
            formatter,
            cfg,
        }
        .serialize(value)
    } else {
        Serializer {
            writer,
            formatter: CompactFormatter,
            cfg,
        }
        .serialize(value)
    }
}

struct Serializer<'cfg, W, F> {
    writer: W,
    formatter: F,
    cfg: &'cfg EncodeCfg,
}

impl<W: io::Write, F: Formatter> Serializer<'_, W, F> {
    fn serialize(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => tri!(self.formatter.write_null(&mut self.writer)),
            Value::Bool(b) => tri!(self.formatter.write_bool(&mut self.writer, *b)),
            Value::Int64(v) => tri!(self.formatter.write_i64(&mut self.writer, *v)),
            Value::Double(d) => self.serialize_double(*d)?,
            Value::Decimal(d) => tri!(self.formatter.write_decimal(&mut self.writer, d)),
            Value::String(s) => self.serialize_str(s)?,
            Value::Array(array) => self.serialize_array(array)?,
            Value::Object(object) => self.serialize_object(object)?,
        }
        Ok(())
    }

    fn serialize_double(&mut self, value: f64) -> Result<()> {
        if value.is_finite() {
            tri!(self.formatter.write_f64(&mut self.writer, value));
            return Ok(());
        }
        if !self.cfg.allow_nonfinite_numbers {
            return Err(Error::encode(ErrorCode::NonFiniteNumber));
        }
        let text = if value.is_nan() {
            "NaN"
        } else if value > 0.0 {
            "Infinity"
        } else {
            "-Infinity"
        };
        self.serialize_str(text)
    }

    fn serialize_str(&mut self, value: &str) -> Result<()> {
        tri!(format_escaped_str(
            &mut self.writer,
            &mut self.formatter,
            value,
            self.cfg.escape_slashes,
            self.cfg.ascii_only,
        ));
        Ok(())
    }

    fn serialize_array(&mut self, array: &Array) -> Result<()> {
        tri!(self.formatter.begin_array(&mut self.writer));
        for (i, element) in array.iter().enumerate() {
            tri!(self.formatter.begin_array_value(&mut self.writer, i == 0));
            self.serialize(element)?;
            tri!(self.formatter.end_array_value(&mut self.writer));
        }
        tri!(self.formatter.end_array(&mut self.writer));
        Ok(())
    }

    fn serialize_object(&mut self, object: &Object) -> Result<()> {
        tri!(self.formatter.begin_object(&mut self.writer));
        if self.cfg.sorted_keys {
            let mut entries: Vec<(&str, &Value)> = object.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            self.serialize_entries(entries.into_iter())?;
        } else {
            self.serialize_entries(object.iter())?;
        }
        tri!(self.formatter.end_object(&mut self.writer));
        Ok(())
    }

    fn serialize_entries<'v>(
        &mut self,
        entries: impl Iterator<Item = (&'v str, &'v Value)>,
    ) -> Result<()> {
        for (i, (key, value)) in entries.enumerate() {
            tri!(self.formatter.begin_object_key(&mut self.writer, i == 0));
            self.serialize_str(key)?;
            tri!(self.formatter.begin_object_value(&mut self.writer));
            self.serialize(value)?;
            tri!(self.formatter.end_object_value(&mut self.writer));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::de::{from_str, from_str_with};
    use crate::json;
    use crate::ParseCfg;

    #[test]
    fn test_compact_roundtrip_is_byte_identical() {
        let text = r#"{"a":1,"b":[true,null,"x"]}"#;
        let value = from_str(text).unwrap();
        assert_eq!(to_string(&value).unwrap(), text);
    }

    #[test]
    fn test_pretty_layout() {
        let value = json!({"a": 1, "b": [true], "c": {}});
        assert_eq!(
            to_string_pretty(&value).unwrap(),
            "{\n  \"a\": 1,\n  \"b\": [\n    true\n  ],\n  \"c\": {}\n}"
        );
    }

    #[test]
    fn test_custom_indent() {
        let cfg = EncodeCfg::new().with_indent("\t");
        let value = json!([1]);
        assert_eq!(to_string_with(&value, &cfg).unwrap(), "[\n\t1\n]");
    }

    #[test]
    fn test_sorted_keys() {
        let value = json!({"b": 1, "a": 2, "c": {"z": 0, "y": 1}});
        let cfg = EncodeCfg::new().with_sorted_keys(true);
        assert_eq!(
            to_string_with(&value, &cfg).unwrap(),
            r#"{"a":2,"b":1,"c":{"y":1,"z":0}}"#
        );
        // Insertion order without the option.
        assert_eq!(to_string(&value).unwrap(), r#"{"b":1,"a":2,"c":{"z":0,"y":1}}"#);
    }

    #[test]
    fn test_nonfinite_policy() {
        let value = json!([f64::NAN]);
        assert!(matches!(
            to_string(&value).unwrap_err().code(),
            ErrorCode::NonFiniteNumber
        ));
        let cfg = EncodeCfg::new().with_allow_nonfinite_numbers(true);
        assert_eq!(to_string_with(&value, &cfg).unwrap(), r#"["NaN"]"#);
        let value = json!([f64::NEG_INFINITY]);
        assert_eq!(to_string_with(&value, &cfg).unwrap(), r#"["-Infinity"]"#);
    }

    #[test]
    fn test_decimal_preserves_scale() {
        let cfg = ParseCfg::new().with_use_decimals(true);
        let value = from_str_with("[1.5e2]", cfg).unwrap();
        assert_eq!(to_string(&value).unwrap(), "[150]");
        let value = from_str_with(r#"{"p": 1.50}"#, cfg).unwrap();
        assert_eq!(to_string(&value).unwrap(), r#"{"p":1.50}"#);
    }

    #[test]
    fn test_double_shortest_roundtrip() {
        for d in [0.1, 1.5e300, -2.5e-10, 150.0, 1e21] {
            let encoded = to_string(&Value::Double(d)).unwrap();
            let back = from_str(&encoded).unwrap();
            assert_eq!(back.get_f64().unwrap().to_bits(), d.to_bits(), "{encoded}");
        }
    }

    #[test]
    fn test_int64_roundtrip() {
        for v in [0i64, -1, i64::MIN, i64::MAX] {
            let encoded = to_string(&Value::Int64(v)).unwrap();
            assert_eq!(from_str(&encoded).unwrap(), Value::Int64(v));
        }
    }

    #[test]
    fn test_escape_options_apply_to_keys_and_values() {
        let value = json!({"a/b": "c/d"});
        let cfg = EncodeCfg::new().with_escape_slashes(true);
        assert_eq!(
            to_string_with(&value, &cfg).unwrap(),
            r#"{"a\/b":"c\/d"}"#
        );
    }

    #[test]
    fn test_to_writer() {
        let mut out = Vec::new();
        to_writer(&mut out, &json!([1, 2])).unwrap();
        assert_eq!(out, b"[1,2]");
    }
}
