//! Formatters for JSON serialization.
//!
//! A [`Formatter`] abstracts the JSON control characters so the serializer
//! can switch between compact and pretty output without branching on every
//! write.

use std::io::{self, Write};

use crate::decimal::Decimal;

/// How a character inside a string is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharEscape {
    /// `\"`
    Quote,
    /// `\\`
    ReverseSolidus,
    /// `\/`
    Solidus,
    /// `\b`
    Backspace,
    /// `\f`
    FormFeed,
    /// `\n`
    LineFeed,
    /// `\r`
    CarriageReturn,
    /// `\t`
    Tab,
    /// A control character below U+0020 with no short form, escaped as
    /// `\u00XX`.
    AsciiControl(u8),
    /// An arbitrary UTF-16 code unit, escaped as `\uXXXX`. Used for
    /// `ascii_only` output; non-BMP scalars emit two of these.
    Unicode(u16),
}

/// Serializes the JSON control characters, allowing compact or pretty
/// output.
pub trait Formatter {
    /// Writes a `null` value.
    #[inline]
    fn write_null<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"null")
    }

    /// Writes a `true` or `false` value.
    #[inline]
    fn write_bool<W>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if value {
            writer.write_all(b"true")
        } else {
            writer.write_all(b"false")
        }
    }

    /// Writes an integer value like `-123`.
    #[inline]
    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut buffer = itoa::Buffer::new();
        writer.write_all(buffer.format(value).as_bytes())
    }

    /// Writes a finite double in its shortest round-trip form.
    #[inline]
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut buffer = ryu::Buffer::new();
        writer.write_all(buffer.format_finite(value).as_bytes())
    }

    /// Writes a decimal in its canonical scale-preserving form.
    #[inline]
    fn write_decimal<W>(&mut self, writer: &mut W, value: &Decimal) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(value.to_string().as_bytes())
    }

    /// Called before writing a string, whether a value or an object key.
    #[inline]
    fn begin_string<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after writing a string.
    #[inline]
    fn end_string<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes string content that requires no escaping.
    #[inline]
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes one escape sequence.
    fn write_char_escape<W>(&mut self, writer: &mut W, escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let short = match escape {
            CharEscape::Quote => b"\\\"" as &[u8],
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::Backspace => b"\\b",
            CharEscape::FormFeed => b"\\f",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::AsciiControl(byte) => {
                return write!(writer, "\\u{:04x}", byte);
            }
            CharEscape::Unicode(unit) => {
                return write!(writer, "\\u{:04x}", unit);
            }
        };
        writer.write_all(short)
    }

    /// Called before writing an array.
    #[inline]
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"[")
    }

    /// Called after writing an array.
    #[inline]
    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"]")
    }

    /// Called before every array element.
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    /// Called after every array element.
    #[inline]
    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        Ok(())
    }

    /// Called before writing an object.
    #[inline]
    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"{")
    }

    /// Called after writing an object.
    #[inline]
    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b"}")
    }

    /// Called before every object key.
    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    /// Called between an object key and its value.
    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b":")
    }

    /// Called after every object value.
    #[inline]
    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        Ok(())
    }
}

/// Compact output with no whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormatter;

impl Formatter for CompactFormatter {}

/// Pretty output: indented nesting, newlines between elements, a space
/// after `:`.
#[derive(Debug, Clone)]
pub struct PrettyFormatter<'a> {
    current_indent: usize,
    has_value: bool,
    indent: &'a [u8],
}

impl<'a> PrettyFormatter<'a> {
    /// A pretty formatter with the default two-space indent.
    pub fn new() -> Self {
        PrettyFormatter::with_indent(b"  ")
    }

    /// A pretty formatter with a custom indent unit.
    pub fn with_indent(indent: &'a [u8]) -> Self {
        PrettyFormatter {
            current_indent: 0,
            has_value: false,
            indent,
        }
    }

    fn write_indent<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        for _ in 0..self.current_indent {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }
}

impl Default for PrettyFormatter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PrettyFormatter<'_> {
    #[inline]
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    #[inline]
    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.write_indent(writer)?;
        }
        writer.write_all(b"]")
    }

    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        self.write_indent(writer)
    }

    #[inline]
    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.has_value = true;
        Ok(())
    }

    #[inline]
    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    #[inline]
    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.write_indent(writer)?;
        }
        writer.write_all(b"}")
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        self.write_indent(writer)
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    #[inline]
    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.has_value = true;
        Ok(())
    }
}

/// Escape and write a whole string value, honoring the slash and
/// ASCII-only options.
pub(crate) fn format_escaped_str<W, F>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
    escape_slashes: bool,
    ascii_only: bool,
) -> io::Result<()>
where
    W: ?Sized + Write,
    F: ?Sized + Formatter,
{
    formatter.begin_string(writer)?;
    if ascii_only {
        format_ascii_only(writer, formatter, value, escape_slashes)?;
    } else {
        format_verbatim(writer, formatter, value, escape_slashes)?;
    }
    formatter.end_string(writer)
}

fn short_escape(byte: u8, escape_slashes: bool) -> Option<CharEscape> {
    match byte {
        b'"' => Some(CharEscape::Quote),
        b'\\' => Some(CharEscape::ReverseSolidus),
        b'/' if escape_slashes => Some(CharEscape::Solidus),
        0x08 => Some(CharEscape::Backspace),
        0x0C => Some(CharEscape::FormFeed),
        b'\n' => Some(CharEscape::LineFeed),
        b'\r' => Some(CharEscape::CarriageReturn),
        b'\t' => Some(CharEscape::Tab),
        0x00..=0x1F => Some(CharEscape::AsciiControl(byte)),
        _ => None,
    }
}

/// Non-ASCII scalars pass through verbatim; only the required escapes (and
/// optionally `/`) are rewritten.
fn format_verbatim<W, F>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
    escape_slashes: bool,
) -> io::Result<()>
where
    W: ?Sized + Write,
    F: ?Sized + Formatter,
{
    let bytes = value.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let Some(escape) = short_escape(byte, escape_slashes) else {
            continue;
        };
        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }
        formatter.write_char_escape(writer, escape)?;
        start = i + 1;
    }
    if start < bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }
    Ok(())
}

/// Every non-ASCII scalar becomes `\uXXXX`; scalars outside the BMP become
/// a surrogate pair.
fn format_ascii_only<W, F>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
    escape_slashes: bool,
) -> io::Result<()>
where
    W: ?Sized + Write,
    F: ?Sized + Formatter,
{
    let mut units = [0u16; 2];
    for c in value.chars() {
        if c.is_ascii() {
            match short_escape(c as u8, escape_slashes) {
                Some(escape) => formatter.write_char_escape(writer, escape)?,
                None => {
                    formatter.write_string_fragment(writer, c.encode_utf8(&mut [0u8; 4]))?
                }
            }
        } else {
            for &unit in c.encode_utf16(&mut units).iter() {
                formatter.write_char_escape(writer, CharEscape::Unicode(unit))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn escaped(value: &str, escape_slashes: bool, ascii_only: bool) -> String {
        let mut out = Vec::new();
        format_escaped_str(
            &mut out,
            &mut CompactFormatter,
            value,
            escape_slashes,
            ascii_only,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_required_escapes() {
        assert_eq!(escaped("a\"b", false, false), r#""a\"b""#);
        assert_eq!(escaped("a\\b", false, false), r#""a\\b""#);
        assert_eq!(escaped("a\nb\t", false, false), r#""a\nb\t""#);
        assert_eq!(escaped("\u{1}", false, false), "\"\\u0001\"");
    }

    #[test]
    fn test_slashes_only_when_asked() {
        assert_eq!(escaped("a/b", false, false), r#""a/b""#);
        assert_eq!(escaped("a/b", true, false), r#""a\/b""#);
    }

    #[test]
    fn test_non_ascii_verbatim_by_default() {
        assert_eq!(escaped("π", false, false), "\"π\"");
    }

    #[test]
    fn test_ascii_only_escapes_bmp_and_pairs() {
        assert_eq!(escaped("π", false, true), "\"\\u03c0\"");
        assert_eq!(escaped("𝄞", false, true), "\"\\ud834\\udd1e\"");
        assert_eq!(escaped("a\nπ", false, true), "\"a\\n\\u03c0\"");
    }
}
