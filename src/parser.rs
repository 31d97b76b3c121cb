//! A pull parser producing structural events from a code-point stream.

use faststr::FastStr;

use crate::config::ParseCfg;
use crate::decimal::Decimal;
use crate::error::{Error, ErrorCode, Result};
use crate::reader::{CodePoints, Encoding, REPLACEMENT};

/// A structural event pulled from the parser.
///
/// Object keys arrive as ordinary `String` events, in document order between
/// `ObjectStart` and `ObjectEnd`. Number events reflect the lexer
/// classification: an integer literal that fits signed 64 bits is `Int64`;
/// any other number literal is `Double`, or `Decimal` when
/// [`use_decimals`](ParseCfg::use_decimals) is set.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A `{` opened an object.
    ObjectStart,
    /// A `}` closed the innermost object.
    ObjectEnd,
    /// A `[` opened an array.
    ArrayStart,
    /// A `]` closed the innermost array.
    ArrayEnd,
    /// The `null` literal.
    Null,
    /// A `true` or `false` literal.
    Bool(bool),
    /// A string literal, with escapes resolved.
    String(FastStr),
    /// An integer literal within the signed 64-bit range.
    Int64(i64),
    /// A number literal parsed as a double.
    Double(f64),
    /// A number literal preserved as a decimal.
    Decimal(Decimal),
    /// The end of the input. Repeats on further pulls.
    EndOfInput,
}

/// A 1-based source position: line, and column counted in code points since
/// the last line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column in code points.
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A value must follow.
    Value,
    /// A value or `]` right after `[`.
    FirstValueOrEnd,
    /// A key or `}` right after `{`.
    FirstKeyOrEnd,
    /// A `,` or the closing bracket of the innermost container.
    CommaOrEnd,
    /// A `:` and then a value.
    Colon,
    /// Another top-level value, or end of input (streaming mode).
    StreamValue,
    /// Only end of input.
    End,
}

/// A pull parser over a byte buffer in any of the supported encodings.
///
/// Each [`next_event`](Parser::next_event) call returns the next structural
/// event or an error annotated with line and column. The caller controls
/// advancement; there is no internal buffering beyond one code point.
///
/// # Examples
/// ```
/// use decjson::{Event, Parser, ParseCfg};
///
/// let mut parser = Parser::new(b"[1, true]", ParseCfg::new());
/// assert_eq!(parser.next_event().unwrap(), Event::ArrayStart);
/// assert_eq!(parser.next_event().unwrap(), Event::Int64(1));
/// assert_eq!(parser.next_event().unwrap(), Event::Bool(true));
/// assert_eq!(parser.next_event().unwrap(), Event::ArrayEnd);
/// assert_eq!(parser.next_event().unwrap(), Event::EndOfInput);
/// ```
pub struct Parser<'a> {
    input: CodePoints<'a>,
    peeked: Option<char>,
    peeked_malformed: bool,
    last_malformed: bool,
    line: usize,
    column: usize,
    event_pos: Position,
    frames: Vec<Frame>,
    expect: Expect,
    cfg: ParseCfg,
}

impl<'a> Parser<'a> {
    /// Create a parser over a byte buffer. The encoding is sniffed and any
    /// byte-order mark is skipped.
    pub fn new(data: &'a [u8], cfg: ParseCfg) -> Self {
        let expect = if cfg.streaming {
            Expect::StreamValue
        } else {
            Expect::Value
        };
        Parser {
            input: CodePoints::new(data),
            peeked: None,
            peeked_malformed: false,
            last_malformed: false,
            line: 1,
            column: 1,
            event_pos: Position { line: 1, column: 1 },
            frames: Vec::new(),
            expect,
            cfg,
        }
    }

    /// Create a parser over a string slice.
    pub fn from_str(data: &'a str, cfg: ParseCfg) -> Self {
        Parser::new(data.as_bytes(), cfg)
    }

    /// The detected input encoding.
    pub fn encoding(&self) -> Encoding {
        self.input.encoding()
    }

    /// The position where the most recent event's token started.
    pub fn position(&self) -> Position {
        self.event_pos
    }

    /// Pull the next structural event.
    pub fn next_event(&mut self) -> Result<Event> {
        self.skip_whitespace()?;
        self.event_pos = self.here();
        match self.expect {
            Expect::Value => self.parse_value_event(),
            Expect::StreamValue => {
                if self.peek_char().is_none() {
                    return Ok(Event::EndOfInput);
                }
                self.parse_value_event()
            }
            Expect::End => match self.peek_char() {
                None => Ok(Event::EndOfInput),
                Some(_) => Err(self.err_here(ErrorCode::TrailingData)),
            },
            Expect::FirstValueOrEnd => {
                if self.peek_char() == Some(']') {
                    self.advance();
                    return self.close_array();
                }
                self.parse_value_event()
            }
            Expect::FirstKeyOrEnd => {
                if self.peek_char() == Some('}') {
                    self.advance();
                    return self.close_object();
                }
                self.parse_key()
            }
            Expect::CommaOrEnd => self.parse_comma_or_end(),
            Expect::Colon => {
                match self.peek_char() {
                    Some(':') => {
                        self.advance();
                    }
                    _ => return Err(self.unexpected_here()),
                }
                self.skip_whitespace()?;
                self.event_pos = self.here();
                self.parse_value_event()
            }
        }
    }

    fn parse_comma_or_end(&mut self) -> Result<Event> {
        let frame = *self.frames.last().expect("comma state outside container");
        match self.peek_char() {
            Some(',') => {
                self.advance();
                self.skip_whitespace()?;
                self.event_pos = self.here();
                match frame {
                    Frame::Array => {
                        // A close bracket right after the comma is a
                        // trailing comma, tolerated only in lenient mode.
                        if !self.cfg.strict && self.peek_char() == Some(']') {
                            self.advance();
                            return self.close_array();
                        }
                        self.parse_value_event()
                    }
                    Frame::Object => {
                        if !self.cfg.strict && self.peek_char() == Some('}') {
                            self.advance();
                            return self.close_object();
                        }
                        self.parse_key()
                    }
                }
            }
            Some(']') if frame == Frame::Array => {
                self.advance();
                self.close_array()
            }
            Some('}') if frame == Frame::Object => {
                self.advance();
                self.close_object()
            }
            _ => Err(self.unexpected_here()),
        }
    }

    fn parse_key(&mut self) -> Result<Event> {
        match self.peek_char() {
            Some('"') => {
                self.advance();
                let key = self.parse_string()?;
                self.expect = Expect::Colon;
                Ok(Event::String(key))
            }
            _ => Err(self.unexpected_here()),
        }
    }

    fn parse_value_event(&mut self) -> Result<Event> {
        match self.peek_char() {
            None => Err(self.err_here(ErrorCode::UnexpectedEof)),
            Some('{') => {
                self.advance();
                self.push_frame(Frame::Object)?;
                self.expect = Expect::FirstKeyOrEnd;
                Ok(Event::ObjectStart)
            }
            Some('[') => {
                self.advance();
                self.push_frame(Frame::Array)?;
                self.expect = Expect::FirstValueOrEnd;
                Ok(Event::ArrayStart)
            }
            Some('"') => {
                self.advance();
                let value = self.parse_string()?;
                self.after_value();
                Ok(Event::String(value))
            }
            Some('t') => {
                self.parse_literal("true")?;
                self.after_value();
                Ok(Event::Bool(true))
            }
            Some('f') => {
                self.parse_literal("false")?;
                self.after_value();
                Ok(Event::Bool(false))
            }
            Some('n') => {
                self.parse_literal("null")?;
                self.after_value();
                Ok(Event::Null)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let event = self.parse_number()?;
                self.after_value();
                Ok(event)
            }
            Some('+' | '.') if !self.cfg.strict => {
                let event = self.parse_number()?;
                self.after_value();
                Ok(event)
            }
            Some(_) => Err(self.unexpected_here()),
        }
    }

    fn after_value(&mut self) {
        self.expect = if self.frames.is_empty() {
            if self.cfg.streaming {
                Expect::StreamValue
            } else {
                Expect::End
            }
        } else {
            Expect::CommaOrEnd
        };
    }

    fn close_array(&mut self) -> Result<Event> {
        self.frames.pop();
        self.after_value();
        Ok(Event::ArrayEnd)
    }

    fn close_object(&mut self) -> Result<Event> {
        self.frames.pop();
        self.after_value();
        Ok(Event::ObjectEnd)
    }

    fn push_frame(&mut self, frame: Frame) -> Result<()> {
        if self.frames.len() >= self.cfg.max_depth {
            return Err(Error::syntax(
                ErrorCode::ExceededDepthLimit,
                self.event_pos.line,
                self.event_pos.column,
            ));
        }
        self.frames.push(frame);
        Ok(())
    }

    fn parse_literal(&mut self, literal: &'static str) -> Result<()> {
        for expected in literal.chars() {
            let pos = self.here();
            match self.advance() {
                Some(c) if c == expected => {}
                Some(c) => return Err(self.err_at(ErrorCode::UnexpectedCharacter(c), pos)),
                None => return Err(self.err_at(ErrorCode::UnexpectedEof, pos)),
            }
        }
        Ok(())
    }

    fn parse_string(&mut self) -> Result<FastStr> {
        let mut buf = String::new();
        loop {
            let pos = self.here();
            let Some(c) = self.advance() else {
                return Err(self.err_here(ErrorCode::UnexpectedEof));
            };
            if self.cfg.strict && self.last_malformed {
                return Err(self.err_at(ErrorCode::InvalidUtf, pos));
            }
            match c {
                '"' => return Ok(FastStr::from(buf)),
                '\\' => self.parse_escape(&mut buf)?,
                c if (c as u32) < 0x20 => {
                    if self.cfg.strict {
                        return Err(self.err_at(ErrorCode::ControlCharacterInString, pos));
                    }
                    buf.push(c);
                }
                c => buf.push(c),
            }
        }
    }

    fn parse_escape(&mut self, buf: &mut String) -> Result<()> {
        let pos = self.here();
        let Some(c) = self.advance() else {
            return Err(self.err_here(ErrorCode::UnexpectedEof));
        };
        match c {
            '"' => buf.push('"'),
            '\\' => buf.push('\\'),
            '/' => buf.push('/'),
            'b' => buf.push('\u{0008}'),
            'f' => buf.push('\u{000C}'),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'u' => return self.parse_unicode_escape(buf),
            _ => return Err(self.err_at(ErrorCode::InvalidEscape, pos)),
        }
        Ok(())
    }

    /// Handle the payload of a `\u` escape, pairing surrogates across a
    /// following `\uXXXX` where possible. In lenient mode every unpairable
    /// half becomes U+FFFD; in strict mode it is an error.
    fn parse_unicode_escape(&mut self, buf: &mut String) -> Result<()> {
        let mut pos = self.here();
        let mut unit = self.hex4()?;
        loop {
            match unit {
                0xD800..=0xDBFF => {
                    if self.peek_char() != Some('\\') {
                        return self.unpaired_surrogate(buf, pos);
                    }
                    self.advance();
                    if self.peek_char() != Some('u') {
                        // Some other escape follows the lone high half.
                        self.unpaired_surrogate(buf, pos)?;
                        return self.parse_escape(buf);
                    }
                    self.advance();
                    pos = self.here();
                    let second = self.hex4()?;
                    if (0xDC00..=0xDFFF).contains(&second) {
                        let scalar = 0x1_0000 + ((unit - 0xD800) << 10) + (second - 0xDC00);
                        buf.push(char::from_u32(scalar).unwrap_or(REPLACEMENT));
                        return Ok(());
                    }
                    // The second escape was not a low half; replace the
                    // first and reconsider the second on its own.
                    self.unpaired_surrogate(buf, pos)?;
                    unit = second;
                }
                0xDC00..=0xDFFF => return self.unpaired_surrogate(buf, pos),
                _ => {
                    buf.push(char::from_u32(unit).unwrap_or(REPLACEMENT));
                    return Ok(());
                }
            }
        }
    }

    fn unpaired_surrogate(&self, buf: &mut String, pos: Position) -> Result<()> {
        if self.cfg.strict {
            return Err(self.err_at(ErrorCode::InvalidUnicodeScalar, pos));
        }
        buf.push(REPLACEMENT);
        Ok(())
    }

    fn hex4(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let pos = self.here();
            let Some(c) = self.advance() else {
                return Err(self.err_here(ErrorCode::UnexpectedEof));
            };
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.err_at(ErrorCode::InvalidEscape, pos))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Event> {
        let start = self.event_pos;
        let mut buf = String::new();
        let mut is_float = false;

        match self.peek_char() {
            Some('-') => {
                buf.push('-');
                self.advance();
            }
            // Only reachable in lenient mode; the canonical forms all
            // parse without the redundant sign.
            Some('+') => {
                self.advance();
            }
            _ => {}
        }

        let mut int_digits = 0usize;
        match self.peek_char() {
            Some('0') => {
                buf.push('0');
                self.advance();
                int_digits = 1;
                if matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                    return Err(self.err_here(ErrorCode::InvalidNumber));
                }
            }
            Some('1'..='9') => {
                while let Some(c) = self.peek_char() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    buf.push(c);
                    self.advance();
                    int_digits += 1;
                }
            }
            Some('.') if !self.cfg.strict => {}
            Some(_) => return Err(self.err_here(ErrorCode::InvalidNumber)),
            None => return Err(self.err_here(ErrorCode::UnexpectedEof)),
        }

        if self.peek_char() == Some('.') {
            self.advance();
            if int_digits == 0 {
                buf.push('0');
            }
            buf.push('.');
            is_float = true;
            let mut frac_digits = 0usize;
            while let Some(c) = self.peek_char() {
                if !c.is_ascii_digit() {
                    break;
                }
                buf.push(c);
                self.advance();
                frac_digits += 1;
            }
            // A trailing point is rejected in both modes.
            if frac_digits == 0 {
                return Err(self.err_here(ErrorCode::InvalidNumber));
            }
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            buf.push('e');
            is_float = true;
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                buf.push(sign);
                self.advance();
            }
            let mut exp_digits = 0usize;
            while let Some(c) = self.peek_char() {
                if !c.is_ascii_digit() {
                    break;
                }
                buf.push(c);
                self.advance();
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return Err(self.err_here(ErrorCode::InvalidNumber));
            }
        }

        if !is_float {
            if let Ok(value) = buf.parse::<i64>() {
                return Ok(Event::Int64(value));
            }
            // Integer overflow promotes to the non-integer path.
        }
        if self.cfg.use_decimals {
            let value = Decimal::parse(&buf)
                .map_err(|_| self.err_at(ErrorCode::InvalidNumber, start))?;
            return Ok(Event::Decimal(value));
        }
        let value = buf
            .parse::<f64>()
            .map_err(|_| self.err_at(ErrorCode::InvalidNumber, start))?;
        Ok(Event::Double(value))
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.advance();
                }
                Some('/') if !self.cfg.strict && self.cfg.allow_comments => {
                    self.skip_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let pos = self.here();
        self.advance(); // the leading '/'
        match self.peek_char() {
            Some('/') => {
                self.advance();
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some('*') => {
                self.advance();
                let mut star = false;
                loop {
                    match self.advance() {
                        Some('/') if star => return Ok(()),
                        Some(c) => star = c == '*',
                        None => return Err(self.err_here(ErrorCode::UnexpectedEof)),
                    }
                }
            }
            _ => Err(self.err_at(ErrorCode::UnexpectedCharacter('/'), pos)),
        }
    }

    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        if self.peeked.is_none() {
            self.peeked = self.input.next();
            self.peeked_malformed = self.input.last_malformed();
        }
        self.peeked
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.peeked = None;
        self.last_malformed = self.peeked_malformed;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// The position of the next unconsumed code point.
    #[inline]
    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn err_at(&self, code: ErrorCode, pos: Position) -> Error {
        Error::syntax(code, pos.line, pos.column)
    }

    fn err_here(&self, code: ErrorCode) -> Error {
        self.err_at(code, self.here())
    }

    fn unexpected_here(&mut self) -> Error {
        match self.peek_char() {
            None => self.err_here(ErrorCode::UnexpectedEof),
            Some(c) => {
                let code = if self.cfg.strict && self.peeked_malformed {
                    ErrorCode::InvalidUtf
                } else {
                    ErrorCode::UnexpectedCharacter(c)
                };
                self.err_here(code)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn events(json: &str) -> Vec<Event> {
        events_with(json.as_bytes(), ParseCfg::new())
    }

    fn events_with(data: &[u8], cfg: ParseCfg) -> Vec<Event> {
        let mut parser = Parser::new(data, cfg);
        let mut out = Vec::new();
        loop {
            let event = parser.next_event().unwrap();
            let done = event == Event::EndOfInput;
            out.push(event);
            if done {
                return out;
            }
        }
    }

    fn error_of(data: &str, cfg: ParseCfg) -> Error {
        let mut parser = Parser::from_str(data, cfg);
        loop {
            match parser.next_event() {
                Ok(Event::EndOfInput) => panic!("no error in {data:?}"),
                Ok(_) => {}
                Err(e) => return e,
            }
        }
    }

    #[test]
    fn test_event_stream_order() {
        use Event::*;
        assert_eq!(
            events(r#"{"a":1,"b":[true,null,"x"]}"#),
            vec![
                ObjectStart,
                String("a".into()),
                Int64(1),
                String("b".into()),
                ArrayStart,
                Bool(true),
                Null,
                String("x".into()),
                ArrayEnd,
                ObjectEnd,
                EndOfInput,
            ]
        );
    }

    #[test]
    fn test_empty_containers() {
        use Event::*;
        assert_eq!(events("{}"), vec![ObjectStart, ObjectEnd, EndOfInput]);
        assert_eq!(events("[]"), vec![ArrayStart, ArrayEnd, EndOfInput]);
    }

    #[test]
    fn test_number_classification() {
        use Event::*;
        assert_eq!(events("0"), vec![Int64(0), EndOfInput]);
        assert_eq!(events("-42"), vec![Int64(-42), EndOfInput]);
        assert_eq!(events("1.5e2"), vec![Double(150.0), EndOfInput]);
        assert_eq!(events("1E-2"), vec![Double(0.01), EndOfInput]);
        // One past i64::MAX promotes to a double by default.
        assert_eq!(
            events("9223372036854775808"),
            vec![Double(9.223372036854776e18), EndOfInput]
        );
        assert_eq!(
            events("9223372036854775807"),
            vec![Int64(i64::MAX), EndOfInput]
        );
    }

    #[test]
    fn test_use_decimals_classification() {
        use Event::*;
        let cfg = ParseCfg::new().with_use_decimals(true);
        assert_eq!(
            events_with(b"1.5e2", cfg),
            vec![Decimal("1.5e2".parse().unwrap()), EndOfInput]
        );
        assert_eq!(
            events_with(b"9223372036854775808", cfg),
            vec![
                Decimal("9223372036854775808".parse().unwrap()),
                EndOfInput
            ]
        );
        // Integer literals in range stay integers.
        assert_eq!(events_with(b"7", cfg), vec![Int64(7), EndOfInput]);
    }

    #[test]
    fn test_lenient_number_forms() {
        use Event::*;
        assert_eq!(events("+5"), vec![Int64(5), EndOfInput]);
        assert_eq!(events(".5"), vec![Double(0.5), EndOfInput]);
        let strict = ParseCfg::new().with_strict(true);
        assert!(matches!(
            error_of("+5", strict).code(),
            ErrorCode::UnexpectedCharacter('+')
        ));
        assert!(matches!(
            error_of(".5", strict).code(),
            ErrorCode::UnexpectedCharacter('.')
        ));
    }

    #[test]
    fn test_number_rejects_both_modes() {
        for cfg in [ParseCfg::new(), ParseCfg::new().with_strict(true)] {
            assert!(matches!(error_of("5.", cfg).code(), ErrorCode::InvalidNumber));
            assert!(matches!(error_of("01", cfg).code(), ErrorCode::InvalidNumber));
            assert!(matches!(error_of("1e", cfg).code(), ErrorCode::InvalidNumber));
        }
    }

    #[test]
    fn test_string_escapes() {
        use Event::*;
        assert_eq!(
            events(r#""a\"b\\c\/d\b\f\n\r\t""#),
            vec![
                String("a\"b\\c/d\u{8}\u{c}\n\r\t".into()),
                EndOfInput
            ]
        );
        assert_eq!(events(r#""é""#), vec![String("é".into()), EndOfInput]);
    }

    #[test]
    fn test_surrogate_pair_combines() {
        use Event::*;
        assert_eq!(
            events(r#""\uD834\uDD1E""#),
            vec![String("𝄞".into()), EndOfInput]
        );
        // Strict mode is fine with a well-formed pair.
        assert_eq!(
            events_with(br#""\uD834\uDD1E""#, ParseCfg::new().with_strict(true)),
            vec![String("𝄞".into()), EndOfInput]
        );
    }

    #[test]
    fn test_unpaired_surrogate_lenient_vs_strict() {
        use Event::*;
        assert_eq!(
            events(r#""\uD800""#),
            vec![String("\u{FFFD}".into()), EndOfInput]
        );
        assert_eq!(
            events(r#""\uD800x""#),
            vec![String("\u{FFFD}x".into()), EndOfInput]
        );
        assert_eq!(
            events(r#""\uD800\n""#),
            vec![String("\u{FFFD}\n".into()), EndOfInput]
        );
        assert_eq!(
            events(r#""\uD800𐐁""#),
            vec![String("\u{FFFD}𐐁".into()), EndOfInput]
        );
        let strict = ParseCfg::new().with_strict(true);
        assert!(matches!(
            error_of(r#""\uD800""#, strict).code(),
            ErrorCode::InvalidUnicodeScalar
        ));
    }

    #[test]
    fn test_control_characters_in_strings() {
        use Event::*;
        assert_eq!(
            events("\"a\tb\""),
            vec![String("a\tb".into()), EndOfInput]
        );
        let strict = ParseCfg::new().with_strict(true);
        assert!(matches!(
            error_of("\"a\tb\"", strict).code(),
            ErrorCode::ControlCharacterInString
        ));
    }

    #[test]
    fn test_comments() {
        use Event::*;
        assert_eq!(
            events("// c\n[1 /* inline */, 2]"),
            vec![ArrayStart, Int64(1), Int64(2), ArrayEnd, EndOfInput]
        );
        let strict = ParseCfg::new().with_strict(true);
        let err = error_of("// c\n{\"a\":1,}", strict);
        assert!(matches!(err.code(), ErrorCode::UnexpectedCharacter('/')));
        assert_eq!((err.line(), err.column()), (1, 1));

        let no_comments = ParseCfg::new().with_allow_comments(false);
        assert!(matches!(
            error_of("// c\n1", no_comments).code(),
            ErrorCode::UnexpectedCharacter('/')
        ));
        assert!(matches!(
            error_of("/* open", ParseCfg::new()).code(),
            ErrorCode::UnexpectedEof
        ));
    }

    #[test]
    fn test_trailing_commas() {
        use Event::*;
        assert_eq!(
            events("[1,]"),
            vec![ArrayStart, Int64(1), ArrayEnd, EndOfInput]
        );
        assert_eq!(
            events(r#"{"a":1,}"#),
            vec![
                ObjectStart,
                String("a".into()),
                Int64(1),
                ObjectEnd,
                EndOfInput
            ]
        );
        let strict = ParseCfg::new().with_strict(true);
        assert!(matches!(
            error_of("[1,]", strict).code(),
            ErrorCode::UnexpectedCharacter(']')
        ));
        assert!(matches!(
            error_of(r#"{"a":1,}"#, strict).code(),
            ErrorCode::UnexpectedCharacter('}')
        ));
        // An empty slot is an error in either mode.
        assert!(matches!(
            error_of("[,1]", ParseCfg::new()).code(),
            ErrorCode::UnexpectedCharacter(',')
        ));
    }

    #[test]
    fn test_depth_limit() {
        let cfg = ParseCfg::new().with_max_depth(3);
        let err = error_of("[[[[1]]]]", cfg);
        assert!(matches!(err.code(), ErrorCode::ExceededDepthLimit));
        assert_eq!((err.line(), err.column()), (1, 4));
        // Exactly at the limit is fine.
        let mut parser = Parser::from_str("[[[1]]]", cfg);
        while parser.next_event().unwrap() != Event::EndOfInput {}
    }

    #[test]
    fn test_error_positions() {
        let err = error_of("{\n  1}", ParseCfg::new());
        assert!(matches!(err.code(), ErrorCode::UnexpectedCharacter('1')));
        assert_eq!((err.line(), err.column()), (2, 3));

        let err = error_of("", ParseCfg::new());
        assert!(matches!(err.code(), ErrorCode::UnexpectedEof));
        assert_eq!((err.line(), err.column()), (1, 1));

        let err = error_of("tru", ParseCfg::new());
        assert!(matches!(err.code(), ErrorCode::UnexpectedEof));
    }

    #[test]
    fn test_trailing_data() {
        let err = error_of("1 2", ParseCfg::new());
        assert!(matches!(err.code(), ErrorCode::TrailingData));
        assert_eq!((err.line(), err.column()), (1, 3));
    }

    #[test]
    fn test_streaming_documents() {
        use Event::*;
        let cfg = ParseCfg::new().with_streaming(true);
        assert_eq!(
            events_with(b"1 2 {}", cfg),
            vec![Int64(1), Int64(2), ObjectStart, ObjectEnd, EndOfInput]
        );
        assert_eq!(events_with(b"  ", cfg), vec![EndOfInput]);
    }

    #[test]
    fn test_utf16_input() {
        use Event::*;
        // {"1":2} in UTF-16 LE with BOM.
        let mut data: Vec<u8> = vec![0xFF, 0xFE];
        for unit in "{\"1\":2}".encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(
            events_with(&data, ParseCfg::new()),
            vec![ObjectStart, String("1".into()), Int64(2), ObjectEnd, EndOfInput]
        );
    }

    #[test]
    fn test_bom_only_input_is_eof() {
        let mut parser = Parser::new(b"\xEF\xBB\xBF", ParseCfg::new());
        let err = parser.next_event().unwrap_err();
        assert!(matches!(err.code(), ErrorCode::UnexpectedEof));
    }

    #[test]
    fn test_malformed_bytes_strict_vs_lenient() {
        // An overlong sequence inside a string.
        let data = b"\"a\xC0\xAFb\"";
        let mut parser = Parser::new(data, ParseCfg::new());
        assert_eq!(
            parser.next_event().unwrap(),
            Event::String("a\u{FFFD}b".into())
        );
        let mut parser = Parser::new(data, ParseCfg::new().with_strict(true));
        assert!(matches!(
            parser.next_event().unwrap_err().code(),
            ErrorCode::InvalidUtf
        ));
    }

    #[test]
    fn test_position_of_events() {
        let mut parser = Parser::from_str("[10, true]", ParseCfg::new());
        parser.next_event().unwrap();
        assert_eq!(parser.position(), Position { line: 1, column: 1 });
        parser.next_event().unwrap();
        assert_eq!(parser.position(), Position { line: 1, column: 2 });
        parser.next_event().unwrap();
        assert_eq!(parser.position(), Position { line: 1, column: 6 });
    }

    #[test]
    fn test_end_of_input_is_fused() {
        let mut parser = Parser::from_str("1", ParseCfg::new());
        assert_eq!(parser.next_event().unwrap(), Event::Int64(1));
        assert_eq!(parser.next_event().unwrap(), Event::EndOfInput);
        assert_eq!(parser.next_event().unwrap(), Event::EndOfInput);
    }
}
