//! Syntax and serialization errors, annotated with line and column.

use core::fmt::{self, Debug, Display};
use core::result;
use std::error;

use thiserror::Error as ErrorTrait;

/// All errors that can occur while parsing or encoding JSON data.
///
/// Every parse error carries the 1-based line and column (counted in code
/// points since the last line break) at which it was detected.
pub struct Error {
    /// This `Box` keeps the size of `Error` small. A larger `Error` type was
    /// substantially slower due to all the functions that pass around
    /// `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `decjson::Error`.
pub type Result<T> = result::Result<T, Error>;

struct ErrorImpl {
    code: ErrorCode,
    line: usize,
    column: usize,
}

/// The reason a parse or encode operation failed.
#[derive(ErrorTrait, Debug)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input ended while a value, string, comment or escape was incomplete.
    #[error("unexpected end of input while parsing")]
    UnexpectedEof,

    /// A character that cannot start or continue the expected construct.
    #[error("unexpected character `{0}` while parsing")]
    UnexpectedCharacter(char),

    /// A `\` escape other than `\" \\ \/ \b \f \n \r \t \uXXXX`, or a
    /// malformed hex quad.
    #[error("invalid escape sequence in string")]
    InvalidEscape,

    /// A `\uXXXX` escape produced an unpaired surrogate in strict mode.
    #[error("invalid unicode scalar in `\\u` escape")]
    InvalidUnicodeScalar,

    /// A number literal that does not match the JSON number grammar.
    #[error("invalid number literal")]
    InvalidNumber,

    /// A raw control character below U+0020 inside a string in strict mode.
    #[error("control character found while parsing a string")]
    ControlCharacterInString,

    /// Non-whitespace input after the single top-level value.
    #[error("non-whitespace trailing data after the value")]
    TrailingData,

    /// Containers nested beyond the configured `max_depth`.
    #[error("nesting of objects and arrays exceeds the depth limit")]
    ExceededDepthLimit,

    /// Malformed UTF-8/16/32 input bytes in strict mode.
    #[error("malformed unicode in input")]
    InvalidUtf,

    /// An object key seen twice while duplicate keys are denied.
    #[error("duplicate object key `{0}`")]
    DuplicateKey(Box<str>),

    /// A NaN or infinite double reached the encoder while
    /// `allow_nonfinite_numbers` is unset.
    #[error("NaN or infinite number cannot be represented in JSON")]
    NonFiniteNumber,

    /// The underlying writer failed.
    #[error("io error while serializing")]
    Io(#[source] std::io::Error),
}

impl Error {
    /// One-based line number at which the error was detected.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1. Zero for errors with no input position,
    /// such as I/O failures.
    pub fn line(&self) -> usize {
        self.err.line
    }

    /// One-based column number at which the error was detected, counted in
    /// code points since the last line break.
    pub fn column(&self) -> usize {
        self.err.column
    }

    /// The reason this operation failed.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Returns true if this error came from the syntax layer rather than
    /// from a writer.
    pub fn is_syntax(&self) -> bool {
        !matches!(self.err.code, ErrorCode::Io(_))
    }

    #[cold]
    pub(crate) fn syntax(code: ErrorCode, line: usize, column: usize) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, line, column }),
        }
    }

    #[cold]
    pub(crate) fn encode(code: ErrorCode) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                line: 0,
                column: 0,
            }),
        }
    }

    #[cold]
    pub(crate) fn io(error: std::io::Error) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code: ErrorCode::Io(error),
                line: 0,
                column: 0,
            }),
        }
    }
}

#[allow(clippy::fallible_impl_from)]
impl From<Error> for std::io::Error {
    /// Convert a `decjson::Error` into an `std::io::Error`.
    ///
    /// Syntax and data errors are turned into `InvalidData` I/O errors.
    /// EOF errors are turned into `UnexpectedEof` I/O errors.
    fn from(e: Error) -> Self {
        match e.err.code {
            ErrorCode::Io(err) => err,
            ErrorCode::UnexpectedEof => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, e)
            }
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err.code {
            ErrorCode::Io(err) => err.source(),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.err.line == 0 {
            Display::fmt(&self.err.code, f)
        } else {
            write!(
                f,
                "{} at line {} column {}",
                self.err.code, self.err.line, self.err.column
            )
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({}, line: {}, column: {})",
            self.err.code, self.err.line, self.err.column
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = Error::syntax(ErrorCode::UnexpectedCharacter('/'), 2, 7);
        assert_eq!(
            err.to_string(),
            "unexpected character `/` while parsing at line 2 column 7"
        );
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn test_display_without_position() {
        let err = Error::encode(ErrorCode::NonFiniteNumber);
        assert_eq!(
            err.to_string(),
            "NaN or infinite number cannot be represented in JSON"
        );
    }

    #[test]
    fn test_into_io_error() {
        let err = Error::syntax(ErrorCode::UnexpectedEof, 1, 1);
        let io: std::io::Error = err.into();
        assert_eq!(io.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_error_size() {
        assert_eq!(std::mem::size_of::<Error>(), std::mem::size_of::<usize>());
    }
}
