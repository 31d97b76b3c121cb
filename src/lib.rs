//! # decjson
//!
//! A strongly-typed JSON codec with first-class decimal numbers.
//!
//! The crate is built from small layers, leaves first: a byte decoder that
//! sniffs UTF-8/16/32 and yields code points, a pull [`Parser`] emitting
//! structural [`Event`]s with line/column positions, the [`Value`] model
//! with its [`Object`] and [`Array`] containers, an assembler
//! ([`from_str`]/[`from_slice`]), an options-driven encoder
//! ([`to_string`]/[`to_vec`]/[`to_writer`]), and a typed accessor layer
//! whose errors carry a structural path like `user.addresses[0].zip`.
//!
//! ## Numbers
//!
//! A number literal keeps its source representation: an integer fitting
//! signed 64 bits is [`Value::Int64`]; anything else is [`Value::Double`],
//! or a scale-preserving [`Decimal`] when parsing with
//! [`ParseCfg::use_decimals`]. Integer literals that overflow `i64` promote
//! to `Double` (or `Decimal` under the option) instead of failing.
//!
//! ## Parsing
//!
//! ```
//! use decjson::{from_str, from_str_with, ParseCfg, Value};
//!
//! let value = from_str(r#"{"name": "ada", "scores": [1, 2.5]}"#).unwrap();
//! assert_eq!(value["name"], "ada");
//! assert_eq!(value["scores"][1], 2.5);
//!
//! // Lenient extensions are on by default and gated by `strict`.
//! assert!(from_str("// comment\n[1,]").is_ok());
//! assert!(from_str_with("[1,]", ParseCfg::new().with_strict(true)).is_err());
//! ```
//!
//! ## Typed access
//!
//! ```
//! use decjson::from_str;
//!
//! let value = from_str(r#"{"port": 8080, "hosts": ["a", "b"]}"#).unwrap();
//! let obj = value.get_object().unwrap();
//! assert_eq!(obj.get_i64("port").unwrap(), 8080);
//! assert_eq!(obj.get_i64_opt("missing").unwrap(), None);
//!
//! let err = obj.get_str("port").unwrap_err();
//! assert_eq!(err.to_string(), "port: expected string, found number");
//! ```
//!
//! ## Thread safety
//!
//! Values are plain data: share them freely once built. The parser and
//! encoder are single-threaded; distinct instances over distinct inputs are
//! independent.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod access;
mod config;
mod de;
mod decimal;
mod error;
mod index;
mod parser;
mod reader;
mod value;

pub mod format;
pub mod ser;
pub mod writer;

pub use crate::access::{AccessError, AccessErrorKind, Expected};
pub use crate::config::{EncodeCfg, ParseCfg, DEFAULT_MAX_DEPTH};
pub use crate::de::{from_slice, from_slice_with, from_str, from_str_with, ValueStream};
pub use crate::decimal::{Decimal, ParseDecimalError};
pub use crate::error::{Error, ErrorCode, Result};
pub use crate::index::Index;
pub use crate::parser::{Event, Parser, Position};
pub use crate::reader::Encoding;
pub use crate::ser::{
    to_string, to_string_pretty, to_string_with, to_vec, to_vec_with, to_writer, to_writer_with,
};
pub use crate::value::{Array, JsonType, Object, Value};
pub use crate::writer::ChunkedWriter;
