//! JSON parser with lossless numbers and circular reference resolution.
//!
//! Two things set this parser apart from a plain JSON reader:
//!
//! - number literals are kept as text ([`Number`]), so no digits are lost
//!   to a fixed-width float;
//! - objects of the form `{"$ref": "#/path"}` that point at an enclosing
//!   object or array are replaced with that very container, restoring the
//!   aliasing and cycles of the graph that was serialized.
//!
//! # Quick start
//!
//! ```
//! use refjson::parse;
//!
//! let value = parse(r##"{"id": 12345678901234567890, "self": {"$ref": "#"}}"##).unwrap();
//! assert_eq!(value.get("id").unwrap().as_number().unwrap().as_str(), "12345678901234567890");
//! assert!(value.get("self").unwrap().same_container(&value));
//! value.unlink();
//! ```
//!
//! ## Keep markers as plain objects
//!
//! ```
//! use refjson::{parse_with_options, ParseOptions};
//!
//! let opts = ParseOptions::new().with_circular_refs(false);
//! let value = parse_with_options(r##"{"$ref": "#/a"}"##, &opts).unwrap();
//! assert_eq!(value.get("$ref").unwrap().as_str(), Some("#/a"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod circular;
pub mod lexer;
pub mod number;
pub mod options;
pub mod parser;
pub mod pointer;
pub mod revive;
pub mod token;
pub mod value;

pub use circular::REF_KEY;
pub use lexer::{LexError, LexErrorKind, Tokenizer, tokenize};
pub use number::{Number, NumberError};
pub use options::ParseOptions;
pub use parser::{ParseError, ParseErrorKind};
pub use pointer::parse_pointer;
pub use revive::revive;
pub use token::{Span, Token, TokenKind};
pub use value::{Array, Map, Object, Value};

/// Unified error type covering both tokenizing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A tokenizer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Where in the input the error was detected.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }

    /// Zero-based character offset of the error.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span().offset
    }
}

/// Parse a document with default options.
pub fn parse(input: &str) -> Result<Value, Error> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a document with the given options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value, Error> {
    parser::parse_document(input, options)
}

/// Parse a document and pass the finished tree through [`revive`].
///
/// Circular references are already resolved (or left as markers) when the
/// reviver runs. A root removed by the reviver comes back as `Null`.
pub fn parse_with_reviver<F>(
    input: &str,
    options: &ParseOptions,
    reviver: F,
) -> Result<Value, Error>
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    let value = parse_with_options(input, options)?;
    Ok(revive(value, reviver).unwrap_or(Value::Null))
}
