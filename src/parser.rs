use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::Error;
use crate::circular::{self, StackEntry};
use crate::lexer::Tokenizer;
use crate::number::Number;
use crate::options::ParseOptions;
use crate::token::{Span, Token, TokenKind};
use crate::value::{Array, Map, Object, Value};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended where more tokens were required.
    UnexpectedEnd,
    /// A token is present but cannot start a value.
    ValueExpected,
    /// Symbol other than `true`, `false`, or `null`.
    UnknownSymbol(String),
    /// Object member must start with a string key.
    KeyExpected,
    /// Object key must be followed by `:`.
    ColonExpected,
    /// Object member must be followed by `,` or `}`.
    CommaOrObjectEnd,
    /// Array element must be followed by `,` or `]`.
    CommaOrArrayEnd,
    /// Content after a complete value.
    UnexpectedCharacters,
    /// Reference marker whose path is not an open ancestor.
    InvalidCircularReference(String),
    /// Containers nested deeper than the configured limit.
    NestingTooDeep(usize),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::ValueExpected => write!(f, "value expected"),
            Self::UnknownSymbol(s) => write!(f, "unknown symbol \"{s}\""),
            Self::KeyExpected => write!(f, "object key expected"),
            Self::ColonExpected => write!(f, "colon expected"),
            Self::CommaOrObjectEnd => {
                write!(f, "comma or end of object \"}}\" expected")
            }
            Self::CommaOrArrayEnd => {
                write!(f, "comma or end of array \"]\" expected")
            }
            Self::UnexpectedCharacters => write!(f, "unexpected characters"),
            Self::InvalidCircularReference(reference) => {
                write!(f, "invalid circular reference \"{reference}\"")
            }
            Self::NestingTooDeep(limit) => {
                write!(f, "maximum nesting depth of {limit} exceeded")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{kind} at char {}, line {}, column {}",
    span.offset,
    span.line,
    span.column
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Parse a complete document into a value tree.
///
/// # Errors
///
/// Returns the first lexical or grammatical error, or an invalid circular
/// reference. No partial tree is produced.
pub(crate) fn parse_document(input: &str, options: &ParseOptions) -> Result<Value, Error> {
    let mut tokenizer = Tokenizer::new(input);
    let current = tokenizer.advance()?;
    Parser {
        tokenizer,
        current,
        stack: Vec::new(),
        options: *options,
    }
    .parse()
}

/// State of one parse call. Never shared between calls.
struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
    /// Non-empty containers currently open, outermost first.
    stack: Vec<StackEntry>,
    options: ParseOptions,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Value, Error> {
        let value = self.parse_value()?;
        if self.current.kind != TokenKind::End {
            return Err(self.error(ParseErrorKind::UnexpectedCharacters));
        }
        Ok(value)
    }

    fn next(&mut self) -> Result<(), Error> {
        self.current = self.tokenizer.advance()?;
        Ok(())
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        Error::Parse(ParseError {
            kind,
            span: self.current.span,
        })
    }

    /// Error for a missing structural token. Running out of input is
    /// reported as such rather than as the missing token.
    fn expected(&self, kind: ParseErrorKind) -> Error {
        if self.current.kind == TokenKind::End {
            self.error(ParseErrorKind::UnexpectedEnd)
        } else {
            self.error(kind)
        }
    }

    /// Move the current token's text out and advance.
    fn take_text(&mut self) -> Result<String, Error> {
        let text = mem::take(&mut self.current.text);
        self.next()?;
        Ok(text)
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        match self.current.kind {
            TokenKind::OpenBrace => self.parse_object(),
            TokenKind::OpenBracket => self.parse_array(),
            TokenKind::String => Ok(Value::String(self.take_text()?)),
            TokenKind::Number => Ok(Value::Number(Number::from_literal(self.take_text()?))),
            TokenKind::Symbol => self.parse_symbol(),
            TokenKind::End => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            _ => Err(self.error(ParseErrorKind::ValueExpected)),
        }
    }

    fn parse_symbol(&mut self) -> Result<Value, Error> {
        let value = match self.current.text.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            other => {
                return Err(self.error(ParseErrorKind::UnknownSymbol(other.to_string())));
            }
        };
        self.next()?;
        Ok(value)
    }

    /// Push a stack entry for a non-empty container, enforcing the depth
    /// limit. Returns the entry's index.
    fn open(&mut self, container: Value, open: Span) -> Result<usize, Error> {
        if self.stack.len() >= self.options.max_depth {
            return Err(Error::Parse(ParseError {
                kind: ParseErrorKind::NestingTooDeep(self.options.max_depth),
                span: open,
            }));
        }
        self.stack.push(StackEntry {
            container,
            segment: String::new(),
        });
        Ok(self.stack.len() - 1)
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        let open = self.current.span;
        self.next()?;

        if self.current.kind == TokenKind::CloseBrace {
            self.next()?;
            return Ok(Value::Object(Rc::default()));
        }

        let object: Object = Rc::new(RefCell::new(Map::new()));
        let depth = self.open(Value::Object(Rc::clone(&object)), open)?;

        loop {
            if self.current.kind != TokenKind::String {
                return Err(self.expected(ParseErrorKind::KeyExpected));
            }
            let key = self.take_text()?;

            if self.current.kind != TokenKind::Colon {
                return Err(self.expected(ParseErrorKind::ColonExpected));
            }
            self.next()?;

            self.stack[depth].segment.clone_from(&key);
            let value = self.parse_value()?;
            object.borrow_mut().insert(key, value);

            if self.current.kind != TokenKind::Comma {
                break;
            }
            self.next()?;
        }

        if self.current.kind != TokenKind::CloseBrace {
            return Err(self.expected(ParseErrorKind::CommaOrObjectEnd));
        }
        self.next()?;
        self.stack.truncate(depth);

        let reference = circular::marker_reference(&object.borrow()).map(str::to_string);
        match reference {
            Some(reference) if self.options.circular_refs => {
                circular::resolve(&self.stack, &reference).ok_or_else(|| {
                    Error::Parse(ParseError {
                        kind: ParseErrorKind::InvalidCircularReference(reference),
                        span: open,
                    })
                })
            }
            _ => Ok(Value::Object(object)),
        }
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        let open = self.current.span;
        self.next()?;

        if self.current.kind == TokenKind::CloseBracket {
            self.next()?;
            return Ok(Value::Array(Rc::default()));
        }

        let array: Array = Rc::new(RefCell::new(Vec::new()));
        let depth = self.open(Value::Array(Rc::clone(&array)), open)?;

        loop {
            let index = array.borrow().len();
            self.stack[depth].segment = index.to_string();
            let value = self.parse_value()?;
            array.borrow_mut().push(value);

            if self.current.kind != TokenKind::Comma {
                break;
            }
            self.next()?;
        }

        if self.current.kind != TokenKind::CloseBracket {
            return Err(self.expected(ParseErrorKind::CommaOrArrayEnd));
        }
        self.next()?;
        self.stack.truncate(depth);

        Ok(Value::Array(array))
    }
}
