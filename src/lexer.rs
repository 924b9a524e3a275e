use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A digit was required after a sign, decimal point, or exponent marker.
    DigitExpected,
    /// A leading `0` followed by another digit (`01`).
    LeadingZero,
    /// Input ended before the closing quote.
    UnterminatedString,
    /// Backslash followed by a character outside the escape set.
    InvalidEscape(char),
    /// `\u` not followed by four hex digits, or a lone surrogate.
    InvalidUnicode,
    /// Character that cannot start any token; holds the rest of the input.
    InvalidToken(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigitExpected => write!(f, "invalid number, digit expected"),
            Self::LeadingZero => {
                write!(f, "invalid number, leading zero followed by a digit")
            }
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::InvalidEscape(ch) => {
                write!(f, "invalid escape character \"\\{ch}\"")
            }
            Self::InvalidUnicode => write!(f, "invalid unicode character"),
            Self::InvalidToken(part) => {
                write!(f, "syntax error in part \"{part}\"")
            }
        }
    }
}

/// Error produced during tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{kind} at char {}, line {}, column {}",
    span.offset,
    span.line,
    span.column
)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a whole document into a sequence of tokens.
///
/// The trailing end-of-input token is not included.
///
/// # Errors
///
/// Returns `LexError` on malformed numbers, strings, or characters that
/// cannot start a token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.advance()?;
        if token.kind == TokenKind::End {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

/// Pull-based tokenizer over a fully resident input.
///
/// Each call to [`Tokenizer::advance`] yields exactly one token and moves
/// the cursor past it. After the input is exhausted every call yields an
/// [`TokenKind::End`] token.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    /// Scan the next token.
    ///
    /// # Errors
    ///
    /// Returns `LexError` when the token being formed is malformed.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.span();

        let Some(ch) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::End,
                text: String::new(),
                span: start,
            });
        };

        let kind = match ch {
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '-' | '0'..='9' => return self.read_number(start),
            '"' => return self.read_string(start),
            c if c.is_ascii_alphabetic() || c == '_' => return Ok(self.read_symbol(start)),
            _ => {
                let rest = self.input[self.pos..].to_string();
                while self.peek().is_some() {
                    self.bump();
                }
                return Err(LexError {
                    kind: LexErrorKind::InvalidToken(rest),
                    span: start,
                });
            }
        };

        self.bump();
        Ok(Token {
            kind,
            text: ch.to_string(),
            span: start,
        })
    }

    /// Current cursor location.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span {
            offset: self.offset,
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.bump();
        }
    }

    fn error_here(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            span: self.span(),
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }
    }

    fn expect_digits(&mut self) -> Result<(), LexError> {
        if !matches!(self.peek(), Some('0'..='9')) {
            return Err(self.error_here(LexErrorKind::DigitExpected));
        }
        self.skip_digits();
        Ok(())
    }

    fn read_number(&mut self, start: Span) -> Result<Token, LexError> {
        let begin = self.pos;

        if self.peek() == Some('-') {
            self.bump();
        }

        match self.peek() {
            Some('0') => {
                self.bump();
                if matches!(self.peek(), Some('0'..='9')) {
                    return Err(self.error_here(LexErrorKind::LeadingZero));
                }
            }
            Some('1'..='9') => self.skip_digits(),
            _ => return Err(self.error_here(LexErrorKind::DigitExpected)),
        }

        if self.peek() == Some('.') {
            self.bump();
            self.expect_digits()?;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.expect_digits()?;
        }

        Ok(Token {
            kind: TokenKind::Number,
            text: self.input[begin..self.pos].to_string(),
            span: start,
        })
    }

    fn read_string(&mut self, start: Span) -> Result<Token, LexError> {
        self.bump(); // opening quote

        let mut value = String::new();
        loop {
            let escape_at = self.span();
            match self.bump() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        span: start,
                    });
                }
                Some('"') => break,
                Some('\\') => {
                    let decoded = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.read_unicode_escape(escape_at)?,
                        Some(c) => {
                            return Err(LexError {
                                kind: LexErrorKind::InvalidEscape(c),
                                span: escape_at,
                            });
                        }
                        None => {
                            return Err(LexError {
                                kind: LexErrorKind::UnterminatedString,
                                span: start,
                            });
                        }
                    };
                    value.push(decoded);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(Token {
            kind: TokenKind::String,
            text: value,
            span: start,
        })
    }

    /// Decode the code point after `\u`, joining a surrogate pair when the
    /// high half is followed by `\u` and a low half.
    fn read_unicode_escape(&mut self, escape_at: Span) -> Result<char, LexError> {
        let invalid = LexError {
            kind: LexErrorKind::InvalidUnicode,
            span: escape_at,
        };

        let high = self.read_hex4().ok_or_else(|| invalid.clone())?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or(invalid);
        }

        if self.bump() != Some('\\') || self.bump() != Some('u') {
            return Err(invalid);
        }
        let low = self.read_hex4().ok_or_else(|| invalid.clone())?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(invalid);
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or(invalid)
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self.peek()?.to_digit(16)?;
            self.bump();
            code = code * 16 + digit;
        }
        Some(code)
    }

    fn read_symbol(&mut self, start: Span) -> Token {
        let begin = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '_') {
            self.bump();
        }
        Token {
            kind: TokenKind::Symbol,
            text: self.input[begin..self.pos].to_string(),
            span: start,
        }
    }
}
