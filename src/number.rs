//! Lossless numeric literals.
//!
//! A [`Number`] keeps the literal exactly as it appeared in the source, so
//! values such as `12345678901234567890` or `0.1000000000000000055511` never
//! pass through a fixed-width float unless the caller asks for it.

use std::fmt;
use std::str::FromStr;

use crate::lexer::Tokenizer;
use crate::token::TokenKind;

/// Largest number of significant digits an `f64` round-trips reliably.
const MAX_F64_DIGITS: usize = 15;

/// Errors raised when building or converting a [`Number`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    /// Text is not a valid JSON number literal.
    #[error("invalid number literal \"{0}\"")]
    Invalid(String),
    /// NaN or an infinity cannot be represented as a literal.
    #[error("number is not finite")]
    NotFinite,
    /// Conversion to `f64` would drop significant digits.
    #[error("cannot convert to f64, number contains more than 15 digits")]
    PrecisionLoss,
    /// Literal magnitude is beyond the `f64` range.
    #[error("cannot convert to f64, number overflow")]
    Overflow,
    /// Non-zero literal too small for `f64`.
    #[error("cannot convert to f64, number underflow")]
    Underflow,
}

/// A number literal preserved verbatim.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Number {
    literal: String,
}

impl Number {
    /// Wrap text the tokenizer already validated.
    pub(crate) const fn from_literal(literal: String) -> Self {
        Self { literal }
    }

    /// The literal text, exactly as parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Whether the literal has neither a fraction nor an exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.literal.contains(['.', 'e', 'E'])
    }

    /// Integral value, if the literal is an integer that fits in `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.is_integer().then(|| self.literal.parse().ok()).flatten()
    }

    /// Integral value, if the literal is an integer that fits in `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.is_integer().then(|| self.literal.parse().ok()).flatten()
    }

    /// Convert to `f64`, refusing conversions that lose information.
    ///
    /// # Errors
    ///
    /// `PrecisionLoss` when the literal has more significant digits than an
    /// `f64` holds, `Overflow` / `Underflow` when it is out of range.
    pub fn to_f64(&self) -> Result<f64, NumberError> {
        let digits = significant_digits(&self.literal);
        if digits.len() > MAX_F64_DIGITS {
            return Err(NumberError::PrecisionLoss);
        }
        let value: f64 = self
            .literal
            .parse()
            .map_err(|_| NumberError::Invalid(self.literal.clone()))?;
        if value.is_infinite() {
            return Err(NumberError::Overflow);
        }
        if value == 0.0 && !digits.is_empty() {
            return Err(NumberError::Underflow);
        }
        Ok(value)
    }
}

/// Mantissa digits with leading and trailing zeros removed.
fn significant_digits(literal: &str) -> String {
    let mantissa = literal.split(['e', 'E']).next().unwrap_or_default();
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').trim_end_matches('0').to_string()
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::Invalid(s.to_string());
        let token = Tokenizer::new(s).advance().map_err(|_| invalid())?;
        if token.kind != TokenKind::Number || token.text != s {
            return Err(invalid());
        }
        Ok(Self::from_literal(token.text))
    }
}

impl TryFrom<f64> for Number {
    type Error = NumberError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumberError::NotFinite);
        }
        Ok(Self::from_literal(value.to_string()))
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::from_literal(value.to_string())
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
