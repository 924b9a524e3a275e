/// Source location for error reporting.
///
/// `offset` is a zero-based character index into the input; `line` and
/// `column` are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Location of the first character of the input.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Token kinds produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening brace `{`.
    OpenBrace,
    /// Closing brace `}`.
    CloseBrace,
    /// Opening bracket `[`.
    OpenBracket,
    /// Closing bracket `]`.
    CloseBracket,
    /// Colon `:`.
    Colon,
    /// Comma `,`.
    Comma,
    /// Number literal, text kept verbatim.
    Number,
    /// Double-quoted string, text already unescaped.
    String,
    /// Run of ASCII letters and underscores (`true`, `false`, `null`, ...).
    Symbol,
    /// End of input.
    End,
}

impl TokenKind {
    /// Whether this is one of the single-character structural tokens.
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        matches!(
            self,
            Self::OpenBrace
                | Self::CloseBrace
                | Self::OpenBracket
                | Self::CloseBracket
                | Self::Colon
                | Self::Comma
        )
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}
