//! Tokenizer edge cases and error positions.

use refjson::{LexErrorKind, TokenKind, Tokenizer, tokenize};

// -----------------------------------------------------------
// Basic tokenizer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let tokens = tokenize("").expect("tokenize");
    assert!(tokens.is_empty());
}

#[test]
fn lex_only_whitespace() {
    let tokens = tokenize(" \t\r\n ").expect("tokenize");
    assert!(tokens.is_empty());
}

#[test]
fn lex_end_token_offset() {
    let mut tokenizer = Tokenizer::new("[1]  ");
    let mut last = tokenizer.advance().expect("token");
    while last.kind != TokenKind::End {
        last = tokenizer.advance().expect("token");
    }
    assert_eq!(last.span.offset, 5);
    assert!(last.text.is_empty());
}

#[test]
fn lex_document_kinds() {
    let tokens = tokenize(r#"{"a": [1, true]}"#).expect("tokenize");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenBrace,
            TokenKind::String,
            TokenKind::Colon,
            TokenKind::OpenBracket,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Symbol,
            TokenKind::CloseBracket,
            TokenKind::CloseBrace,
        ]
    );
}

#[test]
fn lex_token_offsets() {
    let tokens = tokenize(r#"{"a": [1, true]}"#).expect("tokenize");
    let offsets: Vec<_> = tokens.iter().map(|t| t.span.offset).collect();
    assert_eq!(offsets, vec![0, 1, 4, 6, 7, 8, 10, 14, 15]);
}

// -----------------------------------------------------------
// Numbers.
// -----------------------------------------------------------

#[test]
fn lex_valid_numbers() {
    for text in ["0", "-0", "3.14", "1e10", "1E-10", "-2.5e+3", "10.01e007"] {
        let tokens = tokenize(text).expect("tokenize");
        assert_eq!(tokens.len(), 1, "{text}");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, text);
    }
}

#[test]
fn lex_number_digit_expected_positions() {
    for (text, offset) in [("-", 1), ("1.", 2), ("1e", 2), ("-1.5E-", 6), ("[0.]", 3)] {
        let err = tokenize(text).expect_err(text);
        assert_eq!(err.kind, LexErrorKind::DigitExpected, "{text}");
        assert_eq!(err.span.offset, offset, "{text}");
    }
}

#[test]
fn lex_number_leading_zero() {
    let err = tokenize("[-01]").expect_err("leading zero");
    assert_eq!(err.kind, LexErrorKind::LeadingZero);
    assert_eq!(err.span.offset, 3);
}

#[test]
fn lex_number_followed_by_symbol() {
    let tokens = tokenize("12abc").expect("tokenize");
    assert_eq!(tokens[0].text, "12");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].span.offset, 2);
}

// -----------------------------------------------------------
// Strings.
// -----------------------------------------------------------

#[test]
fn lex_string_holds_decoded_text() {
    let tokens = tokenize(r#""tab\there é""#).expect("tokenize");
    assert_eq!(tokens[0].text, "tab\there é");
}

#[test]
fn lex_string_raw_unicode() {
    let tokens = tokenize("\"日本\"").expect("tokenize");
    assert_eq!(tokens[0].text, "日本");
}

#[test]
fn lex_unicode_escape_uppercase_hex() {
    let tokens = tokenize(r#""\u004A\u004a""#).expect("tokenize");
    assert_eq!(tokens[0].text, "JJ");
}

#[test]
fn lex_short_unicode_escape() {
    let err = tokenize(r#""\u12""#).expect_err("short escape");
    assert_eq!(err.kind, LexErrorKind::InvalidUnicode);
    assert_eq!(err.span.offset, 1);
}

#[test]
fn lex_unterminated_escape() {
    let err = tokenize("\"abc\\").expect_err("unterminated");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.offset, 0);
}

// -----------------------------------------------------------
// Invalid tokens.
// -----------------------------------------------------------

#[test]
fn lex_invalid_character() {
    let err = tokenize("{\"a\": 'b'}").expect_err("single quote");
    assert_eq!(err.kind, LexErrorKind::InvalidToken("'b'}".to_string()));
    assert_eq!(err.span.offset, 6);
}

#[test]
fn lex_plus_sign_is_invalid() {
    let err = tokenize("+1").expect_err("plus");
    assert!(matches!(err.kind, LexErrorKind::InvalidToken(_)));
    assert_eq!(err.span.offset, 0);
}

// -----------------------------------------------------------
// Error display.
// -----------------------------------------------------------

#[test]
fn display_lex_error() {
    let err = tokenize("[\n  1.]").expect_err("digit expected");
    let msg = err.to_string();
    assert!(msg.contains("digit expected"), "{msg}");
    assert!(msg.contains("char 6"), "{msg}");
    assert!(msg.contains("line 2"), "{msg}");
    assert!(msg.contains("column 5"), "{msg}");
}
