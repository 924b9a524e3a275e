//! Property-based tests with proptest.
//!
//! Generate random acyclic value trees, render them as compact JSON text,
//! parse them back, and check the result is structurally equal. Number
//! literals are generated as text, so equality also checks that no digit
//! is lost on the way through the parser.

mod common;

use common::render;
use proptest::prelude::*;
use refjson::{Error, Number, ParseErrorKind, Value, parse};

// -- Leaf strategies --

/// JSON number literal, including long mantissas and exponents.
fn number_literal() -> impl Strategy<Value = String> {
    "-?(0|[1-9][0-9]{0,24})(\\.[0-9]{1,8})?([eE][+-]?[0-9]{1,3})?"
}

/// Object key. `$` is left out so no generated object takes the
/// reference marker shape.
fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ ./~%-]{0,8}"
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number_literal().prop_map(|text| {
            let number: Number = text.parse().unwrap_or_else(|e| panic!("{text}: {e}"));
            Value::Number(number)
        }),
        any::<String>().prop_map(Value::String),
    ]
}

/// Value tree up to a few levels deep.
fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::array),
            prop::collection::vec((key(), inner), 0..6).prop_map(Value::object),
        ]
    })
}

/// Token that is valid on its own but can never follow a complete value.
fn trailing_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(":".to_string()),
        Just(",".to_string()),
        Just("null".to_string()),
        Just("\"x\"".to_string()),
        number_literal(),
    ]
}

// -- Properties --

proptest! {
    #[test]
    fn rendered_value_parses_back(v in value()) {
        let text = render(&v);
        let parsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{text}: {e}")))?;
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn pretty_whitespace_is_ignored(v in value(), ws in "[ \t\r\n]{0,4}") {
        let text = render(&v);
        let padded = format!("{ws}{text}{ws}");
        let parsed = parse(&padded).map_err(|e| TestCaseError::fail(format!("{padded}: {e}")))?;
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn trailing_tokens_are_rejected(
        v in value(),
        ws in "[ \t\n]{1,3}",
        extra in trailing_token(),
    ) {
        let text = render(&v);
        let input = format!("{text}{ws}{extra}");
        let err = parse(&input).expect_err("trailing token must fail");
        prop_assert_eq!(err.offset(), text.chars().count() + ws.len());
        let is_trailing = matches!(
            err,
            Error::Parse(ref e) if e.kind == ParseErrorKind::UnexpectedCharacters
        );
        prop_assert!(is_trailing, "{}: {}", input, err);
    }

    #[test]
    fn number_text_is_kept(text in number_literal()) {
        let v = parse(&text).map_err(|e| TestCaseError::fail(format!("{text}: {e}")))?;
        prop_assert_eq!(v.as_number().map(Number::as_str), Some(text.as_str()));
    }

    #[test]
    fn arbitrary_text_never_panics(input in "\\PC{0,64}") {
        if let Ok(v) = parse(&input) {
            v.unlink();
        }
    }

    #[test]
    fn json_like_text_never_panics(input in "[\\[\\]{}:,\"0-9a-z$#/ .eE+\\\\-]{0,64}") {
        if let Ok(v) = parse(&input) {
            v.unlink();
        }
    }
}
