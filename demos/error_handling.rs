//! Demonstrate error handling for invalid documents.

fn main() {
    // Malformed number
    match refjson::parse("{\n  \"ratio\": 1.\n}") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(refjson::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
        Err(refjson::Error::Parse(e)) => {
            println!("Parse error: {e}");
        }
    }

    println!();

    // Truncated document
    match refjson::parse("[1, 2,") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(refjson::Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(refjson::Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Offset: {}", e.span.offset);
        }
    }

    println!();

    // Reference to a container that is not an open ancestor
    match refjson::parse(r##"{"a": {}, "b": {"c": {"$ref": "#/a"}}}"##) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(e) => {
            println!("Error: {e}");
            println!("  Offset: {}", e.offset());
        }
    }
}
