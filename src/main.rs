//! CLI tool to validate, tokenize, and inspect JSON documents with
//! circular references.

use std::fs;
use std::process::ExitCode;

use refjson::{ParseOptions, TokenKind, parse_with_options, tokenize};

fn usage() -> ExitCode {
    eprintln!("Usage: refjson <command> [--raw-refs] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  validate  Check if document(s) parse");
    eprintln!("  tokens    Print the token stream of document(s)");
    eprintln!("  dump      Print the parsed value tree of document(s)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --raw-refs  Keep {{\"$ref\": ...}} markers instead of resolving them");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  refjson validate graph.json");
    eprintln!("  refjson dump --raw-refs graph.json");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    let mut options = ParseOptions::new();
    let mut files = Vec::new();
    for arg in &args[2..] {
        if arg == "--raw-refs" {
            options = options.with_circular_refs(false);
        } else {
            files.push(arg.as_str());
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "validate" => match parse_with_options(&content, &options) {
                Ok(value) => {
                    eprintln!("{path}: valid ({})", value.kind());
                    value.unlink();
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "tokens" => match tokenize(&content) {
                Ok(tokens) => {
                    for token in tokens {
                        let kind = if token.kind.is_delimiter() {
                            "Delimiter".to_string()
                        } else {
                            format!("{:?}", token.kind)
                        };
                        let text = if token.kind == TokenKind::String {
                            format!("{:?}", token.text)
                        } else {
                            token.text
                        };
                        println!("{}\t{kind}\t{text}", token.span.offset);
                    }
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "dump" => match parse_with_options(&content, &options) {
                Ok(value) => {
                    println!("{value:#?}");
                    value.unlink();
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
