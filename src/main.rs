//! CLI tool to dump tokens and report lexical diagnostics for Elixir files.

use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use exlex::{Lexed, tokenize};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: exlex <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens  Print one line per token");
        eprintln!("  check   Report unterminated literals and bad characters");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  exlex tokens lib/app.ex");
        eprintln!("  RUST_LOG=exlex=trace exlex check lib/app.ex");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "tokens" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
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

        let lexed = tokenize(&content);
        if command == "tokens" {
            print_tokens(&lexed);
        }
        if report(path, &lexed) {
            had_error = true;
        } else if command == "check" {
            eprintln!("{path}: ok ({} token(s))", lexed.tokens.len());
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(lexed: &Lexed) {
    for token in &lexed.tokens {
        let (line, column) = lexed.source.line_col(token.span.start);
        println!(
            "{line}:{column}\t{:?}\t{:?}\t{:?}",
            token.kind,
            token.state,
            lexed.text(token)
        );
    }
}

/// Print diagnostics for `path`; returns whether there were any.
fn report(path: &str, lexed: &Lexed) -> bool {
    for diagnostic in &lexed.diagnostics {
        let (line, column) = lexed.source.line_col(diagnostic.origin);
        eprintln!("{path}:{line}:{column}: {}", diagnostic.kind);
    }
    !lexed.diagnostics.is_empty()
}
