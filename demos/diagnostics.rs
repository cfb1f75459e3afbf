//! Show how malformed input is reported without stopping the lexer.

use exlex::{LexerOptions, tokenize, tokenize_with};

fn main() {
    // Unterminated sigil inside an interpolation
    let input = "msg = \"total: #{~r/[0-9]+\n";
    let lexed = tokenize(input);
    println!("{} token(s) for {input:?}", lexed.tokens.len());
    for diagnostic in &lexed.diagnostics {
        let (line, column) = lexed.source.line_col(diagnostic.origin);
        println!("  {diagnostic}");
        println!("    Kind: {:?}", diagnostic.kind);
        println!("    Opened at: line {line}, column {column}");
    }

    println!();

    // Stray characters become tokens and, optionally, diagnostics
    let input = "a $ b";
    match tokenize(input).into_result() {
        Ok(tokens) => println!("Lexed OK ({} tokens, unexpected)", tokens.len()),
        Err(e) => println!("Lex error: {e}"),
    }
    let quiet = tokenize_with(input, LexerOptions::new().report_bad_characters(false));
    println!(
        "Without reporting: {} diagnostic(s), {} token(s)",
        quiet.diagnostics.len(),
        quiet.tokens.len()
    );
}
