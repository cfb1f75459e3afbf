//! Initial-mode tokens, diagnostics and options.

mod common;

use common::{assert_partitions, kinds, pairs, texts};
use exlex::{
    DiagnosticKind, Lexer, LexerOptions, LexicalMode, Source, Span, StateId, TokenKind, tokenize,
    tokenize_with,
};

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let lexed = tokenize("");
    assert!(lexed.tokens.is_empty());
    assert!(lexed.diagnostics.is_empty());
    assert!(lexed.is_balanced());
}

#[test]
fn lex_single_space() {
    let lexed = tokenize(" ");
    assert_eq!(lexed.tokens.len(), 1);
    assert_eq!(lexed.tokens[0].kind, TokenKind::Whitespace);
    assert_eq!(lexed.tokens[0].span, Span::new(0, 1));
    assert_eq!(lexed.tokens[0].state, StateId::Initial);
    assert!(lexed.is_balanced());
}

#[test]
fn lex_semicolon() {
    let lexed = tokenize(";");
    assert_eq!(kinds(&lexed), vec![TokenKind::Semicolon]);
    assert!(lexed.is_balanced());
}

#[test]
fn lex_crlf_is_one_eol() {
    let lexed = tokenize("\r\n");
    assert_eq!(lexed.tokens.len(), 1);
    assert_eq!(lexed.tokens[0].kind, TokenKind::Eol);
    assert_eq!(lexed.tokens[0].span, Span::new(0, 2));
}

#[test]
fn lex_lone_cr_is_eol() {
    let lexed = tokenize("a\rb");
    assert_eq!(
        kinds(&lexed),
        vec![TokenKind::Identifier, TokenKind::Eol, TokenKind::Identifier]
    );
}

#[test]
fn lex_blank_lines() {
    let lexed = tokenize("\n\n");
    assert_eq!(kinds(&lexed), vec![TokenKind::Eol, TokenKind::Eol]);
}

#[test]
fn lex_comment_stops_at_line_break() {
    assert_eq!(
        pairs("# note\nx"),
        vec![
            (TokenKind::Comment, "# note".to_owned()),
            (TokenKind::Eol, "\n".to_owned()),
            (TokenKind::Identifier, "x".to_owned()),
        ]
    );
}

#[test]
fn lex_simple_expression() {
    let lexed = tokenize("x = foo(1, :ok)");
    assert_eq!(
        texts(&lexed),
        vec!["x", " ", "=", " ", "foo", "(", "1", ",", " ", ":ok", ")"]
    );
    assert_eq!(lexed.tokens[6].kind, TokenKind::Number);
    assert_eq!(lexed.tokens[9].kind, TokenKind::Atom);
    assert_partitions(&lexed);
}

// -----------------------------------------------------------
// Words.
// -----------------------------------------------------------

#[test]
fn lex_keyword_versus_identifier() {
    assert_eq!(
        pairs("when whenever"),
        vec![
            (TokenKind::Keyword, "when".to_owned()),
            (TokenKind::Whitespace, " ".to_owned()),
            (TokenKind::Identifier, "whenever".to_owned()),
        ]
    );
}

#[test]
fn lex_identifier_with_trailing_mark() {
    let lexed = tokenize("valid? save!");
    assert_eq!(texts(&lexed), vec!["valid?", " ", "save!"]);
}

#[test]
fn lex_unicode_identifier() {
    let lexed = tokenize("ñandú");
    assert_eq!(kinds(&lexed), vec![TokenKind::Identifier]);
    assert_eq!(lexed.tokens[0].span, Span::new(0, 5));
}

#[test]
fn lex_alias_chain() {
    assert_eq!(
        pairs("Foo.Bar"),
        vec![
            (TokenKind::Alias, "Foo".to_owned()),
            (TokenKind::Operator, ".".to_owned()),
            (TokenKind::Alias, "Bar".to_owned()),
        ]
    );
}

#[test]
fn lex_atoms() {
    let lexed = tokenize(":ok :Elixir :done?");
    let atoms: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Atom)
        .map(|t| lexed.text(t))
        .collect();
    assert_eq!(atoms, vec![":ok", ":Elixir", ":done?"]);
}

#[test]
fn lex_char_tokens() {
    let lexed = tokenize("?a ?\\n");
    assert_eq!(texts(&lexed), vec!["?a", " ", "?\\n"]);
    assert_eq!(lexed.tokens[0].kind, TokenKind::CharToken);
    assert_eq!(lexed.tokens[2].kind, TokenKind::CharToken);
}

// -----------------------------------------------------------
// Numbers and operators.
// -----------------------------------------------------------

#[test]
fn lex_numbers() {
    let lexed = tokenize("1_000 0x1F 0o17 0b101 3.14 1.0e-10");
    let numbers: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| lexed.text(t))
        .collect();
    assert_eq!(
        numbers,
        vec!["1_000", "0x1F", "0o17", "0b101", "3.14", "1.0e-10"]
    );
}

#[test]
fn lex_range_is_not_a_fraction() {
    assert_eq!(
        pairs("1..2"),
        vec![
            (TokenKind::Number, "1".to_owned()),
            (TokenKind::Operator, "..".to_owned()),
            (TokenKind::Number, "2".to_owned()),
        ]
    );
}

#[test]
fn lex_radix_prefix_without_digits() {
    assert_eq!(
        pairs("0x"),
        vec![
            (TokenKind::Number, "0".to_owned()),
            (TokenKind::Identifier, "x".to_owned()),
        ]
    );
}

#[test]
fn lex_operators_take_longest_match() {
    let lexed = tokenize("a |> b === c <<~ d");
    let ops: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Operator)
        .map(|t| lexed.text(t))
        .collect();
    assert_eq!(ops, vec!["|>", "===", "<<~"]);
}

#[test]
fn lex_brackets() {
    let lexed = tokenize("[{}]");
    assert_eq!(
        kinds(&lexed),
        vec![
            TokenKind::OpenBracket,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
            TokenKind::CloseBracket,
        ]
    );
}

// -----------------------------------------------------------
// Diagnostics.
// -----------------------------------------------------------

#[test]
fn lex_bad_character_is_token_and_diagnostic() {
    let lexed = tokenize("a $ b");
    assert_eq!(lexed.tokens[2].kind, TokenKind::BadCharacter);
    assert_eq!(lexed.tokens[2].span, Span::new(2, 1));
    assert_eq!(lexed.diagnostics.len(), 1);
    assert_eq!(lexed.diagnostics[0].kind, DiagnosticKind::BadCharacter('$'));
    assert_eq!(lexed.diagnostics[0].offset, 2);
    assert_partitions(&lexed);
}

#[test]
fn lex_tilde_without_sigil_is_bad_character() {
    assert_eq!(
        pairs("~x"),
        vec![
            (TokenKind::BadCharacter, "~".to_owned()),
            (TokenKind::Identifier, "x".to_owned()),
        ]
    );
}

#[test]
fn lex_into_result_returns_first_diagnostic() {
    let err = tokenize("$ \"open").into_result().unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::BadCharacter('$'));
    assert_eq!(err.to_string(), "unexpected character: $ at offset 0");

    let tokens = tokenize("ok").into_result().expect("clean input");
    assert_eq!(tokens.len(), 1);
}

#[test]
fn lex_unterminated_string() {
    let lexed = tokenize("x = \"abc");
    assert_eq!(lexed.diagnostics.len(), 1);
    assert_eq!(lexed.diagnostics[0].kind, DiagnosticKind::UnterminatedString);
    assert_eq!(lexed.diagnostics[0].origin, 4);
    assert_eq!(lexed.diagnostics[0].offset, 8);
    assert!(!lexed.is_balanced());
    assert_partitions(&lexed);
}

#[test]
fn lex_unterminated_charlist() {
    let lexed = tokenize("'abc");
    assert_eq!(
        lexed.diagnostics[0].kind,
        DiagnosticKind::UnterminatedCharList
    );
}

// -----------------------------------------------------------
// Options.
// -----------------------------------------------------------

#[test]
fn lex_leading_bom_is_whitespace() {
    let lexed = tokenize("\u{FEFF}x");
    assert_eq!(lexed.tokens[0].kind, TokenKind::Whitespace);
    assert_eq!(lexed.tokens[0].span, Span::new(0, 1));
    assert_eq!(lexed.tokens[1].kind, TokenKind::Identifier);
    assert!(lexed.diagnostics.is_empty());
}

#[test]
fn lex_bom_rejected_when_disabled() {
    let lexed = tokenize_with("\u{FEFF}x", LexerOptions::new().accept_bom(false));
    assert_eq!(lexed.tokens[0].kind, TokenKind::BadCharacter);
    assert_eq!(
        lexed.diagnostics[0].kind,
        DiagnosticKind::BadCharacter('\u{FEFF}')
    );
}

#[test]
fn lex_bom_only_at_start() {
    let lexed = tokenize("x\u{FEFF}");
    assert_eq!(lexed.tokens[1].kind, TokenKind::BadCharacter);
}

#[test]
fn lex_silent_bad_characters() {
    let options = LexerOptions::new().report_bad_characters(false);
    let lexed = tokenize_with("$$", options);
    assert_eq!(
        kinds(&lexed),
        vec![TokenKind::BadCharacter, TokenKind::BadCharacter]
    );
    assert!(lexed.diagnostics.is_empty());
}

// -----------------------------------------------------------
// Pull interface.
// -----------------------------------------------------------

#[test]
fn lex_modifier_letter_in_modifier_mode() {
    let source = Source::new("A");
    let mut lexer = Lexer::in_mode(source.chars(), LexicalMode::SigilModifiers);
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::SigilModifier);
    assert_eq!(token.state, StateId::SigilModifiers);
    assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    assert!(lexer.diagnostics().is_empty());
}

#[test]
fn lex_end_marker_is_zero_length() {
    let source = Source::new("ab");
    let mut lexer = Lexer::new(source.chars());
    lexer.next_token();
    let end = lexer.next_token();
    assert_eq!(end.kind, TokenKind::EndOfInput);
    assert!(end.span.is_empty());
    assert_eq!(end.span.start, 2);
}
