#![allow(dead_code)]

use exlex::{Lexed, Lexer, LexerOptions, Source, StateId, Token, TokenKind, tokenize};

pub fn kinds(lexed: &Lexed) -> Vec<TokenKind> {
    lexed.tokens.iter().map(|t| t.kind).collect()
}

pub fn texts(lexed: &Lexed) -> Vec<String> {
    lexed.tokens.iter().map(|t| lexed.text(t)).collect()
}

/// Tokens as `(kind, text)` pairs, handy for whole-input assertions.
pub fn pairs(input: &str) -> Vec<(TokenKind, String)> {
    let lexed = tokenize(input);
    lexed
        .tokens
        .iter()
        .map(|t| (t.kind, lexed.text(t)))
        .collect()
}

/// Assert token spans cover the input exactly, in order, with no gaps.
pub fn assert_partitions(lexed: &Lexed) {
    let mut offset = 0;
    for token in &lexed.tokens {
        assert_eq!(
            token.span.start, offset,
            "gap or overlap before {token:?}\n--- input ---\n{:?}",
            lexed.source.slice(exlex::Span::new(0, lexed.source.len()))
        );
        assert!(!token.span.is_empty(), "empty token {token:?}");
        offset = token.span.end();
    }
    assert_eq!(offset, lexed.source.len(), "input not fully consumed");

    let rebuilt: String = lexed.tokens.iter().map(|t| lexed.text(t)).collect();
    let original = lexed.source.slice(exlex::Span::new(0, lexed.source.len()));
    assert_eq!(rebuilt, original);
}

/// Lex `prefix` followed by `input`, skip the first `skip` tokens and
/// return what follows, mirroring per-mode fixtures that first drive the
/// lexer into a state.
pub fn after_prefix(prefix: &str, skip: usize, input: &str) -> Vec<(TokenKind, StateId, String)> {
    let source = Source::new(&format!("{prefix}{input}"));
    let mut lexer = Lexer::new(source.chars());
    for _ in 0..skip {
        let token = lexer.next_token();
        assert_ne!(token.kind, TokenKind::EndOfInput, "prefix {prefix:?} too short");
    }
    lexer
        .map(|t| (t.kind, t.state, source.slice(t.span)))
        .collect()
}

/// Assert that resuming from the snapshot taken after every token yields
/// exactly the tokens continuous lexing produced from there on.
pub fn assert_restart_equivalent(input: &str) {
    let source = Source::new(input);
    let mut lexer = Lexer::new(source.chars());
    let mut tokens: Vec<Token> = Vec::new();
    let mut snapshots = vec![lexer.snapshot()];
    while let Some(token) = lexer.next() {
        tokens.push(token);
        snapshots.push(lexer.snapshot());
    }

    for (k, snapshot) in snapshots.iter().enumerate() {
        let mut resumed = Lexer::resume(source.chars(), snapshot, LexerOptions::default());
        let rest: Vec<Token> = resumed.by_ref().collect();
        assert_eq!(
            rest.as_slice(),
            &tokens[k..],
            "restart after token {k} diverged for {input:?}"
        );

        let expected: Vec<_> = lexer
            .diagnostics()
            .iter()
            .filter(|d| d.offset >= snapshot.offset())
            .copied()
            .collect();
        assert_eq!(resumed.diagnostics(), expected.as_slice());
    }
}

/// Assert every heredoc body line strips `min(leading whitespace,
/// terminator indent)` when it starts a line and nothing otherwise.
///
/// Heredocs still open at end of input are not checked.
pub fn assert_heredoc_indents(lexed: &Lexed) {
    let chars = lexed.source.chars();
    let mut open: Vec<Vec<&Token>> = Vec::new();

    for token in &lexed.tokens {
        match token.kind {
            TokenKind::HeredocPromoter => open.push(Vec::new()),
            TokenKind::HeredocLine => {
                if let Some(lines) = open.last_mut() {
                    lines.push(token);
                }
            }
            TokenKind::HeredocTerminator => {
                let Some(lines) = open.pop() else {
                    panic!("terminator without promoter: {token:?}");
                };
                for line in lines {
                    let starts_line = line.span.start == 0
                        || matches!(chars[line.span.start - 1], '\n' | '\r');
                    let expected = if starts_line {
                        let text = lexed.text(line);
                        let ws = text.chars().take_while(|c| matches!(c, ' ' | '\t')).count();
                        ws.min(token.indent)
                    } else {
                        0
                    };
                    assert_eq!(
                        line.indent,
                        expected,
                        "line {:?} closed by {:?}",
                        lexed.text(line),
                        lexed.text(token)
                    );
                }
            }
            _ => {}
        }
    }
}
