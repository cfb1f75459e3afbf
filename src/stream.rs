//! Parser-facing token stream with lookahead and backtracking.

use crate::diagnostic::Diagnostic;
use crate::lexer::Lexer;
use crate::state::Snapshot;
use crate::token::{Token, TokenKind};

/// A point in a [`TokenStream`] that can be rewound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    snapshot: Snapshot,
    consumed: usize,
}

impl Checkpoint {
    /// Input offset of the next token after this checkpoint.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.snapshot.offset()
    }

    /// Tokens consumed before this checkpoint.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

/// Lazily lexed tokens with one-token lookahead.
///
/// Rewinding restores the lexer from a snapshot rather than lexing the
/// input again from the start.
#[derive(Debug, Clone)]
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    peeked: Option<(Snapshot, Token)>,
    consumed: usize,
}

impl<'src> TokenStream<'src> {
    #[must_use]
    pub const fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            peeked: None,
            consumed: 0,
        }
    }

    /// The next token without consuming it.
    pub fn peek(&mut self) -> Token {
        if let Some((_, token)) = &self.peeked {
            return *token;
        }
        let before = self.lexer.snapshot();
        let token = self.lexer.next_token();
        self.peeked = Some((before, token));
        token
    }

    /// Consume and return the next token; `EndOfInput` once exhausted.
    pub fn next_token(&mut self) -> Token {
        let token = match self.peeked.take() {
            Some((_, token)) => token,
            None => self.lexer.next_token(),
        };
        if token.kind != TokenKind::EndOfInput {
            self.consumed += 1;
        }
        token
    }

    /// Consume the next token if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        (self.peek().kind == kind).then(|| self.next_token())
    }

    /// Skip whitespace and comments, leaving line breaks in place.
    pub fn skip_trivia(&mut self) {
        while matches!(self.peek().kind, TokenKind::Whitespace | TokenKind::Comment) {
            self.next_token();
        }
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        let snapshot = match &self.peeked {
            Some((before, _)) => before.clone(),
            None => self.lexer.snapshot(),
        };
        Checkpoint {
            snapshot,
            consumed: self.consumed,
        }
    }

    /// Return to `checkpoint`; tokens after it will be produced again.
    pub fn rewind(&mut self, checkpoint: &Checkpoint) {
        self.peeked = None;
        self.lexer.restore(&checkpoint.snapshot);
        self.consumed = checkpoint.consumed;
    }

    /// Tokens consumed so far, not counting `EndOfInput`.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.lexer.diagnostics()
    }

    #[must_use]
    pub fn into_lexer(self) -> Lexer<'src> {
        self.lexer
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfInput).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn peek_then_next_yield_same_token() {
        let input = chars("foo bar");
        let mut stream = TokenStream::new(Lexer::new(&input));
        let peeked = stream.peek();
        assert_eq!(stream.next_token(), peeked);
        assert_eq!(stream.consumed(), 1);
    }

    #[test]
    fn checkpoint_taken_after_peek_points_before_peeked_token() {
        let input = chars("a b");
        let mut stream = TokenStream::new(Lexer::new(&input));
        stream.next_token();
        let peeked = stream.peek();
        let checkpoint = stream.checkpoint();
        assert_eq!(checkpoint.offset(), peeked.span.start);
        stream.next_token();
        stream.next_token();
        stream.rewind(&checkpoint);
        assert_eq!(stream.next_token(), peeked);
        assert_eq!(stream.consumed(), 2);
    }

    #[test]
    fn eat_and_skip_trivia() {
        let input = chars("  # note\n;");
        let mut stream = TokenStream::new(Lexer::new(&input));
        stream.skip_trivia();
        assert!(stream.eat(TokenKind::Semicolon).is_none());
        assert!(stream.eat(TokenKind::Eol).is_some());
        assert!(stream.eat(TokenKind::Semicolon).is_some());
        assert!(stream.is_at_end());
    }
}
