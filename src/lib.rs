//! Context-sensitive lexer for Elixir source.
//!
//! Handles the parts of the token grammar that need more than a flat
//! rule table: sigils with arbitrary delimiters and trailing modifier
//! letters, heredocs whose closing line sets the indentation stripped
//! from every body line, and `#{...}` interpolation nested inside string
//! literals. Lexing is total: every scalar value of the input lands in
//! exactly one token, and malformed input produces diagnostics instead
//! of errors.
//!
//! # Quick start
//!
//! ## Tokenize a whole file
//!
//! ```
//! use exlex::{tokenize, TokenKind};
//!
//! let lexed = tokenize("~r/ab+c/im");
//! let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::Tilde);
//! assert_eq!(kinds[kinds.len() - 1], TokenKind::SigilModifier);
//! assert!(lexed.diagnostics.is_empty());
//! assert!(lexed.is_balanced());
//! ```
//!
//! ## Pull tokens and backtrack
//!
//! ```
//! use exlex::{Lexer, Source, TokenKind, TokenStream};
//!
//! let source = Source::new("\"a#{b}c\"");
//! let mut stream = TokenStream::new(Lexer::new(source.chars()));
//! stream.next_token();
//! let checkpoint = stream.checkpoint();
//! let body = stream.next_token();
//! stream.rewind(&checkpoint);
//! assert_eq!(stream.next_token(), body);
//! assert_eq!(body.kind, TokenKind::StringBody);
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod classifier;
pub mod cursor;
pub mod diagnostic;
pub mod lexer;
pub mod options;
pub mod rules;
pub mod source;
pub mod state;
pub mod stream;
pub mod token;

pub use cursor::Cursor;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use lexer::Lexer;
pub use options::LexerOptions;
pub use source::Source;
pub use state::{
    GroupContext, HeredocContext, LexicalMode, LiteralKind, Snapshot, StateFrame, StateId,
    StateStack, Transition,
};
pub use stream::{Checkpoint, TokenStream};
pub use token::{Span, Token, TokenKind};

/// Everything one lexing session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub source: Source,
    /// Tokens in input order, without the `EndOfInput` marker.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// State stack left after end of input.
    pub final_stack: Vec<StateFrame>,
}

impl Lexed {
    /// Source text of `token`.
    #[must_use]
    pub fn text(&self, token: &Token) -> String {
        self.source.slice(token.span)
    }

    /// Source text of `token` without its stripped indentation.
    #[must_use]
    pub fn value(&self, token: &Token) -> String {
        self.source.slice(token.value_span())
    }

    /// Whether only the initial frame was left at end of input.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.final_stack.len() == 1
    }

    /// The tokens, or the first diagnostic if there was any.
    pub fn into_result(self) -> Result<Vec<Token>, Diagnostic> {
        match self.diagnostics.first() {
            Some(diagnostic) => Err(*diagnostic),
            None => Ok(self.tokens),
        }
    }
}

/// Tokenize `input` with default options.
#[must_use]
pub fn tokenize(input: &str) -> Lexed {
    tokenize_with(input, LexerOptions::default())
}

/// Tokenize `input` in one pass.
#[must_use]
pub fn tokenize_with(input: &str, options: LexerOptions) -> Lexed {
    let source = Source::new(input);
    let mut lexer = Lexer::with_options(source.chars(), options);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let final_stack = lexer.stack().frames().to_vec();
    let diagnostics = lexer.into_diagnostics();
    Lexed {
        source,
        tokens,
        diagnostics,
        final_stack,
    }
}
