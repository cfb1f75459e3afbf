use tracing::{debug, trace};

use crate::classifier::{self, Match, Outcome};
use crate::cursor::Cursor;
use crate::diagnostic::Diagnostic;
use crate::options::LexerOptions;
use crate::state::{LexicalMode, Snapshot, StateFrame, StateStack, Transition};
use crate::token::{Span, Token, TokenKind};

/// Pull-based lexer over a buffer of scalar values.
///
/// Each call to [`Lexer::next_token`] classifies under the top state
/// frame, then consumes the match and applies its stack transition before
/// the token is built, so a token always carries the state it left behind.
/// Once input runs out every call returns a zero-length `EndOfInput` token.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    stack: StateStack,
    options: LexerOptions,
    diagnostics: Vec<Diagnostic>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(input: &'src [char]) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    #[must_use]
    pub fn with_options(input: &'src [char], options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            stack: StateStack::new(),
            options,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Start lexing `input` with `mode` pushed above the initial frame.
    ///
    /// # Panics
    ///
    /// Panics if `mode` is [`LexicalMode::Initial`].
    #[must_use]
    pub fn in_mode(input: &'src [char], mode: LexicalMode) -> Self {
        let mut lexer = Self::new(input);
        lexer.stack = StateStack::from_frames(vec![
            StateFrame::new(LexicalMode::Initial, 0),
            StateFrame::new(mode, 0),
        ]);
        lexer
    }

    /// Continue lexing `input` from a point captured by [`Lexer::snapshot`].
    ///
    /// # Panics
    ///
    /// Panics if the snapshot offset lies beyond the end of `input`.
    #[must_use]
    pub fn resume(input: &'src [char], snapshot: &Snapshot, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::at(input, snapshot.offset()),
            stack: snapshot.stack(),
            options,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Capture the current offset and state stack.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.cursor.offset(), &self.stack)
    }

    /// Rewind (or fast-forward) this session to `snapshot`.
    ///
    /// Diagnostics detected at or after the snapshot offset are dropped;
    /// they will be found again as lexing proceeds.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        let offset = snapshot.offset();
        self.cursor = Cursor::at(self.cursor.input(), offset);
        self.stack = snapshot.stack();
        self.diagnostics.retain(|d| d.offset < offset);
        self.finished = false;
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset()
    }

    #[must_use]
    pub const fn stack(&self) -> &StateStack {
        &self.stack
    }

    #[must_use]
    pub const fn options(&self) -> LexerOptions {
        self.options
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Whether the end of input has been reached and reported.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produce the next token, or an `EndOfInput` marker.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.cursor.is_eof() {
                return self.end_of_input();
            }

            let frame = *self.stack.top();
            match classifier::classify(self.cursor, frame.mode, self.options) {
                Outcome::Emit(found) => return self.emit(found),
                Outcome::Yield => {
                    trace!(
                        target: "exlex::lexer",
                        offset = self.cursor.offset(),
                        mode = ?frame.mode.id(),
                        "yield"
                    );
                    self.stack.pop();
                }
            }
        }
    }

    fn emit(&mut self, found: Match) -> Token {
        let start = self.cursor.offset();
        let reported = (found.kind == TokenKind::BadCharacter
            && self.options.report_bad_characters)
            .then(|| self.cursor.first())
            .flatten();

        self.cursor.advance(found.len);
        self.apply(found.transition, start);

        if let Some(ch) = reported {
            let diagnostic = Diagnostic::bad_character(ch, start);
            debug!(target: "exlex::lexer", %diagnostic, "bad character");
            self.diagnostics.push(diagnostic);
        }

        let token = Token {
            kind: found.kind,
            span: Span::new(start, found.len),
            state: self.stack.top().mode.id(),
            indent: found.indent,
        };
        trace!(
            target: "exlex::lexer",
            kind = ?token.kind,
            start,
            len = found.len,
            state = ?token.state,
            "token"
        );
        token
    }

    fn apply(&mut self, transition: Transition, offset: usize) {
        if transition != Transition::Stay {
            trace!(
                target: "exlex::lexer",
                ?transition,
                depth = self.stack.depth(),
                "transition"
            );
        }
        self.stack.apply(transition, offset);
    }

    /// Unwind trailing modifier frames and report every construct still
    /// open. Runs once per session; later calls only return the marker.
    fn end_of_input(&mut self) -> Token {
        let end = self.cursor.offset();
        if !self.finished {
            self.finished = true;
            while self.stack.top().mode == LexicalMode::SigilModifiers {
                self.stack.pop();
            }
            for frame in self.stack.frames().iter().rev() {
                if let Some(diagnostic) = Diagnostic::unterminated(frame, end) {
                    debug!(target: "exlex::lexer", %diagnostic, "unterminated construct");
                    self.diagnostics.push(diagnostic);
                }
            }
            debug!(
                target: "exlex::lexer",
                end,
                open_frames = self.stack.depth(),
                diagnostics = self.diagnostics.len(),
                "end of input"
            );
        }
        Token {
            kind: TokenKind::EndOfInput,
            span: Span::new(end, 0),
            state: self.stack.top().mode.id(),
            indent: 0,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfInput).then_some(token)
    }
}
