use crate::state::StateId;

/// Half-open range of the input, counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of non-newline whitespace.
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`.
    Eol,
    /// `# ...` up to the end of the line.
    Comment,
    /// Integer or float literal, including `0x`/`0o`/`0b` forms.
    Number,
    /// Character literal (`?a`, `?\n`).
    CharToken,
    /// Lower-case or underscore identifier, optionally ending in `?` or `!`.
    Identifier,
    /// Capitalized alias (`Enum`, `String`).
    Alias,
    /// Reserved word (`do`, `end`, `fn`, ...).
    Keyword,
    /// `:name` atom.
    Atom,
    Operator,
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    /// The `~` introducing a sigil.
    Tilde,
    /// The letter naming a sigil (`r` in `~r/.../`).
    SigilName,
    /// Opening delimiter of a sigil.
    SigilPromoter,
    /// Literal text inside a sigil.
    SigilBody,
    /// Closing delimiter of a sigil.
    SigilTerminator,
    /// One modifier letter after a sigil's closing delimiter.
    SigilModifier,
    StringPromoter,
    StringBody,
    StringTerminator,
    CharListPromoter,
    CharListBody,
    CharListTerminator,
    /// Opening `"""` or `'''`.
    HeredocPromoter,
    /// Text after a heredoc promoter on its opening line.
    HeredocTrailing,
    /// One heredoc body line, or a fragment of one between interpolations.
    HeredocLine,
    /// Closing marker line of a heredoc, including its indentation.
    HeredocTerminator,
    /// `#{`
    InterpolationStart,
    /// The `}` closing an interpolation.
    InterpolationEnd,
    /// A scalar value no rule accepts.
    BadCharacter,
    /// Zero-length marker returned once input is exhausted.
    EndOfInput,
}

/// A single token with its kind, extent, and the lexical state after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Lexical state in effect once this token's transition was applied.
    pub state: StateId,
    /// Leading scalar values stripped from the logical value.
    pub indent: usize,
}

impl Token {
    /// The span without the stripped indentation prefix.
    #[must_use]
    pub const fn value_span(&self) -> Span {
        Span {
            start: self.span.start + self.indent,
            len: self.span.len - self.indent,
        }
    }
}
