//! Lexical modes and the stack of frames that selects between them.
//!
//! The bottom frame is always [`LexicalMode::Initial`]. Entering a nested
//! construct pushes a frame; matching its terminator pops it. Because the
//! whole state is this stack plus a cursor offset, a [`Snapshot`] of both
//! is enough to resume lexing anywhere.

use crate::token::TokenKind;

/// Fieldless name of a lexical mode, recorded on every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Initial,
    SigilName,
    SigilDelimiter,
    Group,
    HeredocOpen,
    HeredocBody,
    SigilModifiers,
    Interpolation,
}

/// Which literal a group or heredoc frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Sigil,
    String,
    CharList,
}

impl LiteralKind {
    pub(crate) const fn body(self) -> TokenKind {
        match self {
            Self::Sigil => TokenKind::SigilBody,
            Self::String => TokenKind::StringBody,
            Self::CharList => TokenKind::CharListBody,
        }
    }

    pub(crate) const fn terminator(self) -> TokenKind {
        match self {
            Self::Sigil => TokenKind::SigilTerminator,
            Self::String => TokenKind::StringTerminator,
            Self::CharList => TokenKind::CharListTerminator,
        }
    }
}

/// Body of a single-delimiter literal: `~r/.../`, `"..."`, `'...'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupContext {
    pub literal: LiteralKind,
    pub opener: char,
    pub closer: char,
    /// Unclosed nested `opener`s seen so far; only moves for bracket pairs.
    pub depth: u32,
    pub interpolating: bool,
}

impl GroupContext {
    /// Context for a sigil opened with `opener`.
    #[must_use]
    pub const fn sigil(opener: char, interpolating: bool) -> Self {
        Self {
            literal: LiteralKind::Sigil,
            opener,
            closer: closing_delimiter(opener),
            depth: 0,
            interpolating,
        }
    }

    /// Context for a `"string"` or `'charlist'`.
    #[must_use]
    pub const fn quoted(literal: LiteralKind, quote: char) -> Self {
        Self {
            literal,
            opener: quote,
            closer: quote,
            depth: 0,
            interpolating: true,
        }
    }

    pub(crate) const fn nests(&self) -> bool {
        self.opener != self.closer
    }
}

/// A heredoc opened by three `quote` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeredocContext {
    pub literal: LiteralKind,
    pub quote: char,
    pub interpolating: bool,
    /// Leading whitespace width of the terminator line; zero until the
    /// opening line has been consumed.
    pub indent: usize,
}

impl HeredocContext {
    #[must_use]
    pub const fn new(literal: LiteralKind, quote: char, interpolating: bool) -> Self {
        Self {
            literal,
            quote,
            interpolating,
            indent: 0,
        }
    }
}

/// A lexical mode together with the context it needs to resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalMode {
    Initial,
    /// After `~`, expecting the sigil letter.
    SigilName,
    /// After the sigil letter, expecting the opening delimiter.
    SigilDelimiter { interpolating: bool },
    Group(GroupContext),
    /// Rest of the line holding a heredoc promoter.
    HeredocOpen(HeredocContext),
    HeredocBody(HeredocContext),
    /// Letters trailing a sigil's closing delimiter.
    SigilModifiers,
    /// Inside `#{...}`, with the count of unclosed `{`.
    Interpolation { depth: u32 },
}

impl LexicalMode {
    #[must_use]
    pub const fn id(&self) -> StateId {
        match self {
            Self::Initial => StateId::Initial,
            Self::SigilName => StateId::SigilName,
            Self::SigilDelimiter { .. } => StateId::SigilDelimiter,
            Self::Group(_) => StateId::Group,
            Self::HeredocOpen(_) => StateId::HeredocOpen,
            Self::HeredocBody(_) => StateId::HeredocBody,
            Self::SigilModifiers => StateId::SigilModifiers,
            Self::Interpolation { .. } => StateId::Interpolation,
        }
    }

    /// Modes that hand control back to the frame beneath them instead of
    /// producing a bad character.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::SigilName | Self::SigilDelimiter { .. } | Self::SigilModifiers
        )
    }
}

/// Closing counterpart of a sigil delimiter. Non-bracket delimiters close
/// themselves.
#[must_use]
pub const fn closing_delimiter(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// One entry of the state stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateFrame {
    pub mode: LexicalMode,
    /// Offset of the first scalar value of the construct this frame tracks.
    pub opened_at: usize,
}

impl StateFrame {
    #[must_use]
    pub const fn new(mode: LexicalMode, opened_at: usize) -> Self {
        Self { mode, opened_at }
    }
}

/// Stack mutation requested by a matched rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(LexicalMode),
    Pop,
    /// Swap the top frame's mode, keeping its `opened_at`.
    Replace(LexicalMode),
}

/// Non-empty stack of state frames with an unpoppable `Initial` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    frames: Vec<StateFrame>,
}

impl StateStack {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![StateFrame::new(LexicalMode::Initial, 0)],
        }
    }

    /// Rebuild a stack from frames captured by [`StateStack::frames`].
    ///
    /// # Panics
    ///
    /// Panics unless exactly the first frame is `Initial`.
    #[must_use]
    pub fn from_frames(frames: Vec<StateFrame>) -> Self {
        assert!(
            frames.first().is_some_and(|f| f.mode == LexicalMode::Initial),
            "state stack must start with the initial frame"
        );
        assert!(
            frames[1..].iter().all(|f| f.mode != LexicalMode::Initial),
            "initial frame may only appear at the bottom of the stack"
        );
        Self { frames }
    }

    #[must_use]
    pub fn top(&self) -> &StateFrame {
        // never empty: the sentinel cannot be popped
        &self.frames[self.frames.len() - 1]
    }

    #[must_use]
    pub fn frames(&self) -> &[StateFrame] {
        &self.frames
    }

    /// Number of frames above the sentinel.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn push(&mut self, frame: StateFrame) {
        self.frames.push(frame);
    }

    /// # Panics
    ///
    /// Panics when only the sentinel frame is left.
    pub fn pop(&mut self) -> StateFrame {
        assert!(self.frames.len() > 1, "attempted to pop the initial frame");
        let last = self.frames.len() - 1;
        self.frames.remove(last)
    }

    /// Apply `transition`; `offset` becomes `opened_at` for pushed frames.
    pub fn apply(&mut self, transition: Transition, offset: usize) {
        match transition {
            Transition::Stay => {}
            Transition::Push(mode) => self.push(StateFrame::new(mode, offset)),
            Transition::Pop => {
                self.pop();
            }
            Transition::Replace(mode) => {
                assert!(
                    self.frames.len() > 1,
                    "attempted to replace the initial frame"
                );
                let last = self.frames.len() - 1;
                self.frames[last].mode = mode;
            }
        }
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Resumable lexer position: a cursor offset plus the frames in effect there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    offset: usize,
    frames: Vec<StateFrame>,
}

impl Snapshot {
    pub(crate) fn new(offset: usize, stack: &StateStack) -> Self {
        Self {
            offset,
            frames: stack.frames().to_vec(),
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn frames(&self) -> &[StateFrame] {
        &self.frames
    }

    pub(crate) fn stack(&self) -> StateStack {
        StateStack::from_frames(self.frames.clone())
    }
}
