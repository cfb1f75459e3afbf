//! Rule selection for one token under one lexical mode.
//!
//! Every rule of the active mode is tried against the cursor and the
//! longest match wins; on equal length the rule declared first wins.
//! Classification is pure: it reads the cursor and the mode and returns
//! what the driver should consume and how the stack should change.

use crate::cursor::Cursor;
use crate::options::LexerOptions;
use crate::rules;
use crate::state::{LexicalMode, Transition};
use crate::token::TokenKind;

/// A successful rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: TokenKind,
    /// Scalar values consumed.
    pub len: usize,
    /// Length compared for maximal munch: `len` plus any trailing context
    /// the rule inspected without consuming.
    pub extent: usize,
    /// Leading scalar values stripped from the token's logical value.
    pub indent: usize,
    pub transition: Transition,
}

impl Match {
    #[must_use]
    pub const fn new(kind: TokenKind, len: usize) -> Self {
        Self {
            kind,
            len,
            extent: len,
            indent: 0,
            transition: Transition::Stay,
        }
    }

    #[must_use]
    pub const fn then(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    #[must_use]
    pub const fn with_extent(mut self, extent: usize) -> Self {
        self.extent = extent;
        self
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Result of classifying at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Consume and emit a token.
    Emit(Match),
    /// A transient mode found nothing it owns: pop it and classify the same
    /// input again under the frame beneath.
    Yield,
}

/// What a rule sees.
#[derive(Debug, Clone, Copy)]
pub struct Scan<'src> {
    pub cursor: Cursor<'src>,
    pub mode: LexicalMode,
    pub options: LexerOptions,
}

/// A lexical rule: `None` when it does not apply at the cursor.
pub type Rule = fn(&Scan<'_>) -> Option<Match>;

/// Rules active in `mode`, in priority order.
#[must_use]
pub const fn rules_for(mode: &LexicalMode) -> &'static [Rule] {
    match mode {
        LexicalMode::Initial => rules::INITIAL,
        LexicalMode::SigilName => rules::SIGIL_NAME,
        LexicalMode::SigilDelimiter { .. } => rules::SIGIL_DELIMITER,
        LexicalMode::Group(_) => rules::GROUP,
        LexicalMode::HeredocOpen(_) => rules::HEREDOC_OPEN,
        LexicalMode::HeredocBody(_) => rules::HEREDOC_BODY,
        LexicalMode::SigilModifiers => rules::SIGIL_MODIFIERS,
        LexicalMode::Interpolation { .. } => rules::INTERPOLATION,
    }
}

/// Longest match among `rules`, earliest rule on ties.
#[must_use]
pub fn longest(scan: &Scan<'_>, rules: &[Rule]) -> Option<Match> {
    rules
        .iter()
        .filter_map(|rule| rule(scan))
        .fold(None, |best, candidate| match best {
            Some(best) if best.extent >= candidate.extent => Some(best),
            _ => Some(candidate),
        })
}

/// Classify the input at `cursor` under `mode`.
///
/// Never returns a zero-length [`Outcome::Emit`] while input remains:
/// non-transient modes fall back to a one-scalar `BadCharacter`.
#[must_use]
pub fn classify(cursor: Cursor<'_>, mode: LexicalMode, options: LexerOptions) -> Outcome {
    let scan = Scan {
        cursor,
        mode,
        options,
    };
    match longest(&scan, rules_for(&mode)) {
        Some(found) => Outcome::Emit(found),
        None if mode.is_transient() => Outcome::Yield,
        None => Outcome::Emit(Match::new(TokenKind::BadCharacter, 1)),
    }
}
