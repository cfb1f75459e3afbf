use std::fmt;

use crate::state::{LexicalMode, LiteralKind, StateFrame};

/// Classifies a lexer diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Sigil still open at end of input.
    UnterminatedSigil,
    /// Heredoc (plain or sigil) whose closing marker never appeared.
    UnterminatedHeredoc,
    /// Double-quoted string still open at end of input.
    UnterminatedString,
    /// Single-quoted charlist still open at end of input.
    UnterminatedCharList,
    /// `#{` without its matching `}`.
    UnterminatedInterpolation,
    /// Scalar value that cannot start any token.
    BadCharacter(char),
}

impl DiagnosticKind {
    /// The unterminated-construct kind for a frame left open at end of
    /// input, or `None` for frames that need no terminator.
    #[must_use]
    pub const fn unterminated(mode: &LexicalMode) -> Option<Self> {
        match mode {
            LexicalMode::Initial | LexicalMode::SigilModifiers => None,
            LexicalMode::SigilName | LexicalMode::SigilDelimiter { .. } => {
                Some(Self::UnterminatedSigil)
            }
            LexicalMode::Group(group) => Some(match group.literal {
                LiteralKind::Sigil => Self::UnterminatedSigil,
                LiteralKind::String => Self::UnterminatedString,
                LiteralKind::CharList => Self::UnterminatedCharList,
            }),
            LexicalMode::HeredocOpen(_) | LexicalMode::HeredocBody(_) => {
                Some(Self::UnterminatedHeredoc)
            }
            LexicalMode::Interpolation { .. } => Some(Self::UnterminatedInterpolation),
        }
    }

    #[must_use]
    pub const fn is_unterminated(&self) -> bool {
        !matches!(self, Self::BadCharacter(_))
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedSigil => write!(f, "unterminated sigil"),
            Self::UnterminatedHeredoc => write!(f, "unterminated heredoc"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnterminatedCharList => write!(f, "unterminated charlist"),
            Self::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation, expected '}}'")
            }
            Self::BadCharacter(ch) => write!(f, "unexpected character: {}", ch.escape_debug()),
        }
    }
}

/// A non-fatal condition found while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind} at offset {origin}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where the condition was detected.
    pub offset: usize,
    /// Where the offending construct starts.
    pub origin: usize,
}

impl Diagnostic {
    #[must_use]
    pub const fn bad_character(ch: char, offset: usize) -> Self {
        Self {
            kind: DiagnosticKind::BadCharacter(ch),
            offset,
            origin: offset,
        }
    }

    /// Diagnostic for `frame` still open when input ran out at `offset`.
    #[must_use]
    pub fn unterminated(frame: &StateFrame, offset: usize) -> Option<Self> {
        DiagnosticKind::unterminated(&frame.mode).map(|kind| Self {
            kind,
            offset,
            origin: frame.opened_at,
        })
    }
}
