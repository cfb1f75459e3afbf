//! Lexical rules and the per-mode rule tables.
//!
//! Each rule inspects the cursor without consuming anything and either
//! declines or reports a [`Match`]. Order inside a table is priority for
//! equal-length matches.

use crate::classifier::{Match, Rule, Scan};
use crate::cursor::Cursor;
use crate::state::{GroupContext, HeredocContext, LexicalMode, LiteralKind, Transition};
use crate::token::TokenKind;

pub const INITIAL: &[Rule] = &[
    whitespace,
    eol,
    comment,
    heredoc_open,
    string_open,
    charlist_open,
    sigil_open,
    char_token,
    number,
    atom,
    keyword,
    identifier,
    alias,
    operator,
    punctuation,
];

/// Same as [`INITIAL`] with brace counting in front.
pub const INTERPOLATION: &[Rule] = &[
    interpolation_brace,
    whitespace,
    eol,
    comment,
    heredoc_open,
    string_open,
    charlist_open,
    sigil_open,
    char_token,
    number,
    atom,
    keyword,
    identifier,
    alias,
    operator,
    punctuation,
];

pub const SIGIL_NAME: &[Rule] = &[sigil_name];
pub const SIGIL_DELIMITER: &[Rule] = &[sigil_heredoc, sigil_delimiter];
pub const SIGIL_MODIFIERS: &[Rule] = &[sigil_modifier];
pub const GROUP: &[Rule] = &[interpolation_start, group_terminator, group_body];
pub const HEREDOC_OPEN: &[Rule] = &[heredoc_open_eol, heredoc_trailing];
pub const HEREDOC_BODY: &[Rule] = &[heredoc_terminator, eol, interpolation_start, heredoc_line];

const KEYWORDS: &[&str] = &[
    "after", "and", "catch", "do", "else", "end", "false", "fn", "in", "nil", "not", "or",
    "rescue", "true", "when",
];

// Longest-first is not required: `operator` takes the longest that matches.
const OPERATORS: &[&str] = &[
    "===", "!==", "...", "<<<", ">>>", "<<~", "~>>", "<~>", "<|>", "|||", "&&&", "^^^", "~~~",
    "\\\\", "==", "!=", "<=", ">=", "&&", "||", "|>", "<<", ">>", "~>", "<~", "<-", "->", "=~",
    "++", "--", "<>", "..", "::", "**", "=>", "+", "-", "*", "/", "=", "<", ">", "!", "^", "&",
    "|", ".", "@", ":", "%",
];

const BYTE_ORDER_MARK: char = '\u{FEFF}';

// -----------------------------------------------------------
// Character classes.
// -----------------------------------------------------------

const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() && !is_line_break(c)
}

const fn is_indent(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

fn is_identifier_start(c: char) -> bool {
    c.is_lowercase() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit() || c == '_'
}

const fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7' | '_')
}

const fn is_binary_digit(c: char) -> bool {
    matches!(c, '0' | '1' | '_')
}

/// Characters that may open a sigil body.
#[must_use]
pub const fn is_sigil_delimiter(c: char) -> bool {
    matches!(c, '/' | '|' | '"' | '\'' | '(' | '[' | '{' | '<')
}

// -----------------------------------------------------------
// Scanning helpers.
// -----------------------------------------------------------

/// Count of scalar values from `start` satisfying `pred`.
fn count_from(cursor: &Cursor<'_>, start: usize, pred: impl Fn(char) -> bool) -> usize {
    cursor
        .rest()
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|&&c| pred(c)).count())
}

/// Length of the line break at the start of `chars`, or zero.
fn line_break_len(chars: &[char]) -> usize {
    match chars {
        ['\r', '\n', ..] => 2,
        ['\n' | '\r', ..] => 1,
        _ => 0,
    }
}

fn is_marker(chars: &[char], quote: char) -> bool {
    chars.len() >= 3 && chars[..3].iter().all(|&c| c == quote)
}

/// Whether the line at the start of `line` closes a heredoc quoted by `quote`.
/// Returns the indentation width when it does.
fn terminator_indent(line: &[char], quote: char) -> Option<usize> {
    let ws = line.iter().take_while(|&&c| is_indent(c)).count();
    is_marker(&line[ws..], quote).then_some(ws)
}

/// Indentation of the line closing the heredoc that starts at `body`, or
/// zero if it is never closed.
///
/// When `interpolating`, lines that start inside `#{...}` are skipped so a
/// heredoc nested in an interpolation cannot close the outer one.
fn heredoc_indent(body: &[char], quote: char, interpolating: bool) -> usize {
    let mut depth = 0_usize;
    let mut at_line_start = true;
    let mut i = 0;

    while i < body.len() {
        if at_line_start && depth == 0 {
            if let Some(ws) = terminator_indent(&body[i..], quote) {
                return ws;
            }
        }
        at_line_start = false;

        let breaks = line_break_len(&body[i..]);
        if breaks > 0 {
            at_line_start = true;
            i += breaks;
            continue;
        }
        match body[i] {
            '\\' if depth == 0 => {
                let escaped = body.get(i + 1).is_some_and(|&c| !is_line_break(c));
                i += if escaped { 2 } else { 1 };
                continue;
            }
            '#' if interpolating && depth == 0 && body.get(i + 1) == Some(&'{') => {
                depth = 1;
                i += 2;
                continue;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    0
}

/// Word length from `start`, including a trailing `?` or `!`.
fn word_len(cursor: &Cursor<'_>, start: usize) -> usize {
    let len = count_from(cursor, start, is_identifier_continue);
    match cursor.nth(start + len) {
        Some('?' | '!') => len + 1,
        _ => len,
    }
}

/// Stack change after a literal's closing delimiter spanning `len` values.
fn close_literal(cursor: &Cursor<'_>, len: usize, literal: LiteralKind) -> Transition {
    let modifiers_follow = cursor.nth(len).is_some_and(|c| c.is_ascii_alphabetic());
    if literal == LiteralKind::Sigil && modifiers_follow {
        Transition::Replace(LexicalMode::SigilModifiers)
    } else {
        Transition::Pop
    }
}

// -----------------------------------------------------------
// Initial mode.
// -----------------------------------------------------------

fn whitespace(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    let bom = usize::from(
        scan.options.accept_bom
            && cursor.offset() == 0
            && cursor.first() == Some(BYTE_ORDER_MARK),
    );
    let len = bom + count_from(cursor, bom, is_blank);
    (len > 0).then(|| Match::new(TokenKind::Whitespace, len))
}

fn eol(scan: &Scan<'_>) -> Option<Match> {
    let len = line_break_len(scan.cursor.rest());
    (len > 0).then(|| Match::new(TokenKind::Eol, len))
}

fn comment(scan: &Scan<'_>) -> Option<Match> {
    if scan.cursor.first() != Some('#') {
        return None;
    }
    let len = 1 + count_from(&scan.cursor, 1, |c| !is_line_break(c));
    Some(Match::new(TokenKind::Comment, len))
}

fn heredoc_open(scan: &Scan<'_>) -> Option<Match> {
    let (literal, quote) = match scan.cursor.first()? {
        '"' => (LiteralKind::String, '"'),
        '\'' => (LiteralKind::CharList, '\''),
        _ => return None,
    };
    is_marker(scan.cursor.rest(), quote).then(|| {
        let context = HeredocContext::new(literal, quote, true);
        Match::new(TokenKind::HeredocPromoter, 3)
            .then(Transition::Push(LexicalMode::HeredocOpen(context)))
    })
}

fn string_open(scan: &Scan<'_>) -> Option<Match> {
    (scan.cursor.first() == Some('"')).then(|| {
        let context = GroupContext::quoted(LiteralKind::String, '"');
        Match::new(TokenKind::StringPromoter, 1)
            .then(Transition::Push(LexicalMode::Group(context)))
    })
}

fn charlist_open(scan: &Scan<'_>) -> Option<Match> {
    (scan.cursor.first() == Some('\'')).then(|| {
        let context = GroupContext::quoted(LiteralKind::CharList, '\'');
        Match::new(TokenKind::CharListPromoter, 1)
            .then(Transition::Push(LexicalMode::Group(context)))
    })
}

/// `~` followed by a sigil letter and an opening delimiter. Only the `~`
/// is consumed; the other two are trailing context.
fn sigil_open(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    let opens = cursor.first() == Some('~')
        && cursor.nth(1).is_some_and(|c| c.is_ascii_alphabetic())
        && cursor.nth(2).is_some_and(is_sigil_delimiter);
    opens.then(|| {
        Match::new(TokenKind::Tilde, 1)
            .with_extent(3)
            .then(Transition::Push(LexicalMode::SigilName))
    })
}

fn char_token(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    if cursor.first() != Some('?') {
        return None;
    }
    match cursor.nth(1)? {
        '\\' if cursor.nth(2).is_some() => Some(Match::new(TokenKind::CharToken, 3)),
        c if is_line_break(c) || c == '\\' => None,
        _ => Some(Match::new(TokenKind::CharToken, 2)),
    }
}

fn number(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    if !cursor.first()?.is_ascii_digit() {
        return None;
    }

    if cursor.first() == Some('0') {
        let radix: Option<fn(char) -> bool> = match cursor.nth(1) {
            Some('x') => Some(is_hex_digit),
            Some('o') => Some(is_octal_digit),
            Some('b') => Some(is_binary_digit),
            _ => None,
        };
        if let Some(is_digit) = radix {
            let digits = count_from(cursor, 2, is_digit);
            if digits > 0 {
                return Some(Match::new(TokenKind::Number, 2 + digits));
            }
        }
    }

    let is_digit = |c: char| c.is_ascii_digit() || c == '_';
    let mut len = count_from(cursor, 0, is_digit);

    // fraction: `1.5`, but not the range in `1..2`
    if cursor.nth(len) == Some('.') && cursor.nth(len + 1).is_some_and(|c| c.is_ascii_digit()) {
        len += 1 + count_from(cursor, len + 1, is_digit);

        if matches!(cursor.nth(len), Some('e' | 'E')) {
            let sign = usize::from(matches!(cursor.nth(len + 1), Some('+' | '-')));
            let exponent = len + 1 + sign;
            if cursor.nth(exponent).is_some_and(|c| c.is_ascii_digit()) {
                len = exponent + count_from(cursor, exponent, is_digit);
            }
        }
    }

    Some(Match::new(TokenKind::Number, len))
}

fn atom(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    let starts = cursor.first() == Some(':')
        && cursor
            .nth(1)
            .is_some_and(|c| is_identifier_start(c) || c.is_uppercase());
    starts.then(|| Match::new(TokenKind::Atom, 2 + word_len(cursor, 2)))
}

fn keyword(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    if !cursor.first().is_some_and(is_identifier_start) {
        return None;
    }
    let len = 1 + word_len(cursor, 1);
    let word: String = cursor.peek(len).iter().collect();
    KEYWORDS
        .contains(&word.as_str())
        .then(|| Match::new(TokenKind::Keyword, len))
}

fn identifier(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    cursor
        .first()
        .is_some_and(is_identifier_start)
        .then(|| Match::new(TokenKind::Identifier, 1 + word_len(cursor, 1)))
}

fn alias(scan: &Scan<'_>) -> Option<Match> {
    let cursor = &scan.cursor;
    cursor
        .first()
        .is_some_and(char::is_uppercase)
        .then(|| {
            let len = 1 + count_from(cursor, 1, is_identifier_continue);
            Match::new(TokenKind::Alias, len)
        })
}

fn operator(scan: &Scan<'_>) -> Option<Match> {
    OPERATORS
        .iter()
        .filter(|op| scan.cursor.starts_with(op))
        .map(|op| op.chars().count())
        .max()
        .map(|len| Match::new(TokenKind::Operator, len))
}

fn punctuation(scan: &Scan<'_>) -> Option<Match> {
    let kind = match scan.cursor.first()? {
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        _ => return None,
    };
    Some(Match::new(kind, 1))
}

// -----------------------------------------------------------
// Sigil modes.
// -----------------------------------------------------------

fn sigil_name(scan: &Scan<'_>) -> Option<Match> {
    let letter = scan.cursor.first().filter(char::is_ascii_alphabetic)?;
    let next = LexicalMode::SigilDelimiter {
        interpolating: letter.is_ascii_lowercase(),
    };
    Some(Match::new(TokenKind::SigilName, 1).then(Transition::Replace(next)))
}

fn sigil_heredoc(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::SigilDelimiter { interpolating } = scan.mode else {
        return None;
    };
    let quote = scan.cursor.first().filter(|&c| c == '"' || c == '\'')?;
    is_marker(scan.cursor.rest(), quote).then(|| {
        let context = HeredocContext::new(LiteralKind::Sigil, quote, interpolating);
        Match::new(TokenKind::HeredocPromoter, 3)
            .then(Transition::Replace(LexicalMode::HeredocOpen(context)))
    })
}

fn sigil_delimiter(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::SigilDelimiter { interpolating } = scan.mode else {
        return None;
    };
    let opener = scan.cursor.first().filter(|&c| is_sigil_delimiter(c))?;
    let context = GroupContext::sigil(opener, interpolating);
    Some(
        Match::new(TokenKind::SigilPromoter, 1)
            .then(Transition::Replace(LexicalMode::Group(context))),
    )
}

fn sigil_modifier(scan: &Scan<'_>) -> Option<Match> {
    scan.cursor
        .first()
        .is_some_and(|c| c.is_ascii_alphabetic())
        .then(|| Match::new(TokenKind::SigilModifier, 1))
}

// -----------------------------------------------------------
// Literal bodies.
// -----------------------------------------------------------

/// `#{` inside an interpolating string, charlist, sigil or heredoc.
fn interpolation_start(scan: &Scan<'_>) -> Option<Match> {
    let interpolating = match scan.mode {
        LexicalMode::Group(group) => group.interpolating,
        LexicalMode::HeredocBody(heredoc) => heredoc.interpolating,
        _ => false,
    };
    (interpolating && scan.cursor.starts_with("#{")).then(|| {
        Match::new(TokenKind::InterpolationStart, 2)
            .then(Transition::Push(LexicalMode::Interpolation { depth: 0 }))
    })
}

fn group_terminator(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::Group(group) = scan.mode else {
        return None;
    };
    (group.depth == 0 && scan.cursor.first() == Some(group.closer)).then(|| {
        Match::new(group.literal.terminator(), 1).then(close_literal(
            &scan.cursor,
            1,
            group.literal,
        ))
    })
}

/// Literal text up to the depth-zero closer or an interpolation.
fn group_body(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::Group(group) = scan.mode else {
        return None;
    };
    let cursor = &scan.cursor;
    let mut depth = group.depth;
    let mut len = 0;

    while let Some(c) = cursor.nth(len) {
        if c == '\\' {
            len += if cursor.nth(len + 1).is_some() { 2 } else { 1 };
            continue;
        }
        if group.interpolating && c == '#' && cursor.nth(len + 1) == Some('{') {
            break;
        }
        if c == group.closer {
            if depth == 0 {
                break;
            }
            depth -= 1;
        } else if group.nests() && c == group.opener {
            depth += 1;
        }
        len += 1;
    }

    if len == 0 {
        return None;
    }
    let found = Match::new(group.literal.body(), len);
    Some(if depth == group.depth {
        found
    } else {
        found.then(Transition::Replace(LexicalMode::Group(GroupContext {
            depth,
            ..group
        })))
    })
}

// -----------------------------------------------------------
// Heredocs.
// -----------------------------------------------------------

fn heredoc_trailing(scan: &Scan<'_>) -> Option<Match> {
    let len = count_from(&scan.cursor, 0, |c| !is_line_break(c));
    (len > 0).then(|| Match::new(TokenKind::HeredocTrailing, len))
}

/// Line break ending the promoter line. Looks ahead for the terminator to
/// learn the indentation every body line is stripped by.
fn heredoc_open_eol(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::HeredocOpen(heredoc) = scan.mode else {
        return None;
    };
    let rest = scan.cursor.rest();
    let len = line_break_len(rest);
    (len > 0).then(|| {
        let body = HeredocContext {
            indent: heredoc_indent(&rest[len..], heredoc.quote, heredoc.interpolating),
            ..heredoc
        };
        Match::new(TokenKind::Eol, len).then(Transition::Replace(LexicalMode::HeredocBody(body)))
    })
}

fn heredoc_terminator(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::HeredocBody(heredoc) = scan.mode else {
        return None;
    };
    if !scan.cursor.at_line_start() {
        return None;
    }
    let ws = terminator_indent(scan.cursor.rest(), heredoc.quote)?;
    let len = ws + 3;
    Some(
        Match::new(TokenKind::HeredocTerminator, len)
            .with_indent(ws)
            .then(close_literal(&scan.cursor, len, heredoc.literal)),
    )
}

/// Body text up to the end of the line or an interpolation. Only a
/// fragment that starts a line has indentation stripped.
fn heredoc_line(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::HeredocBody(heredoc) = scan.mode else {
        return None;
    };
    let cursor = &scan.cursor;
    let at_line_start = cursor.at_line_start();
    if at_line_start && terminator_indent(cursor.rest(), heredoc.quote).is_some() {
        return None;
    }

    let mut len = 0;
    while let Some(c) = cursor.nth(len) {
        if is_line_break(c) {
            break;
        }
        if c == '\\' {
            len += if cursor.nth(len + 1).is_some_and(|n| !is_line_break(n)) {
                2
            } else {
                1
            };
            continue;
        }
        if heredoc.interpolating && c == '#' && cursor.nth(len + 1) == Some('{') {
            break;
        }
        len += 1;
    }

    if len == 0 {
        return None;
    }
    let indent = if at_line_start {
        cursor
            .peek(len.min(heredoc.indent))
            .iter()
            .take_while(|&&c| is_indent(c))
            .count()
    } else {
        0
    };
    Some(Match::new(TokenKind::HeredocLine, len).with_indent(indent))
}

// -----------------------------------------------------------
// Interpolation.
// -----------------------------------------------------------

fn interpolation_brace(scan: &Scan<'_>) -> Option<Match> {
    let LexicalMode::Interpolation { depth } = scan.mode else {
        return None;
    };
    match scan.cursor.first()? {
        '{' => Some(
            Match::new(TokenKind::OpenBrace, 1).then(Transition::Replace(
                LexicalMode::Interpolation { depth: depth + 1 },
            )),
        ),
        '}' if depth == 0 => Some(Match::new(TokenKind::InterpolationEnd, 1).then(Transition::Pop)),
        '}' => Some(
            Match::new(TokenKind::CloseBrace, 1).then(Transition::Replace(
                LexicalMode::Interpolation { depth: depth - 1 },
            )),
        ),
        _ => None,
    }
}
