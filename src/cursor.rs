//! Read position over a buffer of Unicode scalar values.

/// Forward-only view over the input with unbounded lookahead.
///
/// Offsets count scalar values, not bytes. Lookahead never fails: reads
/// past the end yield `None` or a shorter slice. Advancing past the end
/// is a rule-table bug and panics.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'src> {
    chars: &'src [char],
    pos: usize,
}

impl<'src> Cursor<'src> {
    #[must_use]
    pub const fn new(chars: &'src [char]) -> Self {
        Self { chars, pos: 0 }
    }

    /// Create a cursor positioned at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is beyond the end of the input.
    #[must_use]
    pub fn at(chars: &'src [char], pos: usize) -> Self {
        assert!(
            pos <= chars.len(),
            "cursor offset {pos} is past end of input ({})",
            chars.len()
        );
        Self { chars, pos }
    }

    /// The whole input, independent of the read position.
    #[must_use]
    pub const fn input(&self) -> &'src [char] {
        self.chars
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.chars.len() - self.pos
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The next `n` scalar values, or fewer at end of input.
    #[must_use]
    pub fn peek(&self, n: usize) -> &'src [char] {
        let end = self.pos.saturating_add(n).min(self.chars.len());
        &self.chars[self.pos..end]
    }

    /// Everything from the current position to the end of input.
    #[must_use]
    pub fn rest(&self) -> &'src [char] {
        &self.chars[self.pos..]
    }

    #[must_use]
    pub fn first(&self) -> Option<char> {
        self.nth(0)
    }

    /// The scalar value `k` positions ahead of the cursor.
    #[must_use]
    pub fn nth(&self, k: usize) -> Option<char> {
        self.chars.get(self.pos.checked_add(k)?).copied()
    }

    /// The scalar value just behind the cursor.
    #[must_use]
    pub fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).map(|i| self.chars[i])
    }

    /// Whether the upcoming input begins with `pat`.
    #[must_use]
    pub fn starts_with(&self, pat: &str) -> bool {
        let mut rest = self.rest().iter();
        pat.chars().all(|p| rest.next() == Some(&p))
    }

    /// Whether the cursor sits at the start of input or just after a line break.
    #[must_use]
    pub fn at_line_start(&self) -> bool {
        matches!(self.prev(), None | Some('\n' | '\r'))
    }

    /// Consume `n` scalar values.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` scalar values remain.
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.remaining(),
            "advance({n}) at offset {} overruns input of length {}",
            self.pos,
            self.chars.len()
        );
        self.pos += n;
    }
}
