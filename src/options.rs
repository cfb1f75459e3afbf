/// Per-session lexer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Lex a leading U+FEFF as whitespace rather than a bad character.
    pub accept_bom: bool,
    /// Record a diagnostic for every bad character. The `BadCharacter`
    /// token is emitted either way.
    pub report_bad_characters: bool,
}

impl LexerOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accept_bom: true,
            report_bad_characters: true,
        }
    }

    /// Set whether a leading byte-order mark is accepted.
    #[must_use]
    pub const fn accept_bom(mut self, accept: bool) -> Self {
        self.accept_bom = accept;
        self
    }

    /// Set whether bad characters are reported as diagnostics.
    #[must_use]
    pub const fn report_bad_characters(mut self, report: bool) -> Self {
        self.report_bad_characters = report;
        self
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self::new()
    }
}
