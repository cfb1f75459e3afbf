use crate::token::Span;

/// Owned input text as Unicode scalar values.
///
/// Token offsets index into [`Source::chars`]. Line starts are recorded
/// up front so diagnostics can be reported with line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl Source {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (i, &ch) in chars.iter().enumerate() {
            match ch {
                '\n' => line_starts.push(i + 1),
                // \r\n is one break; a lone \r is its own
                '\r' if chars.get(i + 1) != Some(&'\n') => line_starts.push(i + 1),
                _ => {}
            }
        }
        Self { chars, line_starts }
    }

    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The text covered by `span`, clamped to the input.
    #[must_use]
    pub fn slice(&self, span: Span) -> String {
        let start = span.start.min(self.chars.len());
        let end = span.end().min(self.chars.len());
        self.chars[start..end].iter().collect()
    }

    /// One-based line and column of `offset`.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
