use ruff_text_size::{Ranged, TextRange};

/// A utility struct to convert between byte offsets and line numbers.
///
/// The parser works with byte offsets while the reflow engine and the CLI
/// talk about lines, so both directions are needed.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
    /// Total length of the indexed text.
    len: usize,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration for performance since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Converts a byte offset to a 0-indexed line number.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Byte offset where the given 0-indexed line starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset of the end of the given line, excluding its line terminator.
    #[must_use]
    pub fn line_end(&self, line: usize, source: &str) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.len, |next| next - 1);
        let end = if end > start && source.as_bytes().get(end - 1) == Some(&b'\r') {
            end - 1
        } else {
            end
        };
        Some(end)
    }

    /// Number of lines (a trailing newline opens one more, empty, line).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a 1-indexed line and 1-indexed column (in characters) to a byte offset.
    #[must_use]
    pub fn offset_of(&self, line: usize, column: usize, source: &str) -> Option<usize> {
        let start = self.line_start(line.checked_sub(1)?)?;
        let end = self.line_end(line - 1, source)?;
        let text = &source[start..end];
        let column = column.checked_sub(1)?;
        if column == text.chars().count() {
            return Some(end);
        }
        text.char_indices().nth(column).map(|(i, _)| start + i)
    }
}

/// Byte range of a ranged node as plain offsets.
#[must_use]
pub fn span(node: &impl Ranged) -> (usize, usize) {
    let range: TextRange = node.range();
    (range.start().to_usize(), range.end().to_usize())
}

/// Leading spaces and tabs of a line.
#[must_use]
pub fn indentation_of(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Checks if a name is a dunder (`__name__` with at least one inner character).
#[must_use]
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Checks if the line holds nothing but whitespace.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
