//! Parsed view of one Python file.
//!
//! The host's live tree is replaced by a tree the core owns: every operation
//! parses the current text with ruff's error-recovering parser into the closed
//! `ruff_python_ast` variants and discards it afterwards. Nothing here is cached
//! across edits.

mod locate;
mod strings;

pub use locate::{NodePath, NodeRef, PathEntry};
pub use strings::StringParts;

use crate::utils::LineIndex;
use ruff_python_ast::{Expr, ModExpression, ModModule, PySourceType, Stmt};
use ruff_python_parser::{parse_expression, parse_unchecked_source, Parsed};
use ruff_text_size::Ranged;

/// A parsed Python module together with its source text.
pub struct PyFile {
    source: String,
    parsed: Parsed<ModModule>,
    line_index: LineIndex,
}

impl std::fmt::Debug for PyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyFile")
            .field("len", &self.source.len())
            .field("statements", &self.body().len())
            .field("syntax_errors", &self.parsed.errors().len())
            .finish()
    }
}

impl PyFile {
    /// Parses whole-file text. Syntax errors do not fail the parse; the
    /// recovered tree is kept and malformed regions simply match nothing.
    #[must_use]
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let parsed = parse_unchecked_source(&source, PySourceType::Python);
        if !parsed.errors().is_empty() {
            tracing::debug!(
                errors = parsed.errors().len(),
                "parsed file with recoverable syntax errors"
            );
        }
        let line_index = LineIndex::new(&source);
        Self {
            source,
            parsed,
            line_index,
        }
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level statements in source order.
    #[must_use]
    pub fn body(&self) -> &[Stmt] {
        &self.parsed.syntax().body
    }

    /// Offset/line conversions for this text.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Whether the parser had to recover from syntax errors.
    #[must_use]
    pub fn has_syntax_errors(&self) -> bool {
        !self.parsed.errors().is_empty()
    }

    /// Source text of a node.
    #[must_use]
    pub fn text(&self, node: &impl Ranged) -> &str {
        &self.source[node.range().start().to_usize()..node.range().end().to_usize()]
    }

    /// Source text of a byte range.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    /// Ancestor chain of the nodes covering `offset`, outermost first.
    #[must_use]
    pub fn locate(&self, offset: usize) -> NodePath<'_> {
        NodePath::in_module(self.body(), offset)
    }

    /// 0-indexed line of a byte offset.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_index.line_of(offset)
    }

    /// Text of a 0-indexed line without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        match (
            self.line_index.line_start(line),
            self.line_index.line_end(line, &self.source),
        ) {
            (Some(start), Some(end)) => &self.source[start..end],
            _ => "",
        }
    }

    /// True when the node's first line holds only whitespace before it and its
    /// last line holds only whitespace or a comment after it.
    #[must_use]
    pub fn occupies_whole_lines(&self, node: &impl Ranged) -> bool {
        let start = node.range().start().to_usize();
        let end = node.range().end().to_usize();
        let first = self.line_of(start);
        let last = self.line_of(end);
        let Some(first_start) = self.line_index.line_start(first) else {
            return false;
        };
        let Some(last_end) = self.line_index.line_end(last, &self.source) else {
            return false;
        };
        let before = &self.source[first_start..start];
        let after = self.source[end.min(last_end)..last_end].trim();
        before.trim().is_empty() && (after.is_empty() || after.starts_with('#'))
    }
}

/// An expression fragment parsed on its own, e.g. the content of a string annotation.
pub struct Fragment {
    text: String,
    parsed: Parsed<ModExpression>,
}

impl Fragment {
    /// Parses `text` as a single expression. Returns `None` when it is not valid.
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let parsed = parse_expression(&text).ok()?;
        Some(Self { text, parsed })
    }

    /// The fragment's root expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.parsed.syntax().body
    }

    /// The fragment's text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Checks that synthesized text parses as a standalone expression.
#[must_use]
pub fn is_valid_expression(text: &str) -> bool {
    parse_expression(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recovers_from_errors() {
        let file = PyFile::parse("x: int | = None\ny = 2\n");
        assert!(file.has_syntax_errors());
        assert_eq!(file.body().len(), 2);
    }

    #[test]
    fn test_line_text() {
        let file = PyFile::parse("import os\r\nx = 1\n");
        assert_eq!(file.line_text(0), "import os");
        assert_eq!(file.line_text(1), "x = 1");
        assert_eq!(file.line_text(7), "");
    }

    #[test]
    fn test_occupies_whole_lines() {
        let file = PyFile::parse("x = 1; __version__ = '1'\n__author__ = 'a'  # me\n");
        assert!(!file.occupies_whole_lines(&file.body()[1]));
        assert!(file.occupies_whole_lines(&file.body()[2]));
    }

    #[test]
    fn test_fragment() {
        let fragment = Fragment::parse("int | None").unwrap();
        assert!(matches!(fragment.expr(), Expr::BinOp(_)));
        assert!(Fragment::parse("int |").is_none());
        assert!(is_valid_expression("Optional[Union[int, str]]"));
    }
}
