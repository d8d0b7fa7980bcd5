//! Comment extraction from Python source using CST.
//!
//! Tree-sitter captures comments as explicit nodes, making extraction reliable.

use super::parser::CstTree;
use std::ops::Range;

/// A comment extracted from source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The comment text (including `#` prefix)
    pub text: String,
    pub start_byte: usize,
    pub end_byte: usize,
    /// Line number (1-indexed for consistency with Ruff)
    pub line: usize,
    /// Whether this comment is inline (after code on same line)
    pub is_inline: bool,
}

impl Comment {
    /// Comment text without the `# ` or `#` prefix.
    #[must_use]
    pub fn content(&self) -> &str {
        let text = self.text.strip_prefix('#').unwrap_or(&self.text);
        text.strip_prefix(' ').unwrap_or(text)
    }

    /// True when only a single line break and horizontal whitespace separate
    /// `self` from `next`.
    #[must_use]
    pub fn continues_into(&self, next: &Comment, source: &str) -> bool {
        if self.end_byte > next.start_byte {
            return false;
        }
        let between = &source[self.end_byte..next.start_byte];
        between.matches('\n').count() == 1
            && between
                .chars()
                .all(|c| c == '\n' || c == '\r' || c == ' ' || c == '\t')
    }
}

/// Extract all comments from a CST tree, in source order.
#[must_use]
pub fn extract_comments(tree: &CstTree) -> Vec<Comment> {
    tree.root
        .find_by_kind("comment")
        .into_iter()
        .map(|node| {
            let source = &tree.source;
            let mut end_byte = node.end_byte;
            if source[..end_byte].ends_with('\r') {
                end_byte -= 1;
            }
            let line_start = source[..node.start_byte]
                .rfind('\n')
                .map_or(0, |pos| pos + 1);
            let before_comment = &source[line_start..node.start_byte];
            let is_inline = before_comment.chars().any(|c| !c.is_whitespace());

            Comment {
                text: source[node.start_byte..end_byte].to_string(),
                start_byte: node.start_byte,
                end_byte,
                line: node.start_point.row + 1,
                is_inline,
            }
        })
        .collect()
}

/// Index of the comment under `offset`. The end of a comment counts as on it,
/// so a cursor parked at the end of the line still finds the comment.
#[must_use]
pub fn comment_at(comments: &[Comment], offset: usize) -> Option<usize> {
    comments
        .iter()
        .position(|comment| comment.start_byte <= offset && offset <= comment.end_byte)
}

/// The maximal run of own-line comments around `index`.
#[must_use]
pub fn comment_run(comments: &[Comment], index: usize, source: &str) -> Range<usize> {
    let Some(anchor) = comments.get(index) else {
        return index..index;
    };
    if anchor.is_inline {
        return index..index + 1;
    }
    let mut start = index;
    while start > 0 {
        let previous = &comments[start - 1];
        if previous.is_inline || !previous.continues_into(&comments[start], source) {
            break;
        }
        start -= 1;
    }
    let mut end = index + 1;
    while end < comments.len() {
        let next = &comments[end];
        if next.is_inline || !comments[end - 1].continues_into(next, source) {
            break;
        }
        end += 1;
    }
    start..end
}
