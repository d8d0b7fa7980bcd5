//! Whole-file text buffer with deferred, atomic splices.

use super::{ByteRangeRewriter, Edit, RewriteError};
use crate::utils::LineIndex;

/// A document buffer. Splices are queued and only become visible on [`Document::commit`].
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    line_index: LineIndex,
    pending: Vec<Edit>,
}

impl Document {
    /// Creates a document over the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            text,
            line_index,
            pending: Vec::new(),
        }
    }

    /// Current committed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 0-indexed line number containing `offset`.
    #[must_use]
    pub fn line_number_of(&self, offset: usize) -> usize {
        self.line_index.line_of(offset)
    }

    /// Byte offset where the given 0-indexed line starts.
    #[must_use]
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        self.line_index.line_start(line)
    }

    /// Queues a replacement of `start..end`.
    pub fn replace_range(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.pending.push(Edit::new(start, end, text));
    }

    /// Queues an insertion before `offset`.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.pending.push(Edit::insert(offset, text));
    }

    /// Queues a deletion of `start..end`.
    pub fn delete(&mut self, start: usize, end: usize) {
        self.pending.push(Edit::delete(start, end));
    }

    /// Queues an already-built edit.
    pub fn push(&mut self, edit: Edit) {
        self.pending.push(edit);
    }

    /// Whether any splice is waiting to be committed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies every pending splice at once.
    ///
    /// On error the committed text is left untouched and the pending edits are dropped.
    pub fn commit(&mut self) -> Result<&str, RewriteError> {
        let edits = std::mem::take(&mut self.pending);
        if edits.is_empty() {
            return Ok(&self.text);
        }
        let mut rewriter = ByteRangeRewriter::new(self.text.as_str());
        rewriter.add_edits(edits);
        let updated = rewriter.apply()?;
        self.line_index = LineIndex::new(&updated);
        self.text = updated;
        Ok(&self.text)
    }

    /// Consumes the document, committing pending splices.
    pub fn into_text(mut self) -> Result<String, RewriteError> {
        self.commit()?;
        Ok(self.text)
    }
}
