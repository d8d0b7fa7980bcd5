//! Comment block and docstring conversions.

use super::{apply_edits, ids, Context, Intention, IntentionMetadata, Offer};
use crate::docstring::{comment_to_docstring, docstring_to_comment};
use crate::error::IntentionError;

/// Turns the `#` comment block under the cursor into a docstring.
pub struct CommentToDocstring;

impl Intention for CommentToDocstring {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: ids::COMMENT_TO_DOCSTRING,
            family: "Convert comment to docstring",
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        comment_to_docstring(context.file.source(), context.offset).map(|_| Offer {
            id: self.id(),
            label: self.family().to_string(),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        let edit = comment_to_docstring(context.file.source(), context.offset)
            .ok_or_else(|| context.not_available(self.id()))?;
        Ok(apply_edits(context.file.source(), [edit])?)
    }
}

/// Turns the docstring under the cursor into a `#` comment block.
pub struct DocstringToComment;

impl Intention for DocstringToComment {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: ids::DOCSTRING_TO_COMMENT,
            family: "Convert docstring to comment",
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        docstring_to_comment(context.file, context.offset).map(|_| Offer {
            id: self.id(),
            label: self.family().to_string(),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        let edit = docstring_to_comment(context.file, context.offset)
            .ok_or_else(|| context.not_available(self.id()))?;
        Ok(apply_edits(context.file.source(), [edit])?)
    }
}
