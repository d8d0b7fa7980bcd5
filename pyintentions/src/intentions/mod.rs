//! The intention catalogue.
//!
//! An intention first answers whether it applies at a cursor offset, and
//! with what label. Only an offered intention is applied; applying one
//! returns the whole rewritten file.

use crate::config::Settings;
use crate::edit::{Document, Edit, RewriteError};
use crate::error::IntentionError;
use crate::syntax::PyFile;
use serde::Serialize;

mod docs;
mod exports;
pub mod ids;
mod typing;

pub use docs::{CommentToDocstring, DocstringToComment};
pub use exports::{AddToAll, MoveDunder, RemoveFromAll};
pub use typing::TypingIntention;

/// Cursor position in a parsed file, plus the settings in effect.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// File the cursor is in.
    pub file: &'a PyFile,
    /// Byte offset of the cursor.
    pub offset: usize,
    /// Folded configuration.
    pub settings: &'a Settings,
}

impl<'a> Context<'a> {
    /// Creates a context for `offset` in `file`.
    pub fn new(file: &'a PyFile, offset: usize, settings: &'a Settings) -> Self {
        Self {
            file,
            offset,
            settings,
        }
    }

    fn not_available(&self, id: &str) -> IntentionError {
        IntentionError::NotAvailable {
            id: id.to_string(),
            offset: self.offset,
        }
    }
}

/// An intention available at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    /// Id of the intention making the offer.
    pub id: &'static str,
    /// Menu text, e.g. `Add 'foo' to __all__`.
    pub label: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with an intention.
pub struct IntentionMetadata {
    /// Stable id of the intention.
    pub id: &'static str,
    /// Label shown when no cursor-specific label applies.
    pub family: &'static str,
}

/// Trait defining a source rewrite offered at a cursor position.
pub trait Intention: Send + Sync {
    /// Returns the full metadata for the intention.
    fn metadata(&self) -> IntentionMetadata;
    /// Returns the unique id of the intention.
    fn id(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the generic label of the intention.
    fn family(&self) -> &'static str {
        self.metadata().family
    }
    /// Whether the intention applies at the cursor, and under what label.
    fn detect(&self, context: &Context<'_>) -> Option<Offer>;
    /// Whole-file text after applying the intention at the cursor.
    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError>;
}

/// Every intention, in menu order.
pub fn all_intentions() -> Vec<Box<dyn Intention>> {
    let mut intentions: Vec<Box<dyn Intention>> = vec![
        Box::new(AddToAll),
        Box::new(RemoveFromAll),
        Box::new(MoveDunder),
    ];
    intentions.extend(
        typing::typing_intentions()
            .into_iter()
            .map(|intention| Box::new(intention) as Box<dyn Intention>),
    );
    intentions.push(Box::new(CommentToDocstring));
    intentions.push(Box::new(DocstringToComment));
    intentions
}

/// The intention registered under `id`.
pub fn find_intention(id: &str) -> Option<Box<dyn Intention>> {
    all_intentions()
        .into_iter()
        .find(|intention| intention.id() == id)
}

/// Every offer available at the cursor, in menu order.
pub fn available_at(context: &Context<'_>) -> Vec<Offer> {
    let offers: Vec<Offer> = all_intentions()
        .iter()
        .filter_map(|intention| intention.detect(context))
        .collect();
    tracing::debug!(offset = context.offset, count = offers.len(), "collected offers");
    offers
}

/// Applies the intention `id` at the cursor.
///
/// # Errors
///
/// Returns an error if `id` is unknown, the intention is not available at the
/// cursor, or its splices do not fit the text.
pub fn apply_intention(id: &str, context: &Context<'_>) -> Result<String, IntentionError> {
    let intention =
        find_intention(id).ok_or_else(|| IntentionError::UnknownIntention(id.to_string()))?;
    tracing::debug!(id, offset = context.offset, "applying intention");
    intention.apply(context)
}

fn apply_edits(source: &str, edits: impl IntoIterator<Item = Edit>) -> Result<String, RewriteError> {
    let mut document = Document::new(source);
    for edit in edits {
        document.push(edit);
    }
    document.into_text()
}
