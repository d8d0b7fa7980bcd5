//! Text splicing shared by every intention.
//!
//! `ByteRangeRewriter` validates and applies a batch of byte-range edits;
//! `Document` layers line queries and an atomic commit on top of it.

mod document;
mod rewriter;

pub use document::Document;
pub use rewriter::{ByteRangeRewriter, Edit, EditBuilder, RewriteError};
