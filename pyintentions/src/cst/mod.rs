//! Tree-sitter concrete syntax tree, used where the ruff tree has no nodes.
//!
//! Ruff's AST drops comments entirely. Comment-level operations parse the text
//! with tree-sitter instead and work from the exact byte ranges it reports.
//!
//! # Design Principles
//!
//! - **AST decides, CST cuts**: statement structure comes from the ruff tree
//! - **Byte-range anchored**: comments are matched by byte offsets, never by shape

mod comments;
mod parser;

pub use comments::{comment_at, comment_run, extract_comments, Comment};
pub use parser::{CstError, CstNode, CstParser, CstTree, Point};
