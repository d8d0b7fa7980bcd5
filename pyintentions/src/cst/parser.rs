//! Tree-sitter based CST parser for Python source code.

use thiserror::Error;
use tree_sitter::{Node, Parser};

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "comment", "expression_statement")
    pub kind: String,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    pub start_point: Point,
    pub end_point: Point,
    pub children: Vec<CstNode>,
}

impl CstNode {
    fn from_ts_node(node: Node<'_>) -> Self {
        let children = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .map(Self::from_ts_node)
            .collect();

        Self {
            kind: node.kind().to_string(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
            children,
        }
    }

    /// All nodes of a specific kind, in source order.
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a CstNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    pub root: CstNode,
    pub source: String,
}

impl CstTree {
    /// Extract a slice of source code by byte range
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }
}

/// Error during CST parsing
#[derive(Debug, Error)]
pub enum CstError {
    #[error("failed to create CST parser: {0}")]
    ParserCreation(String),
    #[error("failed to parse source as Python")]
    ParseFailed,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for Python
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if tree-sitter gives up on the input
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        Ok(CstTree {
            root: CstNode::from_ts_node(tree.root_node()),
            source: source.to_string(),
        })
    }
}
