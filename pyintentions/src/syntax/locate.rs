//! Cursor location: the chain of syntax nodes covering an offset.

use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::{Ranged, TextRange};

/// A statement or expression node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn range(self) -> TextRange {
        match self {
            NodeRef::Stmt(stmt) => stmt.range(),
            NodeRef::Expr(expr) => expr.range(),
        }
    }

    #[must_use]
    pub fn as_stmt(self) -> Option<&'a Stmt> {
        match self {
            NodeRef::Stmt(stmt) => Some(stmt),
            NodeRef::Expr(_) => None,
        }
    }

    #[must_use]
    pub fn as_expr(self) -> Option<&'a Expr> {
        match self {
            NodeRef::Expr(expr) => Some(expr),
            NodeRef::Stmt(_) => None,
        }
    }
}

/// One node on a [`NodePath`].
#[derive(Debug, Clone, Copy)]
pub struct PathEntry<'a> {
    pub node: NodeRef<'a>,
    /// The expression is the whole annotation of a parameter, return type or
    /// annotated assignment.
    pub annotation_root: bool,
}

/// Nodes covering an offset, outermost first.
#[derive(Debug, Clone, Default)]
pub struct NodePath<'a> {
    entries: Vec<PathEntry<'a>>,
}

impl<'a> NodePath<'a> {
    /// Locates `offset` among module statements.
    #[must_use]
    pub fn in_module(body: &'a [Stmt], offset: usize) -> Self {
        let mut locator = Locator::new(offset);
        locator.visit_body(body);
        Self {
            entries: locator.entries,
        }
    }

    /// Locates `offset` inside a standalone expression, which counts as an
    /// annotation root.
    #[must_use]
    pub fn in_expr(root: &'a Expr, offset: usize) -> Self {
        let mut locator = Locator::new(offset);
        locator.annotation_pending = true;
        locator.visit_expr(root);
        Self {
            entries: locator.entries,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[PathEntry<'a>] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Covering statements, outermost first.
    pub fn stmts(&self) -> impl DoubleEndedIterator<Item = &'a Stmt> + '_ {
        self.entries.iter().filter_map(|entry| entry.node.as_stmt())
    }

    /// The innermost covering expression and its index in [`Self::entries`].
    #[must_use]
    pub fn innermost_expr(&self) -> Option<(usize, &'a Expr)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, entry)| entry.node.as_expr().map(|expr| (index, expr)))
    }

    /// The innermost covering statement.
    #[must_use]
    pub fn innermost_stmt(&self) -> Option<&'a Stmt> {
        self.stmts().next_back()
    }

    /// Parent of the entry at `index`.
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<&PathEntry<'a>> {
        index.checked_sub(1).and_then(|parent| self.entries.get(parent))
    }
}

struct Locator<'a> {
    offset: usize,
    entries: Vec<PathEntry<'a>>,
    annotation_pending: bool,
}

impl Locator<'_> {
    fn new(offset: usize) -> Self {
        Self {
            offset,
            entries: Vec::new(),
            annotation_pending: false,
        }
    }

    fn covers(&self, range: TextRange) -> bool {
        let start = range.start().to_usize();
        let end = range.end().to_usize();
        start <= self.offset && self.offset < end
    }
}

impl<'a> Visitor<'a> for Locator<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if self.covers(stmt.range()) {
            self.entries.push(PathEntry {
                node: NodeRef::Stmt(stmt),
                annotation_root: false,
            });
            visitor::walk_stmt(self, stmt);
        }
    }

    fn visit_annotation(&mut self, expr: &'a Expr) {
        self.annotation_pending = true;
        self.visit_expr(expr);
        self.annotation_pending = false;
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        let annotation_root = std::mem::take(&mut self.annotation_pending);
        if self.covers(expr.range()) {
            self.entries.push(PathEntry {
                node: NodeRef::Expr(expr),
                annotation_root,
            });
            visitor::walk_expr(self, expr);
        }
    }
}
