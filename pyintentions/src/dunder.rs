//! Module-level dunder assignments and their PEP 8 position.

use crate::scope::{is_module_scope, module_statements};
use crate::syntax::PyFile;
use crate::utils::is_dunder;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Literal shape of a dunder's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    List,
    /// `__all__ = "a", "b"`
    Tuple,
    /// `__all__ = ("a", "b")`
    ParenthesizedTuple,
}

impl ValueKind {
    /// Brackets of the literal, empty for a bare tuple.
    #[must_use]
    pub fn brackets(self) -> (&'static str, &'static str) {
        match self {
            ValueKind::List => ("[", "]"),
            ValueKind::Tuple => ("", ""),
            ValueKind::ParenthesizedTuple => ("(", ")"),
        }
    }

    #[must_use]
    pub fn is_tuple(self) -> bool {
        !matches!(self, ValueKind::List)
    }
}

/// A module-scope assignment to a dunder name.
#[derive(Debug, Clone)]
pub struct ModuleDunder<'a> {
    pub name: String,
    pub stmt: &'a Stmt,
    pub value: Option<&'a Expr>,
    /// Set when the value is a list or tuple literal.
    pub value_kind: Option<ValueKind>,
    pub elements: &'a [Expr],
}

impl<'a> ModuleDunder<'a> {
    fn from_stmt(stmt: &'a Stmt) -> Option<Self> {
        let (target, value) = match stmt {
            Stmt::Assign(node) => (node.targets.first()?, Some(&*node.value)),
            Stmt::AnnAssign(node) => (&*node.target, node.value.as_deref()),
            _ => return None,
        };
        let Expr::Name(target) = target else {
            return None;
        };
        if !is_dunder(target.id.as_str()) {
            return None;
        }
        let (value_kind, elements) = match value {
            Some(Expr::List(list)) => (Some(ValueKind::List), list.elts.as_slice()),
            Some(Expr::Tuple(tuple)) if tuple.parenthesized => {
                (Some(ValueKind::ParenthesizedTuple), tuple.elts.as_slice())
            }
            Some(Expr::Tuple(tuple)) => (Some(ValueKind::Tuple), tuple.elts.as_slice()),
            _ => (None, &[][..]),
        };
        Some(Self {
            name: target.id.to_string(),
            stmt,
            value,
            value_kind,
            elements,
        })
    }

    /// String values of the string-literal elements, in order.
    pub fn string_elements(&self) -> impl Iterator<Item = &'a str> {
        self.elements.iter().filter_map(|element| match element {
            Expr::StringLiteral(literal) => Some(literal.value.to_str()),
            _ => None,
        })
    }
}

/// Name of the dunder assigned by `stmt`, if it is one.
#[must_use]
pub fn dunder_name(stmt: &Stmt) -> Option<String> {
    ModuleDunder::from_stmt(stmt).map(|dunder| dunder.name)
}

/// First module-scope assignment to `name`.
#[must_use]
pub fn find_dunder_assignment<'a>(file: &'a PyFile, name: &str) -> Option<ModuleDunder<'a>> {
    module_statements(file.body())
        .into_iter()
        .filter_map(ModuleDunder::from_stmt)
        .find(|dunder| dunder.name == name)
}

/// The module-scope dunder assignment enclosing `offset`.
#[must_use]
pub fn dunder_at(file: &PyFile, offset: usize) -> Option<ModuleDunder<'_>> {
    let path = file.locate(offset);
    let stmts: Vec<&Stmt> = path.stmts().collect();
    stmts.iter().enumerate().find_map(|(depth, &stmt)| {
        let dunder = ModuleDunder::from_stmt(stmt)?;
        is_module_scope(stmts[..depth].iter().copied()).then_some(dunder)
    })
}

/// Name of the dunder assignment `offset` is nested inside, if any.
#[must_use]
pub fn is_on_dunder_assignment(file: &PyFile, offset: usize) -> Option<String> {
    dunder_at(file, offset).map(|dunder| dunder.name)
}

/// `from __future__ import ...`
#[must_use]
pub fn is_future_import(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::ImportFrom(node)
        if node.level == 0 && node.module.as_ref().is_some_and(|module| module.as_str() == "__future__"))
}

/// An `import` or `from` import other than `__future__`.
#[must_use]
pub fn is_regular_import(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Import(_)) || (matches!(stmt, Stmt::ImportFrom(_)) && !is_future_import(stmt))
}

/// A bare string expression statement.
#[must_use]
pub fn is_docstring_stmt(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(node) if node.value.is_string_literal_expr())
}

/// Index past the module docstring and the `__future__` imports.
#[must_use]
pub fn find_header_end(body: &[Stmt]) -> usize {
    let mut index = usize::from(body.first().is_some_and(is_docstring_stmt));
    while body.get(index).is_some_and(is_future_import) {
        index += 1;
    }
    index
}

/// Where dunders belong: after the docstring, `__future__` imports and any
/// dunders already grouped there.
#[must_use]
pub fn find_pep8_insertion_index(body: &[Stmt]) -> usize {
    let mut index = find_header_end(body);
    while body.get(index).is_some_and(|stmt| dunder_name(stmt).is_some()) {
        index += 1;
    }
    index
}

/// Whether `__all__` lists `name` as a string literal.
#[must_use]
pub fn is_name_in_all(file: &PyFile, name: &str) -> bool {
    find_dunder_assignment(file, "__all__")
        .is_some_and(|all| all.string_elements().any(|element| element == name))
}

/// Position of `stmt` among the top-level statements.
#[must_use]
pub fn top_level_index(body: &[Stmt], stmt: &Stmt) -> Option<usize> {
    body.iter().position(|candidate| std::ptr::eq(candidate, stmt))
}

/// Whether the dunder at top-level `index` sits after a regular import that
/// should come after it.
#[must_use]
pub fn is_out_of_pep8_position(body: &[Stmt], index: usize) -> bool {
    let target = find_pep8_insertion_index(body);
    target < index && body[target..index].iter().any(is_regular_import)
}

/// The dunder at `offset` when it can be moved to its PEP 8 position.
#[must_use]
pub fn movable_dunder_at(file: &PyFile, offset: usize) -> Option<ModuleDunder<'_>> {
    let dunder = dunder_at(file, offset)?;
    let index = top_level_index(file.body(), dunder.stmt)?;
    if !file.occupies_whole_lines(dunder.stmt) {
        return None;
    }
    is_out_of_pep8_position(file.body(), index).then_some(dunder)
}

/// Start of the statement's first line and the line after its last line.
#[must_use]
pub fn statement_lines(file: &PyFile, stmt: &Stmt) -> (usize, usize) {
    (
        file.line_of(stmt.start().to_usize()),
        file.line_of(stmt.end().to_usize()),
    )
}
