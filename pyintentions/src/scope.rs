//! Module-scope analysis.
//!
//! Control-flow blocks are transparent: a name bound inside `if`, `for`,
//! `while`, `try`, `with` or `match` at the top of a file is still a module
//! name. Function and class bodies never are.

use crate::syntax::PyFile;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Whether `stmt` opens a control-flow block rather than a new scope.
#[must_use]
pub fn is_control_flow(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::If(_) | Stmt::For(_) | Stmt::While(_) | Stmt::Try(_) | Stmt::With(_) | Stmt::Match(_)
    )
}

/// A node is at module scope when every statement enclosing it is a
/// control-flow block.
pub fn is_module_scope<'a>(ancestors: impl IntoIterator<Item = &'a Stmt>) -> bool {
    ancestors.into_iter().all(is_control_flow)
}

/// Bodies directly nested in a control-flow statement.
#[must_use]
pub fn nested_bodies(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::If(node) => std::iter::once(node.body.as_slice())
            .chain(node.elif_else_clauses.iter().map(|clause| clause.body.as_slice()))
            .collect(),
        Stmt::For(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::While(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::Try(node) => {
            let mut bodies = vec![node.body.as_slice()];
            bodies.extend(node.handlers.iter().map(|handler| {
                let ruff_python_ast::ExceptHandler::ExceptHandler(handler) = handler;
                handler.body.as_slice()
            }));
            bodies.push(&node.orelse);
            bodies.push(&node.finalbody);
            bodies
        }
        Stmt::With(node) => vec![node.body.as_slice()],
        Stmt::Match(node) => node.cases.iter().map(|case| case.body.as_slice()).collect(),
        _ => Vec::new(),
    }
}

/// Every module-scope statement in source order, descending through
/// control-flow blocks.
#[must_use]
pub fn module_statements(body: &[Stmt]) -> Vec<&Stmt> {
    let mut statements = Vec::new();
    collect_module_statements(body, &mut statements);
    statements
}

fn collect_module_statements<'a>(body: &'a [Stmt], out: &mut Vec<&'a Stmt>) {
    for stmt in body {
        out.push(stmt);
        if is_control_flow(stmt) {
            for nested in nested_bodies(stmt) {
                collect_module_statements(nested, out);
            }
        }
    }
}

/// The statement list that directly holds `stmt`, looking through
/// control-flow blocks only.
#[must_use]
pub fn enclosing_block<'a>(body: &'a [Stmt], stmt: &Stmt) -> Option<&'a [Stmt]> {
    if body.iter().any(|candidate| std::ptr::eq(candidate, stmt)) {
        return Some(body);
    }
    body.iter()
        .filter(|candidate| is_control_flow(candidate))
        .flat_map(nested_bodies)
        .find_map(|nested| enclosing_block(nested, stmt))
}

/// Plain names bound by an assignment target, tuple and list targets flattened.
pub fn target_names<'a>(target: &'a Expr, out: &mut Vec<&'a ruff_python_ast::ExprName>) {
    match target {
        Expr::Name(name) => out.push(name),
        Expr::Tuple(tuple) => tuple.elts.iter().for_each(|elt| target_names(elt, out)),
        Expr::List(list) => list.elts.iter().for_each(|elt| target_names(elt, out)),
        Expr::Starred(starred) => target_names(&starred.value, out),
        _ => {}
    }
}

/// Start and end of a block body.
fn body_span(body: &[Stmt]) -> Option<(usize, usize)> {
    let first = body.first()?;
    let last = body.last()?;
    Some((first.start().to_usize(), last.end().to_usize()))
}

/// The module-level name the cursor sits on, if any.
///
/// A def or class counts only while the cursor is on its header, never in its
/// body. An assignment counts only when the cursor is on one of its target
/// names, and `__all__` itself is skipped.
#[must_use]
pub fn find_top_level_name(file: &PyFile, offset: usize) -> Option<String> {
    let path = file.locate(offset);

    let outermost_def = path.stmts().find(|stmt| {
        matches!(stmt, Stmt::FunctionDef(_) | Stmt::ClassDef(_))
    });
    if let Some(def) = outermost_def {
        let (name, body) = match def {
            Stmt::FunctionDef(node) => (node.name.as_str(), node.body.as_slice()),
            Stmt::ClassDef(node) => (node.name.as_str(), node.body.as_slice()),
            _ => return None,
        };
        let in_body = body_span(body).is_some_and(|(start, end)| start <= offset && offset <= end);
        return (!in_body).then(|| name.to_string());
    }

    let assignment = path
        .stmts()
        .find(|stmt| matches!(stmt, Stmt::Assign(_) | Stmt::AnnAssign(_)))?;
    let mut names = Vec::new();
    match assignment {
        Stmt::Assign(node) => node.targets.iter().for_each(|t| target_names(t, &mut names)),
        Stmt::AnnAssign(node) => target_names(&node.target, &mut names),
        _ => {}
    }
    names
        .into_iter()
        .find(|name| {
            name.start().to_usize() <= offset && offset <= name.end().to_usize()
        })
        .map(|name| name.id.as_str())
        .filter(|name| *name != "__all__")
        .map(str::to_string)
}
