//! Where a typing rewrite happens: the host file, or the content of a string
//! annotation parsed on its own.

use super::expr::is_pipe;
use super::resolve::{Resolver, TypingSymbol};
use crate::edit::Edit;
use crate::syntax::{Fragment, NodePath, PyFile, StringParts};
use crate::utils::span;
use ruff_python_ast::{Expr, Stmt};

/// Host literal an embedded expression was parsed from.
#[derive(Debug)]
struct Injection<'a> {
    literal_start: usize,
    literal_text: &'a str,
    parts: StringParts,
}

/// The tree a typing rewrite works on, with a way back to host offsets.
#[derive(Debug)]
pub struct TypeSite<'a> {
    source: &'a str,
    path: NodePath<'a>,
    injection: Option<Injection<'a>>,
}

/// Runs `f` on the type site under `offset`: the string annotation's own tree
/// when the cursor is inside one, the file's tree otherwise.
pub fn with_type_site<R>(
    file: &PyFile,
    offset: usize,
    f: impl FnOnce(&TypeSite<'_>) -> Option<R>,
) -> Option<R> {
    let path = file.locate(offset);
    let host = TypeSite {
        source: file.source(),
        path,
        injection: None,
    };

    let Some((index, Expr::StringLiteral(literal))) = host.path.innermost_expr() else {
        return f(&host);
    };
    if host.type_root(index).is_none() || host.is_value_string(index) {
        return f(&host);
    }
    if literal.value.is_implicit_concatenated() {
        return None;
    }
    let (literal_start, literal_end) = span(literal);
    let literal_text = &file.source()[literal_start..literal_end];
    let parts = StringParts::parse(literal_text)?;
    let content = &literal_text[parts.content.clone()];
    // Escapes would shift offsets between the raw and decoded text.
    if content != literal.value.to_str() {
        return None;
    }
    let fragment = Fragment::parse(content)?;
    let inner_offset = offset
        .saturating_sub(literal_start + parts.content.start)
        .min(content.len());
    tracing::trace!(inner_offset, "typing rewrite inside string annotation");
    let site = TypeSite {
        source: fragment.text(),
        path: NodePath::in_expr(fragment.expr(), inner_offset),
        injection: Some(Injection {
            literal_start,
            literal_text,
            parts,
        }),
    };
    f(&site)
}

fn is_type_alias_annotation(expr: &Expr) -> bool {
    match expr {
        Expr::Name(name) => name.id.as_str() == "TypeAlias",
        Expr::Attribute(attribute) => attribute.attr.as_str() == "TypeAlias",
        _ => false,
    }
}

fn subscript_base_name(expr: &Expr) -> Option<&str> {
    let Expr::Subscript(subscript) = expr else {
        return None;
    };
    match &*subscript.value {
        Expr::Name(name) => Some(name.id.as_str()),
        Expr::Attribute(attribute) => Some(attribute.attr.as_str()),
        _ => None,
    }
}

impl<'a> TypeSite<'a> {
    /// Text the site's node ranges index into.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn path(&self) -> &NodePath<'a> {
        &self.path
    }

    #[must_use]
    pub fn is_injected(&self) -> bool {
        self.injection.is_some()
    }

    #[must_use]
    pub fn text(&self, expr: &Expr) -> &'a str {
        let (start, end) = span(expr);
        &self.source[start..end]
    }

    /// Splice in host-file coordinates replacing `expr` with `replacement`.
    #[must_use]
    pub fn replace(&self, expr: &Expr, replacement: &str) -> Edit {
        let (start, end) = span(expr);
        match &self.injection {
            None => Edit::with_description(start, end, replacement, "rewrite type expression"),
            Some(injection) => {
                let content = format!(
                    "{}{}{}",
                    &self.source[..start],
                    replacement,
                    &self.source[end..]
                );
                Edit::with_description(
                    injection.literal_start,
                    injection.literal_start + injection.literal_text.len(),
                    injection.parts.rebuild(injection.literal_text, &content),
                    "rewrite string annotation",
                )
            }
        }
    }

    /// Whether the entry at `index` is the whole of a type position: an
    /// annotation, a `type` alias value or a `TypeAlias`-annotated value.
    #[must_use]
    pub fn is_type_root(&self, index: usize) -> bool {
        let entries = self.path.entries();
        let Some(entry) = entries.get(index) else {
            return false;
        };
        if entry.annotation_root {
            return true;
        }
        let Some(expr) = entry.node.as_expr() else {
            return false;
        };
        match self.path.parent(index).and_then(|parent| parent.node.as_stmt()) {
            Some(Stmt::TypeAlias(alias)) => std::ptr::eq(&*alias.value, expr),
            Some(Stmt::AnnAssign(assign)) => {
                is_type_alias_annotation(&assign.annotation)
                    && assign
                        .value
                        .as_deref()
                        .is_some_and(|value| std::ptr::eq(value, expr))
            }
            _ => false,
        }
    }

    /// Index of the type position containing the entry at `index`.
    #[must_use]
    pub fn type_root(&self, index: usize) -> Option<usize> {
        (0..=index).rev().find(|&candidate| self.is_type_root(candidate))
    }

    /// A string in a type position that is a value rather than a forward
    /// reference: `Literal["a"]` members and `Annotated` metadata.
    fn is_value_string(&self, index: usize) -> bool {
        let entries = self.path.entries();
        (0..index).any(|ancestor| {
            let Some(expr) = entries[ancestor].node.as_expr() else {
                return false;
            };
            match subscript_base_name(expr) {
                Some("Literal") => true,
                Some("Annotated") => {
                    let Expr::Subscript(subscript) = expr else {
                        return false;
                    };
                    let Expr::Tuple(tuple) = &*subscript.slice else {
                        return false;
                    };
                    let Some(target) = entries.get(ancestor + 2).and_then(|e| e.node.as_expr())
                    else {
                        return false;
                    };
                    !tuple.elts.first().is_some_and(|first| std::ptr::eq(first, target))
                }
                _ => false,
            }
        })
    }

    /// The pipe chain around the cursor, taken whole, when it sits in a type
    /// position.
    #[must_use]
    pub fn pipe_chain(&self) -> Option<(usize, &'a Expr)> {
        let entries = self.path.entries();
        let (mut index, mut expr) = entries.iter().enumerate().rev().find_map(|(i, entry)| {
            entry
                .node
                .as_expr()
                .filter(|expr| matches!(expr, Expr::BinOp(_)))
                .map(|expr| (i, expr))
        })?;
        if !is_pipe(expr) {
            return None;
        }
        while let Some(parent) = index
            .checked_sub(1)
            .and_then(|parent| entries[parent].node.as_expr())
            .filter(|parent| is_pipe(parent))
        {
            index -= 1;
            expr = parent;
        }
        self.type_root(index)?;
        Some((index, expr))
    }

    /// The innermost `symbol[...]` subscript around the cursor.
    #[must_use]
    pub fn typing_subscript(
        &self,
        resolver: &Resolver<'_>,
        symbol: TypingSymbol,
    ) -> Option<(usize, &'a Expr)> {
        self.path
            .entries()
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, entry)| {
                let expr = entry.node.as_expr()?;
                let Expr::Subscript(subscript) = expr else {
                    return None;
                };
                (resolver.symbol_of(&subscript.value) == Some(symbol)).then_some((index, expr))
            })
    }

    /// Parent expression of the entry at `index`.
    #[must_use]
    pub fn parent_expr(&self, index: usize) -> Option<&'a Expr> {
        self.path.parent(index).and_then(|parent| parent.node.as_expr())
    }
}
