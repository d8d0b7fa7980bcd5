//! The typing rewrites: each finds its form around the cursor and prepares a
//! splice plus the imports to add and to clean up afterwards.

use super::expr::{
    flatten_pipe, is_looser_than_pipe, is_none, is_pipe, operand_text, pipe_needs_parens,
    TypeExpression,
};
use super::imports::{ensure_imported, remove_unused};
use super::resolve::{Resolver, TypingSymbol};
use super::site::TypeSite;
use crate::config::Settings;
use crate::edit::{Document, Edit, RewriteError};
use ruff_python_ast::Expr;

/// A prepared typing rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRewrite {
    pub edit: Edit,
    /// Imports the new text needs, in the order they are written.
    pub add_imports: Vec<TypingSymbol>,
    /// Imports that may have lost their last use.
    pub cleanup: Vec<TypingSymbol>,
}

impl TypeRewrite {
    fn new(edit: Edit) -> Self {
        Self {
            edit,
            add_imports: Vec::new(),
            cleanup: Vec::new(),
        }
    }

    fn adding(mut self, symbols: &[TypingSymbol]) -> Self {
        self.add_imports.extend_from_slice(symbols);
        self
    }

    fn cleaning(mut self, symbols: &[TypingSymbol]) -> Self {
        self.cleanup.extend_from_slice(symbols);
        self
    }

    /// Applies the splice to `source`, then fixes up imports.
    ///
    /// # Errors
    ///
    /// Returns an error if the splice does not fit the text.
    pub fn apply(&self, source: &str, settings: &Settings) -> Result<String, RewriteError> {
        let mut document = Document::new(source);
        document.push(self.edit.clone());
        let text = document.into_text()?;
        let text = ensure_imported(
            &text,
            &self.add_imports,
            settings,
            Some(self.edit.start_byte),
        );
        Ok(remove_unused(&text, &self.cleanup, settings))
    }
}

/// Replaces the node at path `index` with pipe-chain text, parenthesized
/// when its parent binds tighter than `|`.
fn replace_with_pipe(site: &TypeSite<'_>, index: usize, node: &Expr, text: &str) -> Edit {
    match site.parent_expr(index) {
        Some(parent) if pipe_needs_parens(parent, node) => site.replace(node, &format!("({text})")),
        _ => site.replace(node, text),
    }
}

/// `Optional[X]` to `X | None`, flattening a `Union` argument.
#[must_use]
pub fn optional_to_pipe(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let (index, node) = site.typing_subscript(resolver, TypingSymbol::Optional)?;
    let TypeExpression::Optional { inner, .. } = TypeExpression::build(node, resolver) else {
        return None;
    };
    let mut cleanup = vec![TypingSymbol::Optional];
    if matches!(*inner, TypeExpression::Union { .. }) {
        cleanup.push(TypingSymbol::Union);
    }
    let members = inner.members();
    let mut parts: Vec<String> = members
        .iter()
        .map(|member| operand_text(site.source(), member))
        .collect();
    if !members.iter().any(|member| is_none(member)) {
        parts.push("None".to_string());
    }
    let edit = replace_with_pipe(site, index, node, &parts.join(" | "));
    Some(TypeRewrite::new(edit).cleaning(&cleanup))
}

/// `X | None` to `Optional[X]`, or `Optional[Union[...]]` for several members.
#[must_use]
pub fn pipe_to_optional(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let (_, node) = site.pipe_chain()?;
    let operands = flatten_pipe(node);
    if !operands.iter().any(|operand| is_none(operand)) {
        return None;
    }
    let rest: Vec<&str> = operands
        .into_iter()
        .filter(|operand| !is_none(operand))
        .map(|operand| site.text(operand))
        .collect();
    if rest.is_empty() || !resolver.can_introduce(TypingSymbol::Optional) {
        return None;
    }
    let (text, imports) = if let [single] = rest.as_slice() {
        (format!("Optional[{single}]"), vec![TypingSymbol::Optional])
    } else {
        if !resolver.can_introduce(TypingSymbol::Union) {
            return None;
        }
        (
            format!("Optional[Union[{}]]", rest.join(", ")),
            vec![TypingSymbol::Union, TypingSymbol::Optional],
        )
    };
    Some(TypeRewrite::new(site.replace(node, &text)).adding(&imports))
}

/// `Union[X, Y]` to `X | Y`.
#[must_use]
pub fn union_to_pipe(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let (index, node) = site.typing_subscript(resolver, TypingSymbol::Union)?;
    let members = TypeExpression::build(node, resolver).members();
    let text = members
        .iter()
        .map(|member| operand_text(site.source(), member))
        .collect::<Vec<_>>()
        .join(" | ");
    let edit = if members.len() > 1 {
        replace_with_pipe(site, index, node, &text)
    } else {
        site.replace(node, &text)
    };
    Some(TypeRewrite::new(edit).cleaning(&[TypingSymbol::Union]))
}

/// `X | Y` to `Union[X, Y]`, keeping `None` as an ordinary member.
#[must_use]
pub fn pipe_to_union(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let (_, node) = site.pipe_chain()?;
    let operands = flatten_pipe(node);
    if operands.len() < 2 || !resolver.can_introduce(TypingSymbol::Union) {
        return None;
    }
    let members: Vec<&str> = operands.into_iter().map(|operand| site.text(operand)).collect();
    let text = format!("Union[{}]", members.join(", "));
    Some(TypeRewrite::new(site.replace(node, &text)).adding(&[TypingSymbol::Union]))
}

/// Appends `| None` to the whole annotation around the cursor.
#[must_use]
pub fn make_maybe(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let (innermost, _) = site.path().innermost_expr()?;
    let root_index = site.type_root(innermost)?;
    let root = site.path().entries()[root_index].node.as_expr()?;
    if matches!(root, Expr::StringLiteral(_)) {
        return None;
    }
    if TypeExpression::build(root, resolver).contains_none() {
        return None;
    }
    let text = format!("{} | None", operand_text(site.source(), root));
    Some(TypeRewrite::new(replace_with_pipe(site, root_index, root, &text)))
}

/// Drops `None` from the type around the cursor: `Optional[X]` becomes `X`,
/// a pipe chain loses its `None` members.
#[must_use]
pub fn make_non_maybe(site: &TypeSite<'_>, resolver: &Resolver<'_>) -> Option<TypeRewrite> {
    let optional = site.typing_subscript(resolver, TypingSymbol::Optional);
    let chain = site
        .pipe_chain()
        .filter(|(_, node)| flatten_pipe(node).iter().any(|operand| is_none(operand)));

    let use_optional = match (optional, chain) {
        (Some((optional_index, _)), Some((chain_index, _))) => optional_index > chain_index,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => return None,
    };

    if use_optional {
        let (index, node) = optional?;
        let Expr::Subscript(subscript) = node else {
            return None;
        };
        let inner: &Expr = &subscript.slice;
        let text = site.text(inner);
        let edit = if is_pipe(inner) || is_looser_than_pipe(inner) {
            replace_with_pipe(site, index, node, text)
        } else {
            site.replace(node, text)
        };
        return Some(TypeRewrite::new(edit).cleaning(&[TypingSymbol::Optional]));
    }

    let (index, node) = chain?;
    let rest: Vec<String> = flatten_pipe(node)
        .into_iter()
        .filter(|operand| !is_none(operand))
        .map(|operand| operand_text(site.source(), operand))
        .collect();
    let edit = match rest.as_slice() {
        [] => return None,
        [single] => site.replace(node, single),
        _ => replace_with_pipe(site, index, node, &rest.join(" | ")),
    };
    Some(TypeRewrite::new(edit))
}
