//! The type-expression algebra: `Optional[X]`, `Union[...]` and pipe chains.

use super::resolve::{Resolver, TypingSymbol};
use ruff_python_ast::{Expr, ExprContext, Operator};

/// A type expression, recognized by shape and resolved against typing.
#[derive(Debug, Clone)]
pub enum TypeExpression<'a> {
    /// Anything that is not one of the forms below.
    Named(&'a Expr),
    Optional {
        node: &'a Expr,
        inner: Box<TypeExpression<'a>>,
    },
    Union {
        node: &'a Expr,
        members: Vec<TypeExpression<'a>>,
    },
    /// `A | B | ...`, flattened left to right.
    Pipe {
        node: &'a Expr,
        operands: Vec<TypeExpression<'a>>,
    },
}

impl<'a> TypeExpression<'a> {
    #[must_use]
    pub fn build(expr: &'a Expr, resolver: &Resolver<'_>) -> Self {
        match expr {
            Expr::Subscript(subscript) => match resolver.symbol_of(&subscript.value) {
                Some(TypingSymbol::Optional) => TypeExpression::Optional {
                    node: expr,
                    inner: Box::new(Self::build(&subscript.slice, resolver)),
                },
                Some(TypingSymbol::Union) => TypeExpression::Union {
                    node: expr,
                    members: union_members(&subscript.slice)
                        .into_iter()
                        .map(|member| Self::build(member, resolver))
                        .collect(),
                },
                None => TypeExpression::Named(expr),
            },
            Expr::BinOp(binop) if binop.op == Operator::BitOr => TypeExpression::Pipe {
                node: expr,
                operands: flatten_pipe(expr)
                    .into_iter()
                    .map(|operand| Self::build(operand, resolver))
                    .collect(),
            },
            _ => TypeExpression::Named(expr),
        }
    }

    #[must_use]
    pub fn node(&self) -> &'a Expr {
        match self {
            TypeExpression::Named(node)
            | TypeExpression::Optional { node, .. }
            | TypeExpression::Union { node, .. }
            | TypeExpression::Pipe { node, .. } => node,
        }
    }

    /// Whether `None` is a member of the type, in any recognized spelling.
    #[must_use]
    pub fn contains_none(&self) -> bool {
        match self {
            TypeExpression::Named(node) => is_none(node),
            TypeExpression::Optional { .. } => true,
            TypeExpression::Union { members, .. } => members.iter().any(Self::contains_none),
            TypeExpression::Pipe { operands, .. } => operands.iter().any(Self::contains_none),
        }
    }

    /// Members of a union spelled either way, the expression itself otherwise.
    #[must_use]
    pub fn members(&self) -> Vec<&'a Expr> {
        match self {
            TypeExpression::Union { members, .. } => members.iter().map(Self::node).collect(),
            TypeExpression::Pipe { operands, .. } => operands.iter().map(Self::node).collect(),
            TypeExpression::Named(_) | TypeExpression::Optional { .. } => vec![self.node()],
        }
    }
}

/// A `None` literal or a bare reference named `None`.
#[must_use]
pub fn is_none(expr: &Expr) -> bool {
    match expr {
        Expr::NoneLiteral(_) => true,
        Expr::Name(name) => name.id.as_str() == "None",
        _ => false,
    }
}

/// An operand the parser invented while recovering from a half-typed expression.
#[must_use]
pub fn is_missing(expr: &Expr) -> bool {
    matches!(expr, Expr::Name(name) if name.id.as_str().is_empty() || name.ctx == ExprContext::Invalid)
}

/// Whether `expr` is a `|` operation.
#[must_use]
pub fn is_pipe(expr: &Expr) -> bool {
    matches!(expr, Expr::BinOp(binop) if binop.op == Operator::BitOr)
}

/// Operands of a pipe chain, left to right. A missing right operand is
/// dropped so a half-typed chain reads as its left branch.
#[must_use]
pub fn flatten_pipe(expr: &Expr) -> Vec<&Expr> {
    let mut operands = Vec::new();
    flatten_into(expr, &mut operands);
    operands
}

fn flatten_into<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::BinOp(binop) if binop.op == Operator::BitOr => {
            flatten_into(&binop.left, out);
            if !is_missing(&binop.right) {
                flatten_into(&binop.right, out);
            }
        }
        _ => out.push(expr),
    }
}

/// Members of a `Union[...]` subscript: the tuple elements, or the lone index.
#[must_use]
pub fn union_members(slice: &Expr) -> Vec<&Expr> {
    match slice {
        Expr::Tuple(tuple) => tuple.elts.iter().collect(),
        _ => vec![slice],
    }
}

/// Binds looser than `|`, so it needs parentheses as a pipe operand.
#[must_use]
pub fn is_looser_than_pipe(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::If(_)
            | Expr::Lambda(_)
            | Expr::BoolOp(_)
            | Expr::Compare(_)
            | Expr::UnaryOp(_)
            | Expr::Named(_)
            | Expr::Yield(_)
            | Expr::YieldFrom(_)
            | Expr::Starred(_)
    )
}

/// Source text of `expr` ready to sit in a pipe chain.
#[must_use]
pub fn operand_text(source: &str, expr: &Expr) -> String {
    let (start, end) = crate::utils::span(expr);
    let text = &source[start..end];
    if is_looser_than_pipe(expr) {
        format!("({text})")
    } else {
        text.to_string()
    }
}

/// Whether a pipe expression replacing `child` under `parent` needs
/// parentheses to keep its meaning.
#[must_use]
pub fn pipe_needs_parens(parent: &Expr, child: &Expr) -> bool {
    match parent {
        Expr::Attribute(attribute) => std::ptr::eq(&*attribute.value, child),
        Expr::Call(call) => std::ptr::eq(&*call.func, child),
        Expr::Subscript(subscript) => std::ptr::eq(&*subscript.value, child),
        Expr::BinOp(binop) => binop.op != Operator::BitOr,
        Expr::UnaryOp(_) | Expr::Await(_) => true,
        _ => false,
    }
}
