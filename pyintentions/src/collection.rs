//! Text-preserving edits to list and tuple literals.
//!
//! Only the separators next to the touched element change. Surviving
//! elements keep their exact source text and the literal keeps its brackets.

use crate::config::Settings;
use crate::dunder::{ModuleDunder, ValueKind};
use crate::edit::{Edit, EditBuilder};
use crate::syntax::{PyFile, StringParts};
use crate::utils::{indentation_of, span};
use ruff_python_ast::Expr;

/// What is left to do after removing elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Splices that rewrite the literal in place.
    Edits(Vec<Edit>),
    /// Every element went away and the caller asked for the statement to go too.
    DeleteStatement,
}

/// How to treat a literal that would end up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Leave `[]` or `()` behind.
    KeepEmpty,
    /// Drop the whole assignment.
    DeleteStatement,
}

/// Quotes a new string element the way the literal's last string element is quoted.
#[must_use]
pub fn quote_element(file: &PyFile, elements: &[Expr], value: &str, settings: &Settings) -> String {
    let quote = elements
        .iter()
        .rev()
        .find_map(|element| match element {
            Expr::StringLiteral(_) => StringParts::parse(file.text(element)),
            _ => None,
        })
        .map_or_else(|| settings.quote_style.as_char(), |parts| parts.quote_char());
    format!("{quote}{value}{quote}")
}

/// Position of the first comma after `from`, skipping whitespace and comments,
/// provided nothing else comes first.
fn trailing_comma(source: &str, from: usize, limit: usize) -> Option<usize> {
    let mut in_comment = false;
    for (index, ch) in source.get(from..limit)?.char_indices() {
        match ch {
            '\n' => in_comment = false,
            _ if in_comment => {}
            '#' => in_comment = true,
            ',' => return Some(from + index),
            c if c.is_whitespace() || c == '\\' => {}
            _ => return None,
        }
    }
    None
}

/// End of the region a trailing comma may occupy: the closing bracket, or the
/// end of the line for a bare tuple.
fn content_limit(file: &PyFile, value: &Expr, kind: ValueKind) -> usize {
    let (_, end) = span(value);
    if matches!(kind, ValueKind::Tuple) {
        let line = file.line_of(end);
        file.line_index()
            .line_end(line, file.source())
            .unwrap_or(end)
            .max(end)
    } else {
        end.saturating_sub(1)
    }
}

/// Whether a bracketed literal ends with its closing bracket. A recovered
/// parse of an unclosed `[` or `(` ends at the last element instead.
fn is_closed(file: &PyFile, value: &Expr, kind: ValueKind) -> bool {
    let text = file.text(value);
    match kind {
        ValueKind::List => text.ends_with(']'),
        ValueKind::ParenthesizedTuple => text.ends_with(')'),
        ValueKind::Tuple => true,
    }
}

/// Splices that append `element` (already quoted) to the dunder's literal.
///
/// Returns `None` for a literal whose closing bracket is missing.
#[must_use]
pub fn add_element(file: &PyFile, dunder: &ModuleDunder<'_>, element: &str) -> Option<Vec<Edit>> {
    let value = dunder.value?;
    let kind = dunder.value_kind?;
    if !is_closed(file, value, kind) {
        return None;
    }
    let (value_start, value_end) = span(value);

    let Some(last) = dunder.elements.last() else {
        let (open, close) = match kind {
            ValueKind::List => ("[", "]"),
            ValueKind::Tuple | ValueKind::ParenthesizedTuple => ("(", ",)"),
        };
        return Some(vec![Edit::with_description(
            value_start,
            value_end,
            format!("{open}{element}{close}"),
            "fill empty literal",
        )]);
    };

    let (_, last_end) = span(last);
    let limit = content_limit(file, value, kind);
    let multi_line = file.slice(value_start, value_end).contains('\n');

    let edit = match trailing_comma(file.source(), last_end, limit) {
        Some(comma) if multi_line => {
            let line = file.line_of(last_end);
            let indent = indentation_of(file.line_text(line));
            Edit::with_description(
                comma + 1,
                comma + 1,
                format!("\n{indent}{element},"),
                "append element on its own line",
            )
        }
        Some(comma) if matches!(kind, ValueKind::Tuple) => Edit::with_description(
            last_end,
            comma + 1,
            format!(", {element}"),
            "append element",
        ),
        Some(_) => Edit::with_description(last_end, limit, format!(", {element}"), "append element"),
        None => Edit::with_description(last_end, last_end, format!(", {element}"), "append element"),
    };
    Some(vec![edit])
}

/// Splices that delete the flagged items from a comma-separated sequence.
///
/// `items` are the byte spans of the items in order, `remove` flags the ones
/// to drop, and at least one item must survive. `needs_comma` adds a comma
/// after a sole survivor, for tuples without a trailing comma.
#[must_use]
pub fn remove_items(items: &[(usize, usize)], remove: &[bool], needs_comma: bool) -> Vec<Edit> {
    let Some(last_kept) = remove.iter().rposition(|flag| !flag) else {
        return Vec::new();
    };
    let mut builder = EditBuilder::new();
    for index in 0..last_kept {
        if remove[index] {
            builder = builder.delete(items[index].0, items[index + 1].0);
        }
    }
    let kept_end = items[last_kept].1;
    let sole_survivor = remove.iter().filter(|flag| !**flag).count() == 1;
    let comma = if needs_comma && sole_survivor { "," } else { "" };
    if let Some(&(_, last_end)) = items.last().filter(|_| last_kept + 1 < items.len()) {
        builder = builder.replace(kept_end, last_end, comma);
    } else if !comma.is_empty() {
        builder = builder.insert(kept_end, comma);
    }
    builder.build()
}

/// Removes every element matching `predicate` from the dunder's literal.
///
/// Returns `None` when nothing matches or the literal is unclosed.
#[must_use]
pub fn remove_element(
    file: &PyFile,
    dunder: &ModuleDunder<'_>,
    predicate: impl Fn(&Expr) -> bool,
    empty: EmptyPolicy,
) -> Option<Removal> {
    let value = dunder.value?;
    let kind = dunder.value_kind?;
    if !is_closed(file, value, kind) {
        return None;
    }
    let remove: Vec<bool> = dunder.elements.iter().map(&predicate).collect();
    if !remove.iter().any(|flag| *flag) {
        return None;
    }

    if remove.iter().all(|flag| *flag) {
        return Some(match empty {
            EmptyPolicy::DeleteStatement => Removal::DeleteStatement,
            EmptyPolicy::KeepEmpty => {
                let (start, end) = span(value);
                let literal = if matches!(kind, ValueKind::List) { "[]" } else { "()" };
                Removal::Edits(vec![Edit::with_description(start, end, literal, "empty literal")])
            }
        });
    }

    let items: Vec<(usize, usize)> = dunder.elements.iter().map(span).collect();
    let needs_comma = kind.is_tuple()
        && dunder.elements.last().is_some_and(|last| {
            trailing_comma(file.source(), span(last).1, content_limit(file, value, kind)).is_none()
        });
    Some(Removal::Edits(remove_items(&items, &remove, needs_comma)))
}
