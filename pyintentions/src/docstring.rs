//! Conversion between a block of `#` comments and a triple-quoted string.

use crate::cst::{comment_at, comment_run, extract_comments, CstParser};
use crate::edit::{Document, Edit};
use crate::syntax::PyFile;
use crate::utils::{indentation_of, is_blank};
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Splice turning the comment block under `offset` into a docstring.
///
/// Inline comments are never converted. The block is unavailable when no
/// quote style can hold its text or when the result would break a file that
/// parsed cleanly.
#[must_use]
pub fn comment_to_docstring(source: &str, offset: usize) -> Option<Edit> {
    let mut parser = CstParser::new().ok()?;
    let tree = parser.parse(source).ok()?;
    let comments = extract_comments(&tree);
    let index = comment_at(&comments, offset)?;
    if comments[index].is_inline {
        return None;
    }
    let run = &comments[comment_run(&comments, index, source)];
    let first = run.first()?;
    let last = run.last()?;
    let lines: Vec<&str> = run.iter().map(|comment| comment.content().trim_end()).collect();

    if lines.iter().any(|line| line.ends_with('\\')) {
        return None;
    }
    let single_line = lines.len() == 1;
    let quote = ["\"\"\"", "'''"].into_iter().find(|quote| {
        let quote_char = quote.chars().next().unwrap_or('"');
        !lines.iter().any(|line| line.contains(quote))
            && !(single_line && lines.iter().any(|line| line.ends_with(quote_char)))
    })?;

    let line_start = source[..first.start_byte].rfind('\n').map_or(0, |pos| pos + 1);
    let indent = &source[line_start..first.start_byte];
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let replacement = if single_line {
        format!("{quote}{}{quote}", lines[0])
    } else {
        let mut text = format!("{quote}{newline}");
        for line in &lines {
            if !line.is_empty() {
                text.push_str(indent);
                text.push_str(line);
            }
            text.push_str(newline);
        }
        text.push_str(indent);
        text.push_str(quote);
        text
    };

    let edit = Edit::with_description(
        first.start_byte,
        last.end_byte,
        replacement,
        "comment block to docstring",
    );
    if breaks_clean_parse(source, &edit) {
        return None;
    }
    tracing::debug!(lines = lines.len(), "converting comment block to docstring");
    Some(edit)
}

fn breaks_clean_parse(source: &str, edit: &Edit) -> bool {
    if PyFile::parse(source).has_syntax_errors() {
        return false;
    }
    let mut document = Document::new(source);
    document.push(edit.clone());
    document
        .into_text()
        .map_or(true, |text| PyFile::parse(text).has_syntax_errors())
}

/// The bare string statement under `offset`, when it sits alone on its lines.
#[must_use]
pub fn string_statement_at(file: &PyFile, offset: usize) -> Option<&Stmt> {
    let path = file.locate(offset);
    let stmt = path.innermost_stmt()?;
    let Stmt::Expr(expr_stmt) = stmt else {
        return None;
    };
    if !matches!(&*expr_stmt.value, Expr::StringLiteral(_)) {
        return None;
    }
    let (_, innermost) = path.innermost_expr()?;
    if !std::ptr::eq(innermost, &*expr_stmt.value) || !file.occupies_whole_lines(stmt) {
        return None;
    }
    Some(stmt)
}

/// Splice turning the docstring under `offset` into `#` comments.
#[must_use]
pub fn docstring_to_comment(file: &PyFile, offset: usize) -> Option<Edit> {
    let stmt = string_statement_at(file, offset)?;
    let Stmt::Expr(expr_stmt) = stmt else {
        return None;
    };
    let Expr::StringLiteral(literal) = &*expr_stmt.value else {
        return None;
    };
    let value = literal.value.to_str();
    let mut lines: Vec<&str> = value
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let common = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| indentation_of(line).len())
        .min()
        .unwrap_or(0);
    for line in lines.iter_mut().skip(1) {
        let current: &str = *line;
        *line = if is_blank(current) { "" } else { &current[common..] };
    }

    let start = stmt.start().to_usize();
    let indent = indentation_of(file.line_text(file.line_of(start)));
    let newline = if file.source().contains("\r\n") { "\r\n" } else { "\n" };
    let replacement = lines
        .iter()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "#".to_string()
            } else {
                format!("# {line}")
            }
        })
        .collect::<Vec<_>>()
        .join(&format!("{newline}{indent}"));

    tracing::debug!(lines = lines.len(), "converting docstring to comments");
    Some(Edit::with_description(
        start,
        stmt.end().to_usize(),
        replacement,
        "docstring to comment block",
    ))
}
