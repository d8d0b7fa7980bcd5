//! Whole-line statement removal and insertion with blank-line bookkeeping.
//!
//! Every function takes whole-file text and returns whole-file text. Structure
//! is recomputed by parsing the text it is given, never carried over from a
//! previous parse.
//!
//! Blank lines around an inserted statement:
//!
//! | neighbour | dunder | import |
//! |---|---|---|
//! | nothing above | 0 | 0 |
//! | `__future__` import or dunder above | 0 | 1 after a dunder, 0 after `__future__` |
//! | anything else above | existing, at most 1 | existing, at most 1 |
//! | end of file below | 0 | 0 |
//! | dunder below | 0 | 1 |
//! | import below | 1 | 0 |
//! | anything else below | 1 | 1 |
//!
//! Deleting a statement collapses the blank lines that meet at the gap to at
//! most one, and to none at the start or end of the file.

use crate::constants::get_coding_line_re;
use crate::dunder::{dunder_name, find_pep8_insertion_index, is_future_import, is_regular_import};
use crate::syntax::PyFile;
use crate::utils::is_blank;
use ruff_python_ast::Stmt;
use ruff_text_size::Ranged;

/// What kind of statement is being inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Dunder,
    Import,
}

/// Text split into lines without terminators.
#[derive(Debug, Clone)]
struct Lines {
    lines: Vec<String>,
    newline: &'static str,
    trailing_newline: bool,
}

impl Lines {
    fn parse(text: &str) -> Self {
        let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect()
        };
        Self {
            lines,
            newline,
            trailing_newline,
        }
    }

    fn join(&self) -> String {
        let mut text = self.lines.join(self.newline);
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.newline);
        }
        text
    }

    fn is_blank(&self, line: usize) -> bool {
        is_blank(&self.lines[line])
    }

    /// First line of the blank run ending just before `line`.
    fn blank_run_above(&self, line: usize) -> usize {
        let mut start = line;
        while start > 0 && self.is_blank(start - 1) {
            start -= 1;
        }
        start
    }

    /// Line after the blank run starting at `line`.
    fn blank_run_below(&self, line: usize) -> usize {
        let mut end = line;
        while end < self.lines.len() && self.is_blank(end) {
            end += 1;
        }
        end
    }

    fn is_file_header_comment(&self, line: usize) -> bool {
        let text = &self.lines[line];
        (line == 0 && text.starts_with("#!")) || (line < 2 && get_coding_line_re().is_match(text))
    }

    fn splice(&mut self, start: usize, end: usize, replacement: Vec<String>) {
        self.lines.splice(start..end, replacement);
    }
}

/// Removes lines `first..=last` and collapses the blank lines meeting at the gap.
#[must_use]
pub fn delete_lines(text: &str, first: usize, last: usize) -> String {
    let mut lines = Lines::parse(text);
    let last = last.min(lines.lines.len().saturating_sub(1));
    if first > last {
        return text.to_string();
    }
    lines.splice(first, last + 1, Vec::new());

    let above = lines.blank_run_above(first);
    let below = lines.blank_run_below(first);
    let keep = if above == 0 || below == lines.lines.len() {
        0
    } else {
        (below - above).min(1)
    };
    lines.splice(above, below, vec![String::new(); keep]);
    tracing::trace!(first, last, keep, "deleted statement lines");
    lines.join()
}

/// Line where a statement inserted before top-level statement `index` goes.
fn insertion_line(file: &PyFile, lines: &Lines, index: usize) -> usize {
    let body = file.body();
    if index >= body.len() {
        return lines.lines.len();
    }
    if index == 0 {
        let mut line = file.line_of(body[0].start().to_usize());
        while line > 0
            && lines.lines[line - 1].trim_start().starts_with('#')
            && !lines.is_file_header_comment(line - 1)
        {
            line -= 1;
        }
        return line;
    }
    let previous_end = file.line_of(body[index - 1].end().to_usize());
    let anchor = file.line_of(body[index].start().to_usize());
    lines.blank_run_below(previous_end + 1).min(anchor)
}

fn blank_lines_above(spacing: Spacing, previous: Option<&Stmt>, existing: usize) -> usize {
    let existing = existing.min(1);
    let Some(previous) = previous else {
        return existing;
    };
    let previous_is_dunder = dunder_name(previous).is_some();
    match spacing {
        Spacing::Dunder if previous_is_dunder || is_future_import(previous) => 0,
        Spacing::Import if previous_is_dunder => 1,
        Spacing::Import if is_future_import(previous) => 0,
        _ => existing,
    }
}

fn blank_lines_below(spacing: Spacing, next: Option<&Stmt>) -> usize {
    let Some(next) = next else {
        return 1;
    };
    match spacing {
        Spacing::Dunder if dunder_name(next).is_some() => 0,
        Spacing::Import if is_regular_import(next) || is_future_import(next) => 0,
        _ => 1,
    }
}

/// Inserts `block` (one or more lines of statement text) before top-level
/// statement `index`, or appends it when `index` is past the last statement.
#[must_use]
pub fn insert_before_statement(text: &str, index: usize, block: &str, spacing: Spacing) -> String {
    let file = PyFile::parse(text);
    let mut lines = Lines::parse(text);
    if lines.lines.is_empty() {
        lines.trailing_newline = true;
    }
    let line = insertion_line(&file, &lines, index);
    let above_start = lines.blank_run_above(line);
    let below_end = lines.blank_run_below(line);

    let above = if above_start == 0 {
        0
    } else {
        let previous = index.checked_sub(1).and_then(|i| file.body().get(i));
        blank_lines_above(spacing, previous, line - above_start)
    };
    let below = if below_end == lines.lines.len() {
        0
    } else {
        blank_lines_below(spacing, file.body().get(index))
    };

    let mut replacement = vec![String::new(); above];
    replacement.extend(
        block
            .split('\n')
            .map(|part| part.strip_suffix('\r').unwrap_or(part).to_string()),
    );
    replacement.extend(vec![String::new(); below]);
    tracing::trace!(index, line, above, below, ?spacing, "inserted statement");
    lines.splice(above_start, below_end, replacement);
    lines.join()
}

/// Moves lines `first..=last`, holding one top-level dunder assignment, to
/// the PEP 8 position of the file they leave behind. Comment lines directly
/// above the statement travel with it.
#[must_use]
pub fn move_to_pep8_position(text: &str, first: usize, last: usize) -> String {
    let lines = Lines::parse(text);
    let first = attached_comment_start(text, &lines, first);
    let Some(block) = lines.lines.get(first..=last) else {
        return text.to_string();
    };
    let block = block.join("\n");
    let remaining = delete_lines(text, first, last);
    let index = find_pep8_insertion_index(PyFile::parse(remaining.as_str()).body());
    insert_before_statement(&remaining, index, &block, Spacing::Dunder)
}

/// First line of the comment run sitting directly on top of line `first`,
/// never reaching into the previous statement.
fn attached_comment_start(text: &str, lines: &Lines, first: usize) -> usize {
    let file = PyFile::parse(text);
    let floor = file
        .body()
        .iter()
        .map(|stmt| file.line_of(stmt.end().to_usize()))
        .filter(|line| *line < first)
        .max()
        .map_or(0, |line| line + 1);
    let mut start = first;
    while start > floor
        && lines.lines[start - 1].trim_start().starts_with('#')
        && !lines.is_file_header_comment(start - 1)
    {
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_collapses_to_one_blank() {
        let text = "import os\n\n__all__ = [\"foo\"]\n\ndef foo():\n    pass\n";
        assert_eq!(delete_lines(text, 2, 2), "import os\n\ndef foo():\n    pass\n");
    }

    #[test]
    fn test_delete_at_top_leaves_no_blank() {
        let text = "__all__ = [\"foo\"]\n\ndef foo(): pass\n";
        assert_eq!(delete_lines(text, 0, 0), "def foo(): pass\n");
    }

    #[test]
    fn test_delete_at_end_leaves_no_blank() {
        let text = "x = 1\n\n__all__ = []";
        assert_eq!(delete_lines(text, 2, 2), "x = 1");
    }

    #[test]
    fn test_delete_collapses_three_blank_lines() {
        let text = "a = 1\n\n\nb = 2\n\n\nc = 3\n";
        assert_eq!(delete_lines(text, 3, 3), "a = 1\n\nc = 3\n");
    }

    #[test]
    fn test_delete_keeps_crlf() {
        let text = "a = 1\r\nb = 2\r\nc = 3\r\n";
        assert_eq!(delete_lines(text, 1, 1), "a = 1\r\nc = 3\r\n");
    }

    #[test]
    fn test_move_groups_with_dunders() {
        let text = "__all__ = [\"foo\"]\n\nimport os\n\n__version__ = \"1.0.0\"\n\ndef foo():\n    pass\n";
        assert_eq!(
            move_to_pep8_position(text, 4, 4),
            "__all__ = [\"foo\"]\n__version__ = \"1.0.0\"\n\nimport os\n\ndef foo():\n    pass\n"
        );
    }

    #[test]
    fn test_move_after_future_import() {
        let text = "'''Doc.'''\n\nfrom __future__ import annotations\n\nimport os\n\n__version__ = \"1\"\n";
        assert_eq!(
            move_to_pep8_position(text, 6, 6),
            "'''Doc.'''\n\nfrom __future__ import annotations\n__version__ = \"1\"\n\nimport os\n"
        );
    }

    #[test]
    fn test_move_to_top_stays_below_shebang() {
        let text = "#!/usr/bin/env python\nimport os\n__version__ = \"1\"\n";
        assert_eq!(
            move_to_pep8_position(text, 2, 2),
            "#!/usr/bin/env python\n__version__ = \"1\"\n\nimport os\n"
        );
    }

    #[test]
    fn test_move_carries_leading_comment() {
        let text = "import os\n\n# Package version.\n__version__ = \"1\"\n";
        assert_eq!(
            move_to_pep8_position(text, 3, 3),
            "# Package version.\n__version__ = \"1\"\n\nimport os\n"
        );
    }

    #[test]
    fn test_move_leaves_separated_comment() {
        let text = "import os\n# About os.\n\n__version__ = \"1\"\n";
        assert_eq!(
            move_to_pep8_position(text, 3, 3),
            "__version__ = \"1\"\n\nimport os\n# About os.\n"
        );
    }

    #[test]
    fn test_move_multi_line_statement() {
        let text = "import os\n\n__all__ = [\n    \"a\",\n]\n";
        assert_eq!(
            move_to_pep8_position(text, 2, 4),
            "__all__ = [\n    \"a\",\n]\n\nimport os\n"
        );
    }

    #[test]
    fn test_insert_import_after_dunder() {
        let text = "\"\"\"Doc.\"\"\"\n__all__ = []\nx: int | None = None\n";
        assert_eq!(
            insert_before_statement(text, 2, "from typing import Optional", Spacing::Import),
            "\"\"\"Doc.\"\"\"\n__all__ = []\n\nfrom typing import Optional\n\nx: int | None = None\n"
        );
    }

    #[test]
    fn test_insert_import_before_imports() {
        let text = "import os\n\nx = 1\n";
        assert_eq!(
            insert_before_statement(text, 0, "from typing import Union", Spacing::Import),
            "from typing import Union\nimport os\n\nx = 1\n"
        );
    }

    #[test]
    fn test_insert_into_empty_text() {
        assert_eq!(
            insert_before_statement("", 0, "__all__ = [\"a\"]", Spacing::Dunder),
            "__all__ = [\"a\"]\n"
        );
    }
}
