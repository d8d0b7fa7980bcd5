//! Import bookkeeping for `Optional` and `Union`.

use super::resolve::{Resolver, TypingSymbol};
use crate::collection::remove_items;
use crate::config::Settings;
use crate::constants::{ALL, TYPING_MODULE};
use crate::dunder::{find_dunder_assignment, find_pep8_insertion_index};
use crate::edit::Document;
use crate::reflow::{delete_lines, insert_before_statement, Spacing};
use crate::scope::{enclosing_block, module_statements};
use crate::syntax::{Fragment, PyFile};
use crate::utils::span;
use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{Expr, ExprContext, Stmt};
use ruff_text_size::Ranged;
use rustc_hash::FxHashSet;

/// Adds `from typing import <name>` for every symbol the module does not
/// import yet, as one block at the PEP 8 insertion index.
///
/// `first_use` is an offset where a new symbol is used. The block never lands
/// after the top-level statement holding it.
#[must_use]
pub fn ensure_imported(
    text: &str,
    symbols: &[TypingSymbol],
    settings: &Settings,
    first_use: Option<usize>,
) -> String {
    let file = PyFile::parse(text);
    let resolver = Resolver::module_level(&file, settings);
    let module = settings
        .typing_modules
        .first()
        .map_or(TYPING_MODULE, String::as_str);
    let block: Vec<String> = symbols
        .iter()
        .filter(|symbol| !resolver.module_imports(**symbol))
        .map(|symbol| format!("from {module} import {}", symbol.name()))
        .collect();
    if block.is_empty() {
        return text.to_string();
    }
    tracing::debug!(imports = ?block, "adding typing imports");
    let mut index = find_pep8_insertion_index(file.body());
    if let Some(user) = first_use.and_then(|offset| top_level_statement_at(&file, offset)) {
        index = index.min(user);
    }
    insert_before_statement(text, index, &block.join("\n"), Spacing::Import)
}

fn top_level_statement_at(file: &PyFile, offset: usize) -> Option<usize> {
    file.body().iter().position(|stmt| {
        let (start, end) = span(stmt);
        start <= offset && offset < end
    })
}

/// Removes imports of `symbols` nothing refers to any more.
#[must_use]
pub fn remove_unused(text: &str, symbols: &[TypingSymbol], settings: &Settings) -> String {
    let mut text = text.to_string();
    if symbols.is_empty() {
        return text;
    }
    loop {
        let file = PyFile::parse(text.as_str());
        match remove_one_unused(&file, symbols, settings) {
            Some(next) if next != text => text = next,
            _ => return text,
        }
    }
}

/// Removes the unused symbols from the first typing import that has any.
fn remove_one_unused(file: &PyFile, symbols: &[TypingSymbol], settings: &Settings) -> Option<String> {
    let used = used_names(file);
    for stmt in module_statements(file.body()) {
        let Stmt::ImportFrom(import) = stmt else {
            continue;
        };
        let from_typing = import.level == 0
            && import
                .module
                .as_ref()
                .is_some_and(|module| settings.is_typing_module(module.as_str()));
        if !from_typing {
            continue;
        }
        let remove: Vec<bool> = import
            .names
            .iter()
            .map(|alias| {
                let bound = alias.asname.as_ref().unwrap_or(&alias.name).as_str();
                TypingSymbol::from_name(alias.name.as_str())
                    .is_some_and(|symbol| symbols.contains(&symbol))
                    && !used.contains(bound)
            })
            .collect();
        if !remove.iter().any(|flag| *flag) {
            continue;
        }

        if remove.iter().all(|flag| *flag) {
            let nested_alone = enclosing_block(file.body(), stmt)
                .is_some_and(|block| block.len() == 1 && !std::ptr::eq(block, file.body()));
            if nested_alone || !file.occupies_whole_lines(stmt) {
                continue;
            }
            tracing::debug!(line = file.line_of(stmt.start().to_usize()), "removing unused import");
            return Some(delete_lines(
                file.source(),
                file.line_of(stmt.start().to_usize()),
                file.line_of(stmt.end().to_usize()),
            ));
        }

        let items: Vec<(usize, usize)> = import.names.iter().map(span).collect();
        let mut document = Document::new(file.source());
        for edit in remove_items(&items, &remove, false) {
            document.push(edit);
        }
        return document.into_text().ok();
    }
    None
}

/// Every name the file reads: plain loads, names inside string annotations
/// and the entries of `__all__`.
#[must_use]
pub fn used_names(file: &PyFile) -> FxHashSet<String> {
    let mut collector = NameCollector::default();
    collector.visit_body(file.body());
    if let Some(all) = find_dunder_assignment(file, ALL) {
        collector
            .names
            .extend(all.string_elements().map(str::to_string));
    }
    collector.names
}

#[derive(Default)]
struct NameCollector {
    names: FxHashSet<String>,
    annotation_depth: usize,
}

impl<'a> Visitor<'a> for NameCollector {
    fn visit_annotation(&mut self, expr: &'a Expr) {
        self.annotation_depth += 1;
        self.visit_expr(expr);
        self.annotation_depth -= 1;
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Name(name) if name.ctx == ExprContext::Load => {
                self.names.insert(name.id.to_string());
            }
            Expr::StringLiteral(literal) if self.annotation_depth > 0 => {
                if let Some(fragment) = Fragment::parse(literal.value.to_str()) {
                    let mut inner = NameCollector {
                        annotation_depth: 1,
                        ..NameCollector::default()
                    };
                    inner.visit_expr(fragment.expr());
                    self.names.extend(inner.names);
                }
            }
            _ => visitor::walk_expr(self, expr),
        }
    }
}
