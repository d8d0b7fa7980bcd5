//! Core library for the `pyintentions` rewriting engine.
//!
//! This library offers cursor-driven, formatting-preserving rewrites of Python
//! source: `__all__` upkeep, dunder placement, `Optional`/`Union`/pipe
//! spellings and comment/docstring conversion.

// Pedantic lints that fight the splice-building code
#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for text-preserving edits to list and tuple literals.
pub mod collection;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module wrapping tree-sitter for comment nodes with exact byte ranges.
pub mod cst;

/// Module converting between comment blocks and docstrings.
pub mod docstring;

/// Module locating module-level dunder assignments and their PEP 8 position.
pub mod dunder;

/// Module for byte-range splices on whole-file text.
pub mod edit;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Module defining the errors of the intention layer.
pub mod error;

/// Module containing the intention catalogue.
pub mod intentions;

/// Module installing the tracing subscriber for the CLI.
pub mod logging;

/// Module for rich CLI output formatting with colored text and tables.
pub mod output;

/// Module for line-level statement removal and insertion.
pub mod reflow;

/// Module deciding which statements and names are at module scope.
pub mod scope;

/// Module wrapping the ruff parser: parsed files, fragments and cursor paths.
pub mod syntax;

/// Module for `Optional`/`Union`/pipe analysis and rewrites.
pub mod typing;

/// Module containing utility functions.
pub mod utils;
