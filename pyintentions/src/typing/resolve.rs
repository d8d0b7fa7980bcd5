//! Name resolution for `Optional` and `Union`.
//!
//! Bindings are collected syntactically from the module and from every
//! function or class body enclosing the cursor. A name bound by an import
//! from a typing module resolves to the typing symbol; any other binding
//! shadows it.

use crate::config::Settings;
use crate::constants::{OPTIONAL, UNION};
use crate::scope::{module_statements, target_names};
use crate::syntax::PyFile;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;
use rustc_hash::FxHashMap;

/// A typing symbol the engine rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypingSymbol {
    Optional,
    Union,
}

impl TypingSymbol {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TypingSymbol::Optional => OPTIONAL,
            TypingSymbol::Union => UNION,
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            OPTIONAL => Some(TypingSymbol::Optional),
            UNION => Some(TypingSymbol::Union),
            _ => None,
        }
    }
}

/// What a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Symbol(TypingSymbol),
    /// `import typing` or `import typing as t`
    TypingModule,
    Other,
}

/// Bindings of one scope.
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    names: FxHashMap<String, Binding>,
    /// `from typing import *` was seen.
    star_typing: bool,
}

impl Bindings {
    fn bind(&mut self, name: &str, binding: Binding) {
        self.names
            .entry(name.to_string())
            .and_modify(|existing| {
                if *existing != binding {
                    *existing = Binding::Other;
                }
            })
            .or_insert(binding);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.names.get(name).copied()
    }

    /// Collects the bindings made by `statements`, descending into
    /// control-flow blocks but not into nested scopes.
    fn collect(statements: &[Stmt], settings: &Settings) -> Self {
        let mut bindings = Self::default();
        for stmt in module_statements(statements) {
            bindings.bind_stmt(stmt, settings);
        }
        bindings
    }

    fn bind_targets(&mut self, target: &Expr) {
        let mut names = Vec::new();
        target_names(target, &mut names);
        for name in names {
            self.bind(name.id.as_str(), Binding::Other);
        }
    }

    fn bind_stmt(&mut self, stmt: &Stmt, settings: &Settings) {
        match stmt {
            Stmt::ImportFrom(node) => {
                let from_typing = node.level == 0
                    && node
                        .module
                        .as_ref()
                        .is_some_and(|module| settings.is_typing_module(module.as_str()));
                for alias in &node.names {
                    let imported = alias.name.as_str();
                    if imported == "*" {
                        self.star_typing |= from_typing;
                        continue;
                    }
                    let bound = alias.asname.as_ref().map_or(imported, |name| name.as_str());
                    let binding = match TypingSymbol::from_name(imported) {
                        Some(symbol) if from_typing => Binding::Symbol(symbol),
                        _ => Binding::Other,
                    };
                    self.bind(bound, binding);
                }
            }
            Stmt::Import(node) => {
                for alias in &node.names {
                    let module = alias.name.as_str();
                    match &alias.asname {
                        Some(asname) => {
                            let binding = if settings.is_typing_module(module) {
                                Binding::TypingModule
                            } else {
                                Binding::Other
                            };
                            self.bind(asname.as_str(), binding);
                        }
                        None => {
                            let head = module.split('.').next().unwrap_or(module);
                            let binding = if settings.is_typing_module(head) {
                                Binding::TypingModule
                            } else {
                                Binding::Other
                            };
                            self.bind(head, binding);
                        }
                    }
                }
            }
            Stmt::FunctionDef(node) => self.bind(node.name.as_str(), Binding::Other),
            Stmt::ClassDef(node) => self.bind(node.name.as_str(), Binding::Other),
            Stmt::Assign(node) => node.targets.iter().for_each(|target| self.bind_targets(target)),
            Stmt::AnnAssign(node) => self.bind_targets(&node.target),
            Stmt::AugAssign(node) => self.bind_targets(&node.target),
            Stmt::TypeAlias(node) => self.bind_targets(&node.name),
            Stmt::For(node) => self.bind_targets(&node.target),
            Stmt::With(node) => {
                for item in &node.items {
                    if let Some(vars) = &item.optional_vars {
                        self.bind_targets(vars);
                    }
                }
            }
            Stmt::Try(node) => {
                for handler in &node.handlers {
                    let ruff_python_ast::ExceptHandler::ExceptHandler(handler) = handler;
                    if let Some(name) = &handler.name {
                        self.bind(name.as_str(), Binding::Other);
                    }
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug)]
struct Scope {
    bindings: Bindings,
    is_class: bool,
}

/// Resolves names as seen from one position in a file.
#[derive(Debug)]
pub struct Resolver<'s> {
    settings: &'s Settings,
    module: Bindings,
    /// Enclosing function and class scopes, outermost first.
    scopes: Vec<Scope>,
}

impl<'s> Resolver<'s> {
    /// Builds the scopes visible at `offset`.
    #[must_use]
    pub fn new(file: &PyFile, offset: usize, settings: &'s Settings) -> Self {
        let module = Bindings::collect(file.body(), settings);
        let path = file.locate(offset);
        let mut scopes = Vec::new();
        for stmt in path.stmts() {
            let (body, is_class) = match stmt {
                Stmt::FunctionDef(node) => (node.body.as_slice(), false),
                Stmt::ClassDef(node) => (node.body.as_slice(), true),
                _ => continue,
            };
            let in_body = match (body.first(), body.last()) {
                (Some(first), Some(last)) => {
                    first.start().to_usize() <= offset && offset <= last.end().to_usize()
                }
                _ => false,
            };
            if !in_body {
                break;
            }
            let mut bindings = Bindings::collect(body, settings);
            if let Stmt::FunctionDef(node) = stmt {
                for parameter in node.parameters.iter() {
                    bindings.bind(parameter.name().as_str(), Binding::Other);
                }
            }
            scopes.push(Scope { bindings, is_class });
        }
        Self {
            settings,
            module,
            scopes,
        }
    }

    /// Module-level view, ignoring any enclosing function or class.
    #[must_use]
    pub fn module_level(file: &PyFile, settings: &'s Settings) -> Self {
        Self {
            settings,
            module: Bindings::collect(file.body(), settings),
            scopes: Vec::new(),
        }
    }

    /// Binding of `name`, `None` when unbound.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        let innermost = self.scopes.len().checked_sub(1);
        for (depth, scope) in self.scopes.iter().enumerate().rev() {
            // Class bodies are only visible from the class body itself.
            if scope.is_class && Some(depth) != innermost {
                continue;
            }
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding);
            }
        }
        self.module.get(name)
    }

    fn unbound_symbol(&self, name: &str) -> Option<TypingSymbol> {
        if self.settings.assume_unbound_typing || self.module.star_typing {
            TypingSymbol::from_name(name)
        } else {
            None
        }
    }

    /// The typing symbol `expr` refers to, if any.
    #[must_use]
    pub fn symbol_of(&self, expr: &Expr) -> Option<TypingSymbol> {
        match expr {
            Expr::Name(name) => match self.lookup(name.id.as_str()) {
                Some(Binding::Symbol(symbol)) => Some(symbol),
                Some(_) => None,
                None => self.unbound_symbol(name.id.as_str()),
            },
            Expr::Attribute(attribute) => {
                let Expr::Name(module) = &*attribute.value else {
                    return None;
                };
                match self.lookup(module.id.as_str()) {
                    Some(Binding::TypingModule) => TypingSymbol::from_name(attribute.attr.as_str()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Whether writing the bare name of `symbol` here would refer to it.
    #[must_use]
    pub fn can_introduce(&self, symbol: TypingSymbol) -> bool {
        match self.lookup(symbol.name()) {
            Some(Binding::Symbol(bound)) => bound == symbol,
            Some(_) => false,
            None => true,
        }
    }

    /// Whether the module itself imports `symbol` under its own name.
    #[must_use]
    pub fn module_imports(&self, symbol: TypingSymbol) -> bool {
        self.module.star_typing || self.module.get(symbol.name()) == Some(Binding::Symbol(symbol))
    }
}
