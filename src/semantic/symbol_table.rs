//! Symbol table for tracking declarations and scopes.

use crate::parser::Type;
use std::collections::HashMap;

/// Symbol table with nested scopes. The outermost (global) scope is created
/// on construction and is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

/// A single scope level
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
}

/// The compile-time record of a declared identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()], // Global scope
        }
    }

    /// Enter a new lexical scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Exit the current scope, discarding every symbol declared in it.
    /// Attempting to exit the global scope is a logic error in the caller
    /// and is ignored.
    pub fn exit_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "attempted to exit the global scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a symbol in the current scope. Fails with the rejected symbol
    /// if a symbol of the same name already exists in the current scope;
    /// shadowing an outer scope is allowed.
    pub fn declare(&mut self, symbol: Symbol) -> Result<(), Symbol> {
        let scope = self
            .scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("symbol table always has a global scope"));

        if scope.symbols.contains_key(&symbol.name) {
            return Err(symbol);
        }

        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Look up a symbol by name, scanning scopes from innermost to outermost
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
        }
        None
    }

    /// Current scope nesting depth (0 = global)
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
