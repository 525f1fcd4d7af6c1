//! Semantic analysis: symbol table, declaration checks and type synthesis.

mod analyzer;
mod symbol_table;

pub use analyzer::{SemanticAnalyzer, SemanticError, SemanticErrorKind};
pub use symbol_table::{Scope, Symbol, SymbolTable};
