//! # MiniJava
//!
//! A transpiler for a small, statically typed Java subset that targets
//! readable Python. The pipeline has four stages:
//!
//! 1. **Lexer** - converts source text to tokens
//! 2. **Parser** - builds a parse tree with error recovery
//! 3. **Semantic analysis** - symbol table, declaration checks, type synthesis
//! 4. **Code generation** - structure-preserving Python emission
//!
//! The [`Driver`] ties the stages together; diagnostics come back as
//! rustc-style, source-located [`Diagnostic`] values.

pub mod codegen;
pub mod diagnostics;
pub mod dot;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use diagnostics::{Diagnostic, DiagnosticLevel, SourceLocation};
pub use driver::{Artifacts, Driver};
