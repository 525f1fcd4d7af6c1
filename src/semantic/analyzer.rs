//! Semantic analyzer: declaration checking and type synthesis.
//!
//! Walks the parse tree in source order with a scope-stack symbol table and
//! stops at the first violation, reporting it as a [`SemanticError`].

use super::{Symbol, SymbolTable};
use crate::diagnostics::codes;
use crate::parser::{
    BinaryOp, Condition, Expr, Program, Span, Stmt, Target, Type, VarDecl,
};
use thiserror::Error;

/// A semantic violation with the source span it was detected at
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub span: Span,
}

impl SemanticError {
    fn new(kind: SemanticErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Diagnostic code for this error kind
    pub fn code(&self) -> &'static str {
        match self.kind {
            SemanticErrorKind::DuplicateDeclaration(_) => codes::DUPLICATE_DECLARATION,
            SemanticErrorKind::UndeclaredVariable(_) => codes::UNDECLARED_VARIABLE,
            SemanticErrorKind::NotAnArray(_) => codes::NOT_AN_ARRAY,
            SemanticErrorKind::ArrayRequiresIndex(_) => codes::ARRAY_REQUIRES_INDEX,
            SemanticErrorKind::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            SemanticErrorKind::InvalidOperandType { .. } => codes::INVALID_OPERAND_TYPE,
        }
    }
}

/// The kinds of semantic violations the analyzer detects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticErrorKind {
    #[error("variable '{0}' is already declared in this scope")]
    DuplicateDeclaration(String),

    #[error("cannot find variable '{0}' in this scope")]
    UndeclaredVariable(String),

    #[error("'{0}' is not an array but is indexed like one")]
    NotAnArray(String),

    #[error("array '{0}' must be indexed to be used as a value")]
    ArrayRequiresIndex(String),

    #[error("mismatched types: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("operator '{op}' cannot be applied to operand of type {operand}")]
    InvalidOperandType {
        op: &'static str,
        operand: Type,
    },
}

/// Walks the parse tree, maintaining the symbol table and synthesizing
/// expression types. Stops at the first error.
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
        }
    }

    /// Analyze a whole program. The symbol table is rebuilt from scratch on
    /// every call, so analyzing the same tree twice gives the same result.
    pub fn analyze(&mut self, program: &Program) -> Result<(), SemanticError> {
        self.symbols = SymbolTable::new();

        for stmt in &program.body.statements {
            self.check_stmt(stmt)?;
        }

        Ok(())
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl(decl) => self.check_var_decl(decl),

            Stmt::Assign(assign) => {
                let target_ty = self.check_target(&assign.target)?;
                let value_ty = self.check_expr(&assign.value)?;

                if !assignable(target_ty, value_ty) {
                    return Err(SemanticError::new(
                        SemanticErrorKind::TypeMismatch {
                            expected: target_ty,
                            found: value_ty,
                        },
                        assign.value.span(),
                    ));
                }
                Ok(())
            }

            Stmt::Print { expr, .. } => {
                self.check_expr(expr)?;
                Ok(())
            }

            Stmt::Read { name, name_span, .. } => {
                if self.symbols.lookup(name).is_none() {
                    return Err(SemanticError::new(
                        SemanticErrorKind::UndeclaredVariable(name.clone()),
                        *name_span,
                    ));
                }
                Ok(())
            }

            Stmt::IncDec { name, name_span, .. } => {
                if self.symbols.lookup(name).is_none() {
                    return Err(SemanticError::new(
                        SemanticErrorKind::UndeclaredVariable(name.clone()),
                        *name_span,
                    ));
                }
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_condition(condition)?;
                self.check_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch)?;
                }
                Ok(())
            }

            Stmt::While { condition, body } => {
                self.check_condition(condition)?;
                self.check_stmt(body)
            }

            // The initializer is checked in the enclosing scope, matching the
            // flattened form the loop is translated to.
            Stmt::For {
                init,
                condition,
                update,
                body,
            } => {
                self.check_stmt(init)?;
                self.check_condition(condition)?;
                self.check_stmt(update)?;
                self.check_stmt(body)
            }

            Stmt::Block(block) => {
                self.symbols.enter_scope();
                let result = block
                    .statements
                    .iter()
                    .try_for_each(|stmt| self.check_stmt(stmt));
                self.symbols.exit_scope();
                result
            }
        }
    }

    /// Check a declaration: the initializer is checked first, against the
    /// declarations that precede it, then the new names are installed.
    fn check_var_decl(&mut self, decl: &VarDecl) -> Result<(), SemanticError> {
        if let Some(init) = &decl.initializer {
            let init_ty = self.check_expr(init)?;

            if !assignable(decl.ty, init_ty) {
                return Err(SemanticError::new(
                    SemanticErrorKind::TypeMismatch {
                        expected: decl.ty,
                        found: init_ty,
                    },
                    init.span(),
                ));
            }
        }

        for (name, name_span) in &decl.names {
            let symbol = Symbol {
                name: name.clone(),
                ty: decl.ty,
            };

            if self.symbols.declare(symbol).is_err() {
                return Err(SemanticError::new(
                    SemanticErrorKind::DuplicateDeclaration(name.clone()),
                    *name_span,
                ));
            }
        }

        Ok(())
    }

    /// A condition chain carries no type of its own; each operand expression
    /// is checked for well-formedness only.
    fn check_condition(&mut self, condition: &Condition) -> Result<(), SemanticError> {
        self.check_expr(&condition.first)?;
        for (_, operand) in &condition.rest {
            self.check_expr(operand)?;
        }
        Ok(())
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<Type, SemanticError> {
        match expr {
            Expr::IntLiteral(_, _) => Ok(Type::Int),
            Expr::FloatLiteral(_, _) => Ok(Type::Float),
            Expr::StringLiteral(_, _) => Ok(Type::Str),

            Expr::Paren(inner, _) => self.check_expr(inner),

            Expr::Variable(target) => self.check_target(target),

            Expr::NewArray { elem, size, .. } => {
                let size_ty = self.check_expr(size)?;
                if size_ty != Type::Int {
                    return Err(SemanticError::new(
                        SemanticErrorKind::TypeMismatch {
                            expected: Type::Int,
                            found: size_ty,
                        },
                        size.span(),
                    ));
                }
                Ok(Type::Array(*elem))
            }

            Expr::Binary {
                left,
                op,
                right,
                span,
            } => {
                let left_ty = self.check_expr(left)?;
                let right_ty = self.check_expr(right)?;
                self.check_binary(*op, left_ty, right_ty, *span)
            }
        }
    }

    /// Synthesize the type of a binary arithmetic operation
    fn check_binary(
        &self,
        op: BinaryOp,
        left: Type,
        right: Type,
        span: Span,
    ) -> Result<Type, SemanticError> {
        // String is only meaningful under '+', where it concatenates
        if left == Type::Str || right == Type::Str {
            if op != BinaryOp::Add {
                let operand = if left == Type::Str { left } else { right };
                return Err(SemanticError::new(
                    SemanticErrorKind::InvalidOperandType {
                        op: op.as_str(),
                        operand,
                    },
                    span,
                ));
            }
            return Ok(Type::Str);
        }

        // Numeric promotion: float dominates
        if left == Type::Float || right == Type::Float {
            Ok(Type::Float)
        } else {
            Ok(Type::Int)
        }
    }

    /// Resolve a variable access (bare or indexed) to its value type
    fn check_target(&mut self, target: &Target) -> Result<Type, SemanticError> {
        let ty = match self.symbols.lookup(&target.name) {
            Some(symbol) => symbol.ty,
            None => {
                return Err(SemanticError::new(
                    SemanticErrorKind::UndeclaredVariable(target.name.clone()),
                    target.span,
                ));
            }
        };

        match &target.index {
            Some(index) => {
                let element = match ty.element() {
                    Some(element) => element,
                    None => {
                        return Err(SemanticError::new(
                            SemanticErrorKind::NotAnArray(target.name.clone()),
                            target.span,
                        ));
                    }
                };

                let index_ty = self.check_expr(index)?;
                if index_ty != Type::Int {
                    return Err(SemanticError::new(
                        SemanticErrorKind::TypeMismatch {
                            expected: Type::Int,
                            found: index_ty,
                        },
                        index.span(),
                    ));
                }

                Ok(element)
            }

            None => {
                if ty.is_array() {
                    return Err(SemanticError::new(
                        SemanticErrorKind::ArrayRequiresIndex(target.name.clone()),
                        target.span,
                    ));
                }
                Ok(ty)
            }
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// The single permitted coercion is widening an int value into a float slot.
/// An array slot accepts a fresh array of the same element type.
fn assignable(declared: Type, value: Type) -> bool {
    declared == value || (declared == Type::Float && value == Type::Int)
}
