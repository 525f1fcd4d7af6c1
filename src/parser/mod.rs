//! Parser module for building the parse tree from tokens.

mod ast;
mod expression;
mod statement;

pub use ast::*;
pub use expression::ExpressionParser;
pub use statement::StatementParser;

use crate::diagnostics::{codes, Diagnostic, DiagnosticReporter};
use crate::lexer::{Token, TokenKind};

/// Recursive descent parser for the MiniJava subset
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    reporter: &'a mut DiagnosticReporter,
    panic_mode: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            tokens,
            current: 0,
            reporter,
            panic_mode: false,
        }
    }

    /// Parse the entire program: a top-level block of statements
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    // Error recovery: skip to next sync point
                    self.synchronize();
                }
            }
        }

        Program {
            body: Block { statements },
        }
    }

    /// Parse a variable declaration statement (consumes the trailing ';')
    pub(crate) fn var_decl(&mut self) -> Option<Stmt> {
        let decl = self.var_decl_inner()?;
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Some(Stmt::VarDecl(decl))
    }

    /// Parse a variable declaration without the trailing ';' (shared with
    /// the for-loop initializer)
    pub(crate) fn var_decl_inner(&mut self) -> Option<VarDecl> {
        let scalar = self.parse_scalar_type()?;

        // Java-style prefix brackets: int[] a
        let mut ty: Type = if self.match_token(TokenKind::LeftBracket) {
            self.expect(TokenKind::RightBracket, "expected ']' after '['")?;
            Type::Array(scalar)
        } else {
            scalar.into()
        };

        let (name, name_span) = self.expect_identifier_with_span("expected identifier after type")?;

        // C-style suffix brackets: int a[]
        if !ty.is_array() && self.match_token(TokenKind::LeftBracket) {
            self.expect(TokenKind::RightBracket, "expected ']' after '['")?;
            ty = Type::Array(scalar);
        }

        let mut names = vec![(name, name_span)];

        // Either a single initialized name, or an uninitialized name list
        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            while self.match_token(TokenKind::Comma) {
                let entry = self.expect_identifier_with_span("expected identifier after ','")?;
                names.push(entry);
            }
            None
        };

        Some(VarDecl {
            ty,
            names,
            initializer,
        })
    }

    /// Parse a scalar type keyword: int, float, String
    pub(crate) fn parse_scalar_type(&mut self) -> Option<Scalar> {
        let scalar = match self.peek().kind {
            TokenKind::Int => Scalar::Int,
            TokenKind::Float => Scalar::Float,
            TokenKind::StringType => Scalar::Str,
            _ => {
                let lexeme = self.peek().lexeme.clone();
                self.error_at_current(
                    codes::EXPECTED_TYPE,
                    &format!("expected type, found '{}'", lexeme),
                );
                return None;
            }
        };
        self.advance();
        Some(scalar)
    }

    /// Parse a variable access usable as an assignment target: name[index]?
    pub(crate) fn parse_target(&mut self) -> Option<Target> {
        let (name, span) = self.expect_identifier_with_span("expected variable name")?;

        let index = if self.match_token(TokenKind::LeftBracket) {
            let index = self.expression()?;
            self.expect(TokenKind::RightBracket, "expected ']' after array index")?;
            Some(Box::new(index))
        } else {
            None
        };

        Some(Target { name, span, index })
    }

    /// Parse a block of statements
    pub(crate) fn block(&mut self) -> Option<Block> {
        self.expect(TokenKind::LeftBrace, "expected '{'")?;

        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    self.synchronize();
                }
            }
        }

        self.expect(TokenKind::RightBrace, "expected '}'")?;

        Some(Block { statements })
    }

    // === Helper methods ===

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// The token after the current one (for two-token lookahead)
    pub(crate) fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Option<&Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_at_current(codes::EXPECTED_TOKEN, message);
            None
        }
    }

    pub(crate) fn expect_identifier_with_span(&mut self, message: &str) -> Option<(String, Span)> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Some((token.lexeme.clone(), Span::new(token.offset, token.length)))
        } else {
            self.error_at_current(codes::EXPECTED_IDENTIFIER, message);
            None
        }
    }

    pub(crate) fn error_at_current(&mut self, code: &str, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        let token = self.peek();
        let diag = Diagnostic::error(code, message);

        self.reporter.report(diag, token.offset, token.length.max(1));
    }

    /// Error recovery: skip tokens until we find a synchronization point
    pub(crate) fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.is_at_end() {
            // After a semicolon, we're likely at the start of a new statement
            if self.current > 0 && self.previous().kind == TokenKind::Semicolon {
                return;
            }

            // Before certain keywords, we're likely at a statement boundary
            match self.peek().kind {
                TokenKind::Int
                | TokenKind::Float
                | TokenKind::StringType
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::LeftBrace
                | TokenKind::RightBrace => {
                    return;
                }
                _ => {}
            }

            self.advance();
        }
    }
}
