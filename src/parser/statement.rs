//! Statement parser for the MiniJava subset.

use super::expression::ExpressionParser;
use super::{Assign, IncDecOp, Parser, ReadMode, Span, Stmt};
use crate::diagnostics::codes;
use crate::lexer::TokenKind;

/// Trait extension for statement parsing
pub trait StatementParser {
    fn statement(&mut self) -> Option<Stmt>;
}

impl<'a> StatementParser for Parser<'a> {
    fn statement(&mut self) -> Option<Stmt> {
        self.parse_statement()
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        // Declarations start with a type keyword
        if self.peek().kind.is_type_keyword() {
            return self.var_decl();
        }

        match self.peek().kind {
            TokenKind::LeftBrace => {
                let block = self.block()?;
                Some(Stmt::Block(block))
            }

            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),

            TokenKind::Identifier => {
                // System.out.print / System.out.println
                if self.peek().lexeme == "System"
                    && self.peek_next().map_or(false, |t| t.kind == TokenKind::Dot)
                {
                    return self.print_statement();
                }

                // i++ / i--
                if self.peek_next().map_or(false, |t| {
                    matches!(t.kind, TokenKind::PlusPlus | TokenKind::MinusMinus)
                }) {
                    let stmt = self.inc_dec()?;
                    self.expect(TokenKind::Semicolon, "expected ';' after increment")?;
                    return Some(stmt);
                }

                // Assignment or console read
                let stmt = self.assign_or_read()?;
                self.expect(TokenKind::Semicolon, "expected ';' after statement")?;
                Some(stmt)
            }

            _ => {
                let lexeme = self.peek().lexeme.clone();
                self.error_at_current(
                    codes::EXPECTED_STATEMENT,
                    &format!("expected statement, found '{}'", lexeme),
                );
                None
            }
        }
    }

    /// Parse an increment/decrement without the trailing ';' (shared with
    /// the for-loop update clause)
    pub(crate) fn inc_dec(&mut self) -> Option<Stmt> {
        let (name, name_span) = self.expect_identifier_with_span("expected variable name")?;

        let op = match self.peek().kind {
            TokenKind::PlusPlus => IncDecOp::Inc,
            TokenKind::MinusMinus => IncDecOp::Dec,
            _ => {
                self.error_at_current(codes::EXPECTED_TOKEN, "expected '++' or '--'");
                return None;
            }
        };
        self.advance();

        Some(Stmt::IncDec { name, name_span, op })
    }

    /// Parse `target = <expr or scanner read>` without the trailing ';'
    pub(crate) fn assign_or_read(&mut self) -> Option<Stmt> {
        let target = self.parse_target()?;
        self.expect(TokenKind::Equal, "expected '=' in assignment")?;

        // `x = scanner.nextInt();` and friends are read statements
        if self.check(TokenKind::Identifier)
            && self.peek().lexeme == "scanner"
            && self.peek_next().map_or(false, |t| t.kind == TokenKind::Dot)
        {
            return self.read_statement(target.name, target.span, target.index.is_some());
        }

        let value = self.expression()?;
        Some(Stmt::Assign(Assign { target, value }))
    }

    /// Parse the `scanner.nextXxx()` tail of a read statement
    fn read_statement(&mut self, name: String, name_span: Span, indexed: bool) -> Option<Stmt> {
        self.advance(); // consume 'scanner'
        self.advance(); // consume '.'

        let (method, method_span) = self.expect_identifier_with_span("expected read method after 'scanner.'")?;

        let mode = match method.as_str() {
            "nextInt" => ReadMode::Int,
            "nextFloat" => ReadMode::Float,
            "nextLine" => ReadMode::Line,
            other => {
                self.reporter.report(
                    crate::diagnostics::Diagnostic::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("unknown read method 'scanner.{}'", other),
                    )
                    .with_help("supported reads are nextInt(), nextFloat() and nextLine()"),
                    method_span.offset,
                    method_span.length,
                );
                return None;
            }
        };

        self.expect(TokenKind::LeftParen, "expected '(' after read method")?;
        self.expect(TokenKind::RightParen, "expected ')' after read method")?;

        if indexed {
            self.error_at_current(codes::UNEXPECTED_TOKEN, "read target must be a plain variable");
            return None;
        }

        Some(Stmt::Read { name, name_span, mode })
    }

    /// Parse if statement: if (cond) stmt (else stmt)?
    fn if_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'if'
        self.expect(TokenKind::LeftParen, "expected '(' after 'if'")?;
        let condition = self.condition()?;
        self.expect(TokenKind::RightParen, "expected ')' after condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Some(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// Parse while loop: while (cond) stmt
    fn while_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'while'
        self.expect(TokenKind::LeftParen, "expected '(' after 'while'")?;
        let condition = self.condition()?;
        self.expect(TokenKind::RightParen, "expected ')' after condition")?;

        let body = Box::new(self.parse_statement()?);

        Some(Stmt::While { condition, body })
    }

    /// Parse C-style for loop: for (init; cond; update) stmt
    fn for_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'for'
        self.expect(TokenKind::LeftParen, "expected '(' after 'for'")?;

        // Initializer: a declaration or an assignment
        let init = if self.peek().kind.is_type_keyword() {
            Stmt::VarDecl(self.var_decl_inner()?)
        } else {
            self.assign_or_read()?
        };
        self.expect(TokenKind::Semicolon, "expected ';' after for initializer")?;

        let condition = self.condition()?;
        self.expect(TokenKind::Semicolon, "expected ';' after for condition")?;

        // Update: i++, i-- or a generalized assignment
        let update = if self.peek_next().map_or(false, |t| {
            matches!(t.kind, TokenKind::PlusPlus | TokenKind::MinusMinus)
        }) {
            self.inc_dec()?
        } else {
            self.assign_or_read()?
        };

        self.expect(TokenKind::RightParen, "expected ')' after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Some(Stmt::For {
            init: Box::new(init),
            condition,
            update: Box::new(update),
            body,
        })
    }

    /// Parse System.out.println(expr); / System.out.print(expr);
    fn print_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'System'
        self.advance(); // consume '.'

        let (member, member_span) = self.expect_identifier_with_span("expected 'out' after 'System.'")?;
        if member != "out" {
            self.reporter.report(
                crate::diagnostics::Diagnostic::error(
                    codes::UNEXPECTED_TOKEN,
                    format!("expected 'out' after 'System.', found '{}'", member),
                ),
                member_span.offset,
                member_span.length,
            );
            return None;
        }

        self.expect(TokenKind::Dot, "expected '.' after 'System.out'")?;
        let (method, method_span) = self.expect_identifier_with_span("expected print method")?;

        let newline = match method.as_str() {
            "println" => true,
            "print" => false,
            other => {
                self.reporter.report(
                    crate::diagnostics::Diagnostic::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("unknown print method 'System.out.{}'", other),
                    ),
                    method_span.offset,
                    method_span.length,
                );
                return None;
            }
        };

        self.expect(TokenKind::LeftParen, "expected '(' after print method")?;
        let expr = self.expression()?;
        self.expect(TokenKind::RightParen, "expected ')' after print argument")?;
        self.expect(TokenKind::Semicolon, "expected ';' after print statement")?;

        Some(Stmt::Print { expr, newline })
    }
}
