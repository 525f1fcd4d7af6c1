//! Expression parser for the MiniJava subset.
//! Expressions are additive chains over multiplicative chains over factors;
//! conditions are chains of expressions joined by logical/relational operators.

use super::{BinaryOp, CondOp, Condition, Expr, Parser, Span};
use crate::diagnostics::codes;
use crate::lexer::TokenKind;

/// Trait extension for expression parsing
pub trait ExpressionParser {
    fn expression(&mut self) -> Option<Expr>;
    fn condition(&mut self) -> Option<Condition>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn expression(&mut self) -> Option<Expr> {
        self.parse_additive()
    }

    fn condition(&mut self) -> Option<Condition> {
        let first = self.expression()?;
        let mut rest = Vec::new();

        while let Some(op) = self.match_cond_op() {
            let operand = self.expression()?;
            rest.push((op, operand));
        }

        Some(Condition { first, rest })
    }
}

impl<'a> Parser<'a> {
    fn match_cond_op(&mut self) -> Option<CondOp> {
        let op = match self.peek().kind {
            TokenKind::AmpersandAmpersand => CondOp::And,
            TokenKind::PipePipe => CondOp::Or,
            TokenKind::EqualEqual => CondOp::Eq,
            TokenKind::BangEqual => CondOp::Ne,
            TokenKind::Less => CondOp::Lt,
            TokenKind::LessEqual => CondOp::Le,
            TokenKind::Greater => CondOp::Gt,
            TokenKind::GreaterEqual => CondOp::Ge,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    /// Parse additive chain: term ((+|-) term)*
    fn parse_additive(&mut self) -> Option<Expr> {
        let mut expr = self.parse_term()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let span = expr.span().merge(&right.span());
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Some(expr)
    }

    /// Parse multiplicative chain: factor ((*|/) factor)*
    fn parse_term(&mut self) -> Option<Expr> {
        let mut expr = self.parse_factor()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            let span = expr.span().merge(&right.span());
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Some(expr)
    }

    /// Parse factors: literals, variable accesses, parenthesized
    /// expressions, and array creation
    fn parse_factor(&mut self) -> Option<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::IntLiteral => {
                self.advance();
                let value = token.lexeme.parse().unwrap_or(0);
                Some(Expr::IntLiteral(value, Span::new(token.offset, token.length)))
            }

            TokenKind::FloatLiteral => {
                self.advance();
                let value: f64 = token.lexeme.parse().unwrap_or(0.0);
                Some(Expr::FloatLiteral(value, Span::new(token.offset, token.length)))
            }

            TokenKind::StringLiteral => {
                self.advance();
                // Remove quotes and handle escapes
                let s = &token.lexeme[1..token.lexeme.len() - 1];
                Some(Expr::StringLiteral(
                    unescape_string(s),
                    Span::new(token.offset, token.length),
                ))
            }

            TokenKind::LeftParen => {
                let open = Span::new(token.offset, token.length);
                self.advance();
                let expr = self.expression()?;
                let close = self.expect(TokenKind::RightParen, "expected ')' after expression")?;
                let span = open.merge(&Span::new(close.offset, close.length));
                Some(Expr::Paren(Box::new(expr), span))
            }

            TokenKind::New => {
                let start = Span::new(token.offset, token.length);
                self.advance();
                let elem = self.parse_scalar_type()?;
                self.expect(TokenKind::LeftBracket, "expected '[' after array element type")?;
                let size = self.expression()?;
                let close = self.expect(TokenKind::RightBracket, "expected ']' after array size")?;
                let span = start.merge(&Span::new(close.offset, close.length));
                Some(Expr::NewArray {
                    elem,
                    size: Box::new(size),
                    span,
                })
            }

            TokenKind::Identifier => {
                let target = self.parse_target()?;
                Some(Expr::Variable(target))
            }

            _ => {
                self.error_at_current(
                    codes::EXPECTED_EXPRESSION,
                    &format!("expected expression, found '{}'", token.lexeme),
                );
                None
            }
        }
    }
}

/// Unescape string literal
fn unescape_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}
