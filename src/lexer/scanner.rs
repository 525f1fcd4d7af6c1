//! Scanner for MiniJava source code tokenization.

use super::token::{lookup_keyword, Token, TokenKind};
use crate::diagnostics::{codes, Diagnostic, DiagnosticReporter};

/// Scanner that produces tokens from source code
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_offset: usize,
    start_offset: usize,
    reporter: &'a mut DiagnosticReporter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_offset: 0,
            start_offset: 0,
            reporter,
        }
    }

    /// Tokenize the entire source
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;

            if token.kind != TokenKind::Error {
                tokens.push(token);
            }

            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Scan a single token
    fn scan_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start_offset = self.current_offset;

        match self.advance() {
            None => Token::eof(self.current_offset),
            Some((offset, c)) => {
                self.start_offset = offset;
                self.current_offset = offset + c.len_utf8();

                match c {
                    // Single-char tokens
                    '(' => self.make_token(TokenKind::LeftParen),
                    ')' => self.make_token(TokenKind::RightParen),
                    '{' => self.make_token(TokenKind::LeftBrace),
                    '}' => self.make_token(TokenKind::RightBrace),
                    '[' => self.make_token(TokenKind::LeftBracket),
                    ']' => self.make_token(TokenKind::RightBracket),
                    ',' => self.make_token(TokenKind::Comma),
                    ';' => self.make_token(TokenKind::Semicolon),
                    '.' => self.make_token(TokenKind::Dot),
                    '*' => self.make_token(TokenKind::Star),
                    '/' => self.make_token(TokenKind::Slash),

                    // Potentially compound tokens
                    '+' => self.match_compound(&[('+', TokenKind::PlusPlus)], TokenKind::Plus),
                    '-' => self.match_compound(&[('-', TokenKind::MinusMinus)], TokenKind::Minus),
                    '=' => self.match_compound(&[('=', TokenKind::EqualEqual)], TokenKind::Equal),
                    '<' => self.match_compound(&[('=', TokenKind::LessEqual)], TokenKind::Less),
                    '>' => self.match_compound(&[('=', TokenKind::GreaterEqual)], TokenKind::Greater),

                    // '!', '&' and '|' only exist as parts of '!=', '&&', '||'
                    '!' => {
                        if self.match_char('=') {
                            self.make_token(TokenKind::BangEqual)
                        } else {
                            self.error_token(c)
                        }
                    }
                    '&' => {
                        if self.match_char('&') {
                            self.make_token(TokenKind::AmpersandAmpersand)
                        } else {
                            self.error_token(c)
                        }
                    }
                    '|' => {
                        if self.match_char('|') {
                            self.make_token(TokenKind::PipePipe)
                        } else {
                            self.error_token(c)
                        }
                    }

                    // String literal
                    '"' => self.scan_string(),

                    // Numbers
                    '0'..='9' => self.scan_number(),

                    // Identifiers and keywords
                    c if is_ident_start(c) => self.scan_identifier(c),

                    // Unknown character
                    _ => self.error_token(c),
                }
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('/') => {
                    // Look ahead for comment
                    let mut chars = self.chars.clone();
                    chars.next(); // consume '/'
                    match chars.peek() {
                        Some((_, '/')) => {
                            // Line comment
                            self.advance(); // '/'
                            self.advance(); // '/'
                            while self.peek().map_or(false, |c| c != '\n') {
                                self.advance();
                            }
                        }
                        Some((_, '*')) => {
                            // Block comment (not nested, as in Java)
                            self.advance(); // '/'
                            self.advance(); // '*'
                            loop {
                                match self.advance() {
                                    None => break,
                                    Some((_, '*')) => {
                                        if self.match_char('/') {
                                            break;
                                        }
                                    }
                                    _ => {}
                                }
                            }
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((_, c)) = result {
            self.current_offset += c.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_compound(&mut self, options: &[(char, TokenKind)], default: TokenKind) -> Token {
        for (c, kind) in options {
            if self.match_char(*c) {
                return self.make_token(*kind);
            }
        }
        self.make_token(default)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = &self.source[self.start_offset..self.current_offset];
        Token::new(kind, lexeme, self.start_offset, self.current_offset - self.start_offset)
    }

    fn error_token(&mut self, c: char) -> Token {
        self.reporter.report(
            Diagnostic::error(codes::UNEXPECTED_CHARACTER, format!("unexpected character '{}'", c)),
            self.start_offset,
            c.len_utf8(),
        );
        Token::new(TokenKind::Error, c, self.start_offset, c.len_utf8())
    }

    fn scan_identifier(&mut self, first: char) -> Token {
        let mut ident = String::new();
        ident.push(first);

        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = lookup_keyword(&ident).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        // Integer part
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        // Fractional part: only consume '.' when a digit follows
        if self.peek() == Some('.') {
            let mut chars = self.chars.clone();
            chars.next(); // consume '.'
            if chars.peek().map_or(false, |(_, c)| c.is_ascii_digit()) {
                self.advance(); // consume '.'
                is_float = true;

                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        self.make_token(if is_float { TokenKind::FloatLiteral } else { TokenKind::IntLiteral })
    }

    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    return self.make_token(TokenKind::StringLiteral);
                }
                '\\' => {
                    self.advance(); // consume backslash
                    self.advance(); // consume escaped char
                }
                '\n' => {
                    self.reporter.report(
                        Diagnostic::error(codes::UNTERMINATED_STRING, "unterminated string literal")
                            .with_help("string literals cannot span multiple lines"),
                        self.start_offset,
                        self.current_offset - self.start_offset,
                    );
                    return Token::new(TokenKind::Error, "", self.start_offset, 0);
                }
                _ => {
                    self.advance();
                }
            }
        }

        self.reporter.report(
            Diagnostic::error(codes::UNTERMINATED_STRING, "unterminated string literal")
                .with_help("add a closing '\"' at the end of the string"),
            self.start_offset,
            self.current_offset - self.start_offset,
        );
        Token::new(TokenKind::Error, "", self.start_offset, 0)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut reporter = DiagnosticReporter::new("test.java", source);
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        assert!(!reporter.has_errors(), "unexpected scan errors");
        tokens
    }

    #[test]
    fn scans_declaration_tokens() {
        let kinds: Vec<_> = scan("int x = 42;").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_int_and_float_literals() {
        let tokens = scan("3 3.14");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].lexeme, "3.14");
    }

    #[test]
    fn scans_compound_operators() {
        let kinds: Vec<_> = scan("== != <= >= && || ++ --").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::AmpersandAmpersand,
                TokenKind::PipePipe,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments() {
        let tokens = scan("// line\nint /* block */ x;");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].lexeme, "x");
    }

    #[test]
    fn reports_lone_ampersand() {
        let mut reporter = DiagnosticReporter::new("test.java", "a & b");
        let _ = Scanner::new("a & b", &mut reporter).scan_tokens();
        assert!(reporter.has_errors());
    }
}
