//! Token definitions for the MiniJava lexer.

use std::fmt;

/// A token with its kind, lexeme, and position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
            length,
        }
    }

    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset, 0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}')", self.kind, self.lexeme)
    }
}

/// All token kinds in the MiniJava subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Identifiers and keywords
    Identifier,

    // Type keywords
    Int,
    Float,
    StringType,

    // Keywords
    New,
    If,
    Else,
    While,
    For,

    // Operators
    Plus,               // +
    Minus,              // -
    Star,               // *
    Slash,              // /
    Equal,              // =
    EqualEqual,         // ==
    BangEqual,          // !=
    Less,               // <
    LessEqual,          // <=
    Greater,            // >
    GreaterEqual,       // >=
    AmpersandAmpersand, // &&
    PipePipe,           // ||
    PlusPlus,           // ++
    MinusMinus,         // --

    // Punctuation
    Dot,            // .
    Comma,          // ,
    Semicolon,      // ;

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// Check if this token is a type keyword (starts a declaration)
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::StringType)
    }
}

/// Map string to keyword token kind
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "int" => Some(TokenKind::Int),
        "float" => Some(TokenKind::Float),
        "String" => Some(TokenKind::StringType),
        "new" => Some(TokenKind::New),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "for" => Some(TokenKind::For),
        _ => None,
    }
}
