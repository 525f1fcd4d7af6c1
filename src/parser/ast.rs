//! Parse tree definitions for the MiniJava subset.

use std::fmt;

/// Source span for tracking positions in error messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from start of source
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Create a span that covers both self and other
    pub fn merge(&self, other: &Span) -> Span {
        let start = self.offset.min(other.offset);
        let end = (self.offset + self.length).max(other.offset + other.length);
        Span::new(start, end - start)
    }
}

/// The root of the parse tree - a complete program
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Block,
}

/// A block of statements
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// Statements
#[derive(Debug, Clone)]
pub enum Stmt {
    /// Variable declaration
    VarDecl(VarDecl),

    /// Assignment to a (possibly indexed) variable
    Assign(Assign),

    /// Console write: System.out.println / System.out.print
    Print { expr: Expr, newline: bool },

    /// Console read: x = scanner.nextInt() / nextFloat() / nextLine()
    Read {
        name: String,
        name_span: Span,
        mode: ReadMode,
    },

    /// Increment / decrement: i++ or i--
    IncDec {
        name: String,
        name_span: Span,
        op: IncDecOp,
    },

    /// If statement
    If {
        condition: Condition,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// While loop
    While {
        condition: Condition,
        body: Box<Stmt>,
    },

    /// C-style for loop
    For {
        init: Box<Stmt>,
        condition: Condition,
        update: Box<Stmt>,
        body: Box<Stmt>,
    },

    /// Nested block (fresh scope)
    Block(Block),
}

/// Variable declaration: one declared type, one or more names.
/// An initializer is only permitted for a single-name declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: Type,
    pub names: Vec<(String, Span)>,
    pub initializer: Option<Expr>,
}

/// Assignment statement
#[derive(Debug, Clone)]
pub struct Assign {
    pub target: Target,
    pub value: Expr,
}

/// An assignable variable access: a name with an optional single index
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub span: Span,
    pub index: Option<Box<Expr>>,
}

/// Console read variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Int,
    Float,
    Line,
}

/// Increment or decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

/// Static types of the source language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Str,
    /// Single-dimension array of a scalar element type
    Array(Scalar),
}

/// Scalar element types (arrays of arrays do not exist)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Int,
    Float,
    Str,
}

impl Type {
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// The scalar type stored in an array, if this is an array type
    pub fn element(&self) -> Option<Type> {
        match self {
            Type::Array(elem) => Some(Type::from(*elem)),
            _ => None,
        }
    }
}

impl From<Scalar> for Type {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int => Type::Int,
            Scalar::Float => Type::Float,
            Scalar::Str => Type::Str,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Str => write!(f, "String"),
            Type::Array(elem) => write!(f, "{}[]", Type::from(*elem)),
        }
    }
}

/// A condition: a chain of expressions joined by logical/relational operators.
/// The chain itself carries no type; only its operands are type-checked.
#[derive(Debug, Clone)]
pub struct Condition {
    pub first: Expr,
    pub rest: Vec<(CondOp, Expr)>,
}

/// Logical and relational connectives inside a condition chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CondOp {
    /// Source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            CondOp::And => "&&",
            CondOp::Or => "||",
            CondOp::Eq => "==",
            CondOp::Ne => "!=",
            CondOp::Lt => "<",
            CondOp::Le => "<=",
            CondOp::Gt => ">",
            CondOp::Ge => ">=",
        }
    }

    /// Python spelling. Only the two logical connectives are rewritten;
    /// relational/equality operators pass through with their source spelling.
    pub fn to_py_str(&self) -> &'static str {
        match self {
            CondOp::And => "and",
            CondOp::Or => "or",
            other => other.as_str(),
        }
    }
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    /// Integer literal
    IntLiteral(i64, Span),

    /// Float literal
    FloatLiteral(f64, Span),

    /// String literal (unescaped)
    StringLiteral(String, Span),

    /// Variable access, optionally indexed
    Variable(Target),

    /// Parenthesized sub-expression (parentheses are preserved in output)
    Paren(Box<Expr>, Span),

    /// Array creation: new T[size]
    NewArray {
        elem: Scalar,
        size: Box<Expr>,
        span: Span,
    },

    /// Binary arithmetic operation
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Source span covered by this expression
    pub fn span(&self) -> Span {
        match self {
            Expr::IntLiteral(_, span)
            | Expr::FloatLiteral(_, span)
            | Expr::StringLiteral(_, span)
            | Expr::Paren(_, span)
            | Expr::NewArray { span, .. }
            | Expr::Binary { span, .. } => *span,
            Expr::Variable(target) => target.span,
        }
    }
}

/// Arithmetic binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Python spelling. Arithmetic operators share their spelling between
    /// the two languages and pass through unchanged.
    pub fn to_py_str(&self) -> &'static str {
        self.as_str()
    }
}
