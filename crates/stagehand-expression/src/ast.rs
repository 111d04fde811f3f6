//! Expression syntax tree.

use crate::value::Value;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `not x` / `!x`
    Not,
    /// `-x`
    Negate,
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `and` / `&&`
    And,
    /// `or` / `||`
    Or,
}

/// Operators that evaluate both operands, in no particular precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Concat,
    Arithmetic(ArithmeticOp),
}

/// Numeric operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// A parsed gating expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Value),
    /// A top-level name such as `gold` or `character`.
    Name(String),
    /// `target.field`
    Member(Box<Expr>, String),
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// Prefix operator application.
    Unary(UnaryOp, Box<Expr>),
    /// `and` / `or`; the right side is only evaluated when needed.
    Logical(LogicalOp, Box<Expr>, Box<Expr>),
    /// Infix operator application.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}
