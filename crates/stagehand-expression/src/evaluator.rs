//! Expression evaluation with a fail-open policy.

use tracing::warn;

use crate::ast::{ArithmeticOp, BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::context::ExpressionContext;
use crate::error::ExpressionError;
use crate::parser::parse;
use crate::value::Value;

/// Evaluates gating expressions against a fixed context.
#[derive(Debug, Clone)]
pub struct Evaluator {
    context: ExpressionContext,
}

impl Evaluator {
    /// Creates an evaluator over `context`.
    #[must_use]
    pub fn new(context: ExpressionContext) -> Self {
        Self { context }
    }

    /// Decides whether a gate is open.
    ///
    /// `None`, empty and whitespace-only expressions are always open. Any
    /// error is logged and treated as open: broken author content must not
    /// lock players out.
    #[must_use]
    pub fn evaluate(&self, expression: Option<&str>) -> bool {
        match self.try_evaluate(expression) {
            Ok(open) => open,
            Err(err) => {
                warn!(
                    expression = expression.unwrap_or_default(),
                    error = %err,
                    "gating expression failed, treating connection as open"
                );
                true
            }
        }
    }

    /// Like [`Evaluator::evaluate`] but surfaces errors instead of failing
    /// open.
    ///
    /// # Errors
    ///
    /// Returns the lexing, parsing or evaluation error.
    pub fn try_evaluate(&self, expression: Option<&str>) -> Result<bool, ExpressionError> {
        let Some(source) = expression.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(true);
        };
        let expr = parse(source)?;
        Ok(self.eval(&expr)?.is_truthy())
    }

    /// Evaluates a parsed expression to a value.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionError::Evaluation` on type mismatches, division by
    /// zero or integer overflow.
    pub fn eval(&self, expr: &Expr) -> Result<Value, ExpressionError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => Ok(self.context.get(name)),
            Expr::Member(target, field) => Ok(self.eval(target)?.member(field)),
            Expr::Array(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expr::Unary(op, operand) => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Negate => negate(&value),
                }
            }
            Expr::Logical(op, left, right) => {
                let left = self.eval(left)?.is_truthy();
                let open = match op {
                    LogicalOp::And => left && self.eval(right)?.is_truthy(),
                    LogicalOp::Or => left || self.eval(right)?.is_truthy(),
                };
                Ok(Value::Bool(open))
            }
            Expr::Binary(op, left, right) => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, &left, &right)
            }
        }
    }
}

fn negate(value: &Value) -> Result<Value, ExpressionError> {
    match value {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| ExpressionError::Evaluation("integer overflow".to_owned())),
        Value::Float(f) => Ok(Value::Float(-f)),
        other => Err(ExpressionError::Evaluation(format!(
            "cannot negate '{other}'"
        ))),
    }
}

fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ExpressionError> {
    use std::cmp::Ordering;

    let ordered = |accept: fn(Ordering) -> bool| {
        Value::Bool(left.compare(right).is_some_and(accept))
    };

    Ok(match op {
        BinaryOp::Eq => Value::Bool(left.loose_eq(right)),
        BinaryOp::NotEq => Value::Bool(!left.loose_eq(right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_eq(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_eq(right)),
        BinaryOp::Lt => ordered(Ordering::is_lt),
        BinaryOp::Le => ordered(Ordering::is_le),
        BinaryOp::Gt => ordered(Ordering::is_gt),
        BinaryOp::Ge => ordered(Ordering::is_ge),
        BinaryOp::In => Value::Bool(contains(right, left)?),
        BinaryOp::NotIn => Value::Bool(!contains(right, left)?),
        BinaryOp::Concat => Value::Str(format!("{left}{right}")),
        BinaryOp::Arithmetic(op) => arithmetic(op, left, right)?,
    })
}

fn contains(haystack: &Value, needle: &Value) -> Result<bool, ExpressionError> {
    match haystack {
        Value::Array(items) => Ok(items.iter().any(|item| item.loose_eq(needle))),
        other => Err(ExpressionError::Evaluation(format!(
            "right side of 'in' must be an array, got '{other}'"
        ))),
    }
}

fn arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> Result<Value, ExpressionError> {
    let overflow = || ExpressionError::Evaluation("integer overflow".to_owned());
    let division_by_zero = || ExpressionError::Evaluation("division by zero".to_owned());

    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        let (a, b) = (*a, *b);
        return match op {
            ArithmeticOp::Add => a.checked_add(b).map(Value::Int).ok_or_else(overflow),
            ArithmeticOp::Sub => a.checked_sub(b).map(Value::Int).ok_or_else(overflow),
            ArithmeticOp::Mul => a.checked_mul(b).map(Value::Int).ok_or_else(overflow),
            ArithmeticOp::Div | ArithmeticOp::Mod if b == 0 => Err(division_by_zero()),
            ArithmeticOp::Div if a.checked_rem(b) == Some(0) => {
                a.checked_div(b).map(Value::Int).ok_or_else(overflow)
            }
            #[allow(clippy::cast_precision_loss)]
            ArithmeticOp::Div => Ok(Value::Float(a as f64 / b as f64)),
            ArithmeticOp::Mod => a.checked_rem(b).map(Value::Int).ok_or_else(overflow),
        };
    }

    let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
        return Err(ExpressionError::Evaluation(format!(
            "cannot apply {op:?} to '{left}' and '{right}'"
        )));
    };
    match op {
        ArithmeticOp::Add => Ok(Value::Float(a + b)),
        ArithmeticOp::Sub => Ok(Value::Float(a - b)),
        ArithmeticOp::Mul => Ok(Value::Float(a * b)),
        ArithmeticOp::Div | ArithmeticOp::Mod if b == 0.0 => Err(division_by_zero()),
        ArithmeticOp::Div => Ok(Value::Float(a / b)),
        ArithmeticOp::Mod => Ok(Value::Float(a % b)),
    }
}
