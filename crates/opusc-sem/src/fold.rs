//! Compile-time evaluation of constant expressions.
//!
//! Every function here returns `Option`: `None` is a fold-failure, which
//! leaves the AST node unfolded and emits no diagnostic. Fold-failures
//! cover integer overflow (all integer arithmetic is checked, never
//! wrapping), integer division or modulo by zero, and factorials outside
//! the representable range.

use opusc_lex::TokenKind;
use opusc_par::Value;

/// Largest operand whose factorial fits in an `i64`.
pub const MAX_FACTORIAL_OPERAND: i64 = 20;

/// Iteratively computes `n!`, refusing operands outside `0..=20`.
pub fn factorial(n: i64) -> Option<i64> {
    if !(0..=MAX_FACTORIAL_OPERAND).contains(&n) {
        return None;
    }
    let mut result: i64 = 1;
    for factor in 2..=n {
        result = result.checked_mul(factor)?;
    }
    Some(result)
}

/// Numeric view of a value, promoting `Int` to `Float` when needed.
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        _ => None,
    }
}

/// Folds an arithmetic operation. The result is `Float` if either operand
/// is `Float`, else `Int`.
fn fold_arithmetic(op: TokenKind, lhs: &Value, rhs: &Value) -> Option<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match op {
                TokenKind::Plus => a.checked_add(*b)?,
                TokenKind::Minus => a.checked_sub(*b)?,
                TokenKind::Star => a.checked_mul(*b)?,
                TokenKind::Slash => a.checked_div(*b)?,
                TokenKind::Percent => a.checked_rem(*b)?,
                _ => return None,
            };
            Some(Value::Int(result))
        }
        _ => {
            let a = as_float(lhs)?;
            let b = as_float(rhs)?;
            let result = match op {
                TokenKind::Plus => a + b,
                TokenKind::Minus => a - b,
                TokenKind::Star => a * b,
                TokenKind::Slash => a / b,
                TokenKind::Percent => a % b,
                _ => return None,
            };
            Some(Value::Float(result))
        }
    }
}

/// Folds a comparison. Numeric operands compare after promotion; equality
/// also covers booleans and strings of matching type.
fn fold_comparison(op: TokenKind, lhs: &Value, rhs: &Value) -> Option<Value> {
    let result = match op {
        TokenKind::EqEq | TokenKind::NotEq => {
            let equal = match (lhs, rhs) {
                (Value::Bool(a), Value::Bool(b)) => a == b,
                (Value::Str(a), Value::Str(b)) => a == b,
                _ => as_float(lhs)? == as_float(rhs)?,
            };
            if op == TokenKind::EqEq {
                equal
            } else {
                !equal
            }
        }
        TokenKind::Lt => as_float(lhs)? < as_float(rhs)?,
        TokenKind::Gt => as_float(lhs)? > as_float(rhs)?,
        TokenKind::LtEq => as_float(lhs)? <= as_float(rhs)?,
        TokenKind::GtEq => as_float(lhs)? >= as_float(rhs)?,
        _ => return None,
    };
    Some(Value::Bool(result))
}

/// Folds a binary operation over two constant operands.
pub fn fold_binary(op: TokenKind, lhs: &Value, rhs: &Value) -> Option<Value> {
    match op {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => fold_arithmetic(op, lhs, rhs),
        TokenKind::AndAnd => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(*a && *b)),
            _ => None,
        },
        TokenKind::OrOr => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(*a || *b)),
            _ => None,
        },
        TokenKind::EqEq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LtEq
        | TokenKind::GtEq => fold_comparison(op, lhs, rhs),
        _ => None,
    }
}

/// Folds a prefix operation over one constant operand.
pub fn fold_unary(op: TokenKind, operand: &Value) -> Option<Value> {
    match (op, operand) {
        (TokenKind::Minus, Value::Int(v)) => v.checked_neg().map(Value::Int),
        (TokenKind::Minus, Value::Float(v)) => Some(Value::Float(-v)),
        (TokenKind::Not, Value::Bool(v)) => Some(Value::Bool(!v)),
        _ => None,
    }
}
