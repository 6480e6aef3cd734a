//! Binary operation evaluation

use crate::ast::BinaryExpr;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::{Value, TYPE_NAMES};

use super::Evaluate;

impl Evaluate for BinaryExpr {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        // Both operands are evaluated, `and`/`or` included.
        let left = self.left.eval(interp, env)?;
        let right = self.right.eval(interp, env)?;
        apply_binary(&self.op, &left, &right)
    }
}

/// Apply a binary operator to two evaluated operands.
///
/// # Errors
///
/// - `TypeMismatch` for operand kinds the operator does not accept
/// - `UnknownOperator` for an unrecognised symbol
/// - `UnknownTypeName` for an `is` test against a name that is not a type
pub fn apply_binary(op: &str, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match op {
        // Arithmetic
        "+" => match (left, right) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => arithmetic(op, left, right, |a, b| a + b),
        },
        "-" => arithmetic(op, left, right, |a, b| a - b),
        "*" => arithmetic(op, left, right, |a, b| a * b),
        "/" => arithmetic(op, left, right, |a, b| a / b),
        "%" => arithmetic(op, left, right, |a, b| a % b),

        // Comparison
        ">" => comparison(op, left, right, |a, b| a > b),
        "<" => comparison(op, left, right, |a, b| a < b),
        ">=" => comparison(op, left, right, |a, b| a >= b),
        "<=" => comparison(op, left, right, |a, b| a <= b),

        // Equality is typed: different kinds are never equal
        "==" => Ok(Value::Bool(left == right)),
        "'=" => Ok(Value::Bool(left != right)),

        // Logical
        "and" => Ok(Value::Bool(left.to_bool() && right.to_bool())),
        "or" => Ok(Value::Bool(left.to_bool() || right.to_bool())),

        ".." => {
            let (start, end) = numbers(op, left, right)?;
            Ok(Value::Range(start, end))
        }

        "is" => type_test(left, right),

        _ => Err(EvalError::UnknownOperator { op: op.to_string() }),
    }
}

fn numbers(op: &str, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(EvalError::type_mismatch(format!(
            "operator `{}` expects Num operands, got {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn arithmetic(
    op: &str,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let (a, b) = numbers(op, left, right)?;
    Ok(Value::Number(f(a, b)))
}

fn comparison(
    op: &str,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    let (a, b) = numbers(op, left, right)?;
    Ok(Value::Bool(f(a, b)))
}

fn type_test(value: &Value, type_name: &Value) -> Result<Value, EvalError> {
    match type_name {
        Value::String(name) if TYPE_NAMES.contains(&name.as_str()) => {
            Ok(Value::Bool(value.type_name() == name))
        }
        Value::String(name) => Err(EvalError::UnknownTypeName { name: name.clone() }),
        other => Err(EvalError::type_mismatch(format!(
            "`is` expects a type name, got {}",
            other.type_name()
        ))),
    }
}
