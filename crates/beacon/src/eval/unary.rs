//! Unary operation evaluation

use crate::ast::UnaryExpr;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for UnaryExpr {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let operand = self.operand.eval(interp, env)?;
        apply_unary(&self.op, &operand)
    }
}

/// Apply a unary operator: `'` is logical not, `-` numeric negation.
pub fn apply_unary(op: &str, operand: &Value) -> Result<Value, EvalError> {
    match op {
        "'" => Ok(Value::Bool(!operand.to_bool())),
        "-" => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(EvalError::type_mismatch(format!(
                "cannot negate {}",
                other.type_name()
            ))),
        },
        _ => Err(EvalError::UnknownOperator { op: op.to_string() }),
    }
}
