//! Composite literal evaluation: interpolated strings and `pack`

use crate::ast::{InterpolationPart, Node};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

/// Concatenate literal parts with the display form of expression parts.
pub fn eval_interpolated(
    parts: &[InterpolationPart],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let mut text = String::new();
    for part in parts {
        match part {
            InterpolationPart::Literal(literal) => text.push_str(literal),
            InterpolationPart::Expr(expr) => {
                text.push_str(&expr.eval(interp, env)?.to_display_string())
            }
        }
    }
    Ok(Value::String(text))
}

/// Render `pack [a, b, ...]` as text: `[a, b, ...]` with text items quoted.
///
/// The result is plain text, not a collection.
pub fn eval_pack(
    items: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let rendered = items
        .iter()
        .map(|item| item.eval(interp, env).map(|v| v.to_pack_item()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::String(format!("[{}]", rendered.join(", "))))
}
