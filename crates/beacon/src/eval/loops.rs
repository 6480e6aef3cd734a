//! Loop evaluation

use crate::ast::{Each, Node, Traverse, Until};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::eval::control::{run_iteration, LoopStep};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

// ═══════════════════════════════════════════════════════════════════════
// traverse
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Traverse {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let start = expect_number(self.start.eval(interp, env)?, "traverse start")?;
        let end = expect_number(self.end.eval(interp, env)?, "traverse end")?;
        let step = match &self.step {
            Some(step) => expect_number(step.eval(interp, env)?, "traverse step")?,
            None => 1.0,
        };

        count(&self.var, start, end, step, &self.body, interp, env)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// each
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Each {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let (start, end) = match self.iterable.eval(interp, env)? {
            Value::Range(start, end) => (start, end),
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "each expects a Range, got {}",
                    other.type_name()
                )))
            }
        };
        let step = if end >= start { 1.0 } else { -1.0 };

        count(&self.var, start, end, step, &self.body, interp, env)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// until
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Until {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        loop {
            interp.check_interrupt()?;

            if self.condition.eval(interp, env)?.to_bool() {
                return Ok(Value::Nil);
            }

            if run_iteration(&self.body, interp, env)? == LoopStep::Break {
                return Ok(Value::Nil);
            }
        }
    }
}

/// Count `var` from `start` to `end` inclusive by `step`, running `body`
/// each time. The variable is assigned, so it outlives the loop.
fn count(
    var: &str,
    start: f64,
    end: f64,
    step: f64,
    body: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    if step == 0.0 || step.is_nan() {
        return Err(EvalError::type_mismatch("loop step must be a non-zero Num"));
    }

    let mut i = start;
    while (step > 0.0 && i <= end) || (step < 0.0 && i >= end) {
        interp.check_interrupt()?;
        env.assign(var, Value::Number(i))?;

        if run_iteration(body, interp, env)? == LoopStep::Break {
            break;
        }
        i += step;
    }
    Ok(Value::Nil)
}

fn expect_number(value: Value, what: &str) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(EvalError::type_mismatch(format!(
            "{} must be Num, got {}",
            what,
            other.type_name()
        ))),
    }
}
