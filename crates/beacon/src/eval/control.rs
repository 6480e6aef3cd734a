//! Control flow mechanism for halt/proceed/back

use crate::ast::Node;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

/// Control flow signal for non-local jumps.
///
/// `halt`, `proceed` and `back` don't produce a value. They return
/// `Err(EvalError::ControlFlow(...))`, which propagates up until the
/// enclosing loop or call catches it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// `back`: leave the enclosing call with a value
    Return {
        /// Value to return from the call
        value: Value,
    },

    /// `halt`: leave the enclosing loop
    Halt,

    /// `proceed`: skip the rest of the current loop iteration
    Proceed,
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }
}

/// What a loop does after running its body once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStep {
    /// Run the next iteration
    Next,
    /// Leave the loop
    Break,
}

/// Run one loop iteration, absorbing `halt` and `proceed`.
pub fn run_iteration(
    body: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<LoopStep, EvalError> {
    match super::exec_block(body, interp, env) {
        Ok(()) => Ok(LoopStep::Next),
        Err(EvalError::ControlFlow(ControlFlow::Proceed)) => Ok(LoopStep::Next),
        Err(EvalError::ControlFlow(ControlFlow::Halt)) => Ok(LoopStep::Break),
        Err(e) => Err(e),
    }
}

/// Evaluate `back expr`.
pub fn eval_return(
    value: Option<&Node>,
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let value = match value {
        Some(expr) => expr.eval(interp, env)?,
        None => Value::Nil,
    };
    Err(EvalError::ControlFlow(ControlFlow::return_value(value)))
}
