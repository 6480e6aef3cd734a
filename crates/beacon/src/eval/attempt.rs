//! `attempt` / `trap` / `conclude` and `trigger`

use crate::ast::{Attempt, Trigger};
use crate::environment::{Environment, ScopeKind};
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::{exec_block, Evaluate};

/// Name under which the trap body sees the error message.
pub const PEEK_NAME: &str = "peek";

impl Evaluate for Attempt {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        tracing::debug!(statements = self.body.len(), "attempt: running");
        let body_scope = env.child(ScopeKind::Block);

        let outcome = match exec_block(&self.body, interp, &body_scope) {
            Err(EvalError::Raised { name, message }) => {
                tracing::debug!(%name, "attempt: error detected");
                self.run_trap(name, message, interp, env)
            }
            other => {
                if other.is_ok() {
                    tracing::debug!("attempt: completed");
                }
                other
            }
        };

        // conclude runs whatever happened above, in the enclosing scope
        if let Some(conclude) = &self.conclude {
            tracing::debug!("attempt: concluding");
            exec_block(conclude, interp, env)?;
        }

        outcome.map(|()| Value::Nil)
    }
}

impl Attempt {
    fn run_trap(
        &self,
        name: String,
        message: String,
        interp: &mut Interpreter,
        env: &Environment,
    ) -> Result<(), EvalError> {
        let trap_scope = env.child(ScopeKind::Block);
        if self.peek {
            trap_scope.declare(PEEK_NAME, Value::String(message), false)?;
        }
        if let Some(var) = &self.error_var {
            trap_scope.declare(var.as_str(), Value::String(name), false)?;
        }
        exec_block(&self.trap, interp, &trap_scope)
    }
}

impl Evaluate for Trigger {
    fn eval(&self, _interp: &mut Interpreter, _env: &Environment) -> Result<Value, EvalError> {
        Err(EvalError::Raised {
            name: self.name.clone(),
            message: self.message.clone().unwrap_or_default(),
        })
    }
}
