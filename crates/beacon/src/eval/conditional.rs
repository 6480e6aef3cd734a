//! `check` / `alter` / `altern` evaluation

use crate::ast::Check;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::{exec_block, Evaluate};

impl Evaluate for Check {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        if self.condition.eval(interp, env)?.to_bool() {
            exec_block(&self.body, interp, env)?;
            return Ok(Value::Nil);
        }

        for alter in &self.alters {
            if alter.condition.eval(interp, env)?.to_bool() {
                exec_block(&alter.body, interp, env)?;
                return Ok(Value::Nil);
            }
        }

        if let Some(altern) = &self.altern {
            exec_block(altern, interp, env)?;
        }
        Ok(Value::Nil)
    }
}
