//! Variable access, assignment and constant declaration

use crate::ast::{Assign, ConstDecl, Nick, Node};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

/// Read a variable. The result is a copy; the binding is never aliased.
pub fn lookup_variable(name: &str, env: &Environment) -> Result<Value, EvalError> {
    env.lookup(name).ok_or_else(|| EvalError::undefined(name))
}

impl Evaluate for Assign {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let value = self.value.eval(interp, env)?;

        match self.target.as_ref() {
            Node::Variable(name) => env.assign(name, value)?,
            Node::Attribute(access) => {
                let object = access.object.eval(interp, env)?;
                match object {
                    Value::Instance(instance) => {
                        instance.scope.declare(access.attribute.as_str(), value, false)?
                    }
                    other => {
                        return Err(EvalError::type_mismatch(format!(
                            "cannot set attribute `{}` on {}",
                            access.attribute,
                            other.type_name()
                        )))
                    }
                }
            }
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "cannot assign to {}",
                    other.kind_name()
                )))
            }
        }

        Ok(Value::Nil)
    }
}

impl Evaluate for ConstDecl {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let value = self.value.eval(interp, env)?;
        env.declare(self.name.as_str(), value, true)?;
        Ok(Value::Nil)
    }
}

impl Evaluate for Nick {
    fn eval(&self, _interp: &mut Interpreter, _env: &Environment) -> Result<Value, EvalError> {
        // Type aliases only matter to the parser.
        tracing::trace!(alias = %self.alias, original = %self.original, "nick");
        Ok(Value::Nil)
    }
}
