//! Function and method call evaluation

use std::rc::Rc;

use crate::ast::{Call, MethodCall, Node};
use crate::environment::{Environment, ScopeKind};
use crate::error::EvalError;
use crate::eval::control::ControlFlow;
use crate::interpreter::Interpreter;
use crate::value::{Instance, Value};

use super::{eval_args, exec_block, Evaluate};

/// Name under which methods and constructors see their receiver.
pub const RECEIVER_NAME: &str = "own";

impl Evaluate for Call {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let callee = match self.callee.as_ref() {
            Node::Variable(name) => env.lookup(name).ok_or_else(|| EvalError::Lookup {
                what: "spec",
                name: name.clone(),
            })?,
            other => other.eval(interp, env)?,
        };

        let func = match callee {
            Value::Function(func) => func,
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "{} is not callable",
                    other.type_name()
                )))
            }
        };

        check_arity(func.display_name(), func.params.len(), self.args.len())?;
        let args = eval_args(&self.args, interp, env)?;

        // No closures: the call frame hangs off the caller's scope.
        let scope = env.child(ScopeKind::Function);
        invoke(interp, func.display_name(), &func.params, &func.body, args, scope)
    }
}

impl Evaluate for MethodCall {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let object = self.object.eval(interp, env)?;

        match object {
            Value::Instance(instance) => {
                let func = match instance.method(&self.method) {
                    Some(Value::Function(func)) => func,
                    Some(other) => {
                        return Err(EvalError::type_mismatch(format!(
                            "`{}` is a {}, not a method",
                            self.method,
                            other.type_name()
                        )))
                    }
                    None => {
                        return Err(EvalError::Lookup {
                            what: "method",
                            name: self.method.clone(),
                        })
                    }
                };

                let expected = func.params.len().saturating_sub(1);
                check_arity(&self.method, expected, self.args.len())?;
                let args = eval_args(&self.args, interp, env)?;
                call_with_receiver(interp, &instance, &self.method, &func.params, &func.body, args)
            }

            Value::Toolkit(toolkit) => {
                let func = match toolkit.exports.get_local(&self.method) {
                    Some(Value::Function(func)) => func,
                    Some(other) => {
                        return Err(EvalError::type_mismatch(format!(
                            "`{}.{}` is a {}, not a spec",
                            toolkit.name,
                            self.method,
                            other.type_name()
                        )))
                    }
                    None => {
                        return Err(EvalError::Lookup {
                            what: "export",
                            name: self.method.clone(),
                        })
                    }
                };

                check_arity(&self.method, func.params.len(), self.args.len())?;
                let args = eval_args(&self.args, interp, env)?;
                let scope = env.child(ScopeKind::Function);
                invoke(interp, &self.method, &func.params, &func.body, args, scope)
            }

            other => Err(EvalError::type_mismatch(format!(
                "cannot call method `{}` on {}",
                self.method,
                other.type_name()
            ))),
        }
    }
}

/// Fail with `Arity` unless `got == expected`.
pub fn check_arity(name: &str, expected: usize, got: usize) -> Result<(), EvalError> {
    if expected == got {
        Ok(())
    } else {
        Err(EvalError::Arity {
            name: name.to_string(),
            expected,
            got,
        })
    }
}

/// Run a method or constructor body against an instance.
///
/// The frame hangs off the instance scope. The receiver is bound under
/// the first declared parameter and as `own`; the remaining parameters
/// take `args`.
pub fn call_with_receiver(
    interp: &mut Interpreter,
    instance: &Rc<Instance>,
    name: &str,
    params: &[String],
    body: &[Node],
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    let scope = instance.scope.child(ScopeKind::Method);
    let receiver = Value::Instance(Rc::clone(instance));

    if let Some(first) = params.first() {
        scope.declare(first.as_str(), receiver.clone(), false)?;
    }
    scope.declare(RECEIVER_NAME, receiver, false)?;

    invoke(interp, name, params.get(1..).unwrap_or(&[]), body, args, scope)
}

/// Bind `args` to `params` in `scope` and run `body` there.
///
/// `back` ends the body with its value; falling off the end yields `Nil`.
fn invoke(
    interp: &mut Interpreter,
    name: &str,
    params: &[String],
    body: &[Node],
    args: Vec<Value>,
    scope: Environment,
) -> Result<Value, EvalError> {
    interp.enter_call()?;
    tracing::debug!(spec = name, arity = args.len(), depth = interp.call_depth(), "call");

    let result = bind_params(params, args, &scope).and_then(|()| exec_block(body, interp, &scope));

    interp.exit_call();

    match result {
        Ok(()) => Ok(Value::Nil),
        Err(EvalError::ControlFlow(ControlFlow::Return { value })) => Ok(value),
        Err(EvalError::ControlFlow(flow)) => {
            // halt/proceed outside any loop end the call body
            tracing::debug!(spec = name, ?flow, "loop signal left call body");
            Ok(Value::Nil)
        }
        Err(e) => Err(e),
    }
}

fn bind_params(params: &[String], args: Vec<Value>, scope: &Environment) -> Result<(), EvalError> {
    for (param, arg) in params.iter().zip(args) {
        scope.declare(param.as_str(), arg, false)?;
    }
    Ok(())
}
