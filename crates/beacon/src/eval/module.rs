//! Toolkits, plug/expose, bridges, link and bring

use std::rc::Rc;

use crate::ast::{BridgeDecl, Bring, Link, Plug, ToolkitDecl};
use crate::environment::{Environment, ScopeKind};
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::{BridgeValue, ToolkitValue, Value};

use super::{exec_block, Evaluate};

impl Evaluate for ToolkitDecl {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let exports = Environment::new(ScopeKind::Exports);
        let scope = env.child(ScopeKind::Toolkit {
            exports: exports.clone(),
        });

        exec_block(&self.body, interp, &scope)?;

        let toolkit = ToolkitValue {
            name: self.name.clone(),
            scope,
            exports,
        };
        env.declare(self.name.as_str(), Value::Toolkit(Rc::new(toolkit)), false)?;
        Ok(Value::Nil)
    }
}

impl Evaluate for Plug {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        // A toolkit that is not bound yet is brought from its source file.
        if !env.contains(&self.toolkit) {
            if let Some(path) = &self.file_path {
                splice_module(path, interp, env)?;
            }
        }

        let toolkit = match env.lookup(&self.toolkit) {
            Some(Value::Toolkit(toolkit)) => toolkit,
            Some(other) => {
                return Err(EvalError::type_mismatch(format!(
                    "cannot plug {} `{}`",
                    other.type_name(),
                    self.toolkit
                )))
            }
            None => {
                return Err(EvalError::Lookup {
                    what: "toolkit",
                    name: self.toolkit.clone(),
                })
            }
        };

        tracing::debug!(toolkit = %toolkit.name, exports = toolkit.exports.len(), "plug");
        env.copy_bindings_from(&toolkit.exports)?;
        Ok(Value::Nil)
    }
}

/// Evaluate `expose name`: copy the binding into the nearest toolkit's
/// exports.
pub fn expose(name: &str, env: &Environment) -> Result<Value, EvalError> {
    let exports = env
        .nearest_toolkit_exports()
        .ok_or_else(|| EvalError::type_mismatch("expose can only be used inside a toolkit"))?;
    let value = env.lookup(name).ok_or_else(|| EvalError::Lookup {
        what: "identifier",
        name: name.to_string(),
    })?;
    exports.declare(name, value, false)?;
    Ok(Value::Nil)
}

impl Evaluate for BridgeDecl {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let scope = env.child(ScopeKind::Bridge);
        exec_block(&self.body, interp, &scope)?;

        let bridge = BridgeValue {
            name: self.name.clone(),
            scope,
        };
        env.declare(self.name.as_str(), Value::Bridge(Rc::new(bridge)), false)?;
        Ok(Value::Nil)
    }
}

impl Evaluate for Link {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let implementation = self.implementation.eval(interp, env)?;
        env.assign(&self.greeter, implementation)?;
        Ok(Value::Nil)
    }
}

impl Evaluate for Bring {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        splice_module(&self.source, interp, env)?;

        for module in &self.modules {
            if !env.contains(module) {
                return Err(EvalError::Lookup {
                    what: "module",
                    name: module.clone(),
                });
            }
        }
        Ok(Value::Nil)
    }
}

/// Load `path` and run its statements in `env`.
fn splice_module(path: &str, interp: &mut Interpreter, env: &Environment) -> Result<(), EvalError> {
    let statements = interp.start_bring(path)?;
    tracing::debug!(path, statements = statements.len(), "bring");

    let result = exec_block(&statements, interp, env);
    interp.finish_bring();
    result
}
