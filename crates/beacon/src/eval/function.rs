//! Function declaration evaluation

use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::Value;

/// Evaluate a `spec` declaration.
///
/// A named declaration binds a `Function` value in the current scope and
/// yields `Nil`; when flagged `exposed` or `shared` inside a toolkit it is
/// also copied into that toolkit's exports. An anonymous declaration
/// yields the `Function` value itself.
///
/// # Errors
///
/// Returns `ConstAssign` if the name is a constant in the current scope.
pub fn declare_function(decl: &Rc<FunctionDecl>, env: &Environment) -> Result<Value, EvalError> {
    let value = Value::Function(Rc::clone(decl));

    let Some(name) = &decl.name else {
        return Ok(value);
    };

    env.declare(name.as_str(), value.clone(), false)?;

    if decl.exposed || decl.shared {
        if let Some(exports) = env.nearest_toolkit_exports() {
            exports.declare(name.as_str(), value, false)?;
        }
    }

    Ok(Value::Nil)
}
