//! Blueprint declaration, spawn, adopt and attribute access

use std::rc::Rc;

use crate::ast::{Adopt, AttributeAccess, BlueprintDecl, Node, Spawn};
use crate::environment::{Environment, ScopeKind};
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::{BlueprintValue, Instance, Value};

use super::call::call_with_receiver;
use super::{eval_args, Evaluate};

impl Evaluate for BlueprintDecl {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let scope = env.child(ScopeKind::Blueprint);

        for attribute in &self.attributes {
            declare_attribute(attribute, interp, &scope)?;
        }
        for method in &self.methods {
            method.eval(interp, &scope)?;
        }

        let blueprint = BlueprintValue {
            name: self.name.clone(),
            scope,
            constructor: self.constructor.clone(),
        };
        env.declare(self.name.as_str(), Value::Blueprint(Rc::new(blueprint)), false)?;
        Ok(Value::Nil)
    }
}

/// Declare one field of a blueprint.
///
/// A bare name declares a `Nil` field and `name = expr` declares the field
/// in the blueprint scope even if an outer scope already binds `name`.
fn declare_attribute(
    attribute: &Node,
    interp: &mut Interpreter,
    scope: &Environment,
) -> Result<(), EvalError> {
    match attribute {
        Node::Variable(name) => scope.declare(name.as_str(), Value::Nil, false)?,
        Node::ExprStmt(inner) => declare_attribute(inner, interp, scope)?,
        Node::Assign(assign) => match assign.target.as_ref() {
            Node::Variable(name) => {
                let value = assign.value.eval(interp, scope)?;
                scope.declare(name.as_str(), value, false)?;
            }
            _ => {
                attribute.eval(interp, scope)?;
            }
        },
        other => {
            other.eval(interp, scope)?;
        }
    }
    Ok(())
}

impl Evaluate for Spawn {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let blueprint = match self.blueprint.eval(interp, env)? {
            Value::Blueprint(blueprint) => blueprint,
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "cannot spawn from {}",
                    other.type_name()
                )))
            }
        };

        let instance = Instance::spawn(&blueprint);
        tracing::debug!(blueprint = %blueprint.name, fields = instance.scope.len(), "spawn");

        if let Some(constructor) = &blueprint.constructor {
            let expected = constructor.params.len().saturating_sub(1);
            if self.args.len() != expected {
                // The instance is still produced, just not initialised.
                interp.report(&EvalError::Arity {
                    name: blueprint.name.clone(),
                    expected,
                    got: self.args.len(),
                })?;
            } else {
                let args = eval_args(&self.args, interp, env)?;
                call_with_receiver(
                    interp,
                    &instance,
                    &blueprint.name,
                    &constructor.params,
                    &constructor.body,
                    args,
                )?;
            }
        }

        Ok(Value::Instance(instance))
    }
}

impl Evaluate for Adopt {
    fn eval(&self, _interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let child = lookup_blueprint(&self.child, env)?;
        let parent = lookup_blueprint(&self.parent, env)?;

        tracing::debug!(child = %child.name, parent = %parent.name, "adopt");
        child.scope.copy_bindings_from(&parent.scope)?;
        Ok(Value::Nil)
    }
}

fn lookup_blueprint(name: &str, env: &Environment) -> Result<Rc<BlueprintValue>, EvalError> {
    match env.lookup(name) {
        Some(Value::Blueprint(blueprint)) => Ok(blueprint),
        Some(other) => Err(EvalError::type_mismatch(format!(
            "`{}` is a {}, not a Blueprint",
            name,
            other.type_name()
        ))),
        None => Err(EvalError::Lookup {
            what: "blueprint",
            name: name.to_string(),
        }),
    }
}

impl Evaluate for AttributeAccess {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let found = match self.object.eval(interp, env)? {
            Value::Instance(instance) => instance.attribute(&self.attribute),
            Value::Toolkit(toolkit) => toolkit.exports.get_local(&self.attribute),
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "cannot read attribute `{}` of {}",
                    self.attribute,
                    other.type_name()
                )))
            }
        };

        found.ok_or_else(|| EvalError::Lookup {
            what: "attribute",
            name: self.attribute.clone(),
        })
    }
}
