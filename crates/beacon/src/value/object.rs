//! Object values: blueprints, instances, toolkits and bridges

use std::rc::Rc;

use crate::ast::ConstructorDecl;
use crate::environment::{Environment, ScopeKind};

use super::Value;

/// A blueprint: its defining scope plus an optional constructor.
///
/// The scope holds the attribute defaults and the methods. It is shared
/// by every instance spawned from the blueprint.
#[derive(Debug)]
pub struct BlueprintValue {
    /// Declared name
    pub name: String,
    /// Attribute and method bindings
    pub scope: Environment,
    /// Constructor declaration, referenced from the AST
    pub constructor: Option<Rc<ConstructorDecl>>,
}

/// An object spawned from a blueprint.
///
/// The instance owns its field scope and keeps its blueprint alive. The
/// field scope refers back to the instance only weakly (that is how `self`
/// resolves), so dropping the last `Value::Instance` frees both.
#[derive(Debug)]
pub struct Instance {
    /// Blueprint this instance was spawned from
    pub blueprint: Rc<BlueprintValue>,
    /// Per-instance fields
    pub scope: Environment,
}

impl Instance {
    /// Spawn a new instance whose fields start as copies of the blueprint's
    /// bindings.
    pub fn spawn(blueprint: &Rc<BlueprintValue>) -> Rc<Instance> {
        Rc::new_cyclic(|this| {
            let scope = blueprint.scope.child(ScopeKind::Instance(this.clone()));
            // A fresh scope holds no constants, so the copy cannot collide.
            let _ = scope.copy_bindings_from(&blueprint.scope);
            Instance {
                blueprint: Rc::clone(blueprint),
                scope,
            }
        })
    }

    /// Blueprint name, for display.
    pub fn blueprint_name(&self) -> &str {
        &self.blueprint.name
    }

    /// Read a field, falling back to the blueprint's own bindings.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.scope
            .get_local(name)
            .or_else(|| self.blueprint.scope.get_local(name))
    }

    /// Resolve a method: the blueprint's bindings first, then the fields.
    pub fn method(&self, name: &str) -> Option<Value> {
        match self.blueprint.scope.get_local(name) {
            Some(found @ Value::Function(_)) => Some(found),
            _ => self.scope.get_local(name),
        }
    }
}

/// A toolkit: internal scope plus a separate exports scope.
#[derive(Debug)]
pub struct ToolkitValue {
    /// Declared name
    pub name: String,
    /// Everything the toolkit body declared
    pub scope: Environment,
    /// Only what was exposed; has no parent
    pub exports: Environment,
}

/// A bridge: an inert scope holder.
#[derive(Debug)]
pub struct BridgeValue {
    /// Declared name
    pub name: String,
    /// Bindings declared in the bridge body
    pub scope: Environment,
}
