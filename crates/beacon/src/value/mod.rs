//! Value representation for runtime values

mod display;
mod impls;
mod object;

pub use impls::TYPE_NAMES;
pub use object::{BlueprintValue, BridgeValue, Instance, ToolkitValue};

use std::rc::Rc;

use crate::ast::FunctionDecl;

/// Runtime value representation for the Beacon interpreter.
///
/// The copy discipline is carried by `Clone`:
/// - Plain data (`Nil`, `Bool`, `Number`, `Range`) and `String` are
///   value types; a clone is fully independent of its source.
/// - `Function` and the object kinds (`Blueprint`, `Instance`, `Toolkit`,
///   `Bridge`) are reference types; a clone aliases the same declaration or
///   scope, so a write through one alias is visible through every other.
///
/// Objects are reference counted. A scope owned by an object is released
/// when the last value pointing at that object is dropped.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Value types
    // ═══════════════════════════════════════════════════════════════════
    /// Absence of a value
    Nil,

    /// `On` / `Off`
    Bool(bool),

    /// Double-precision number
    Number(f64),

    /// Owned text
    String(String),

    /// Inclusive numeric bounds produced by `..`
    Range(f64, f64),

    // ═══════════════════════════════════════════════════════════════════
    // Reference types
    // ═══════════════════════════════════════════════════════════════════
    /// A declared function (named or anonymous)
    Function(Rc<FunctionDecl>),

    /// Class-like template
    Blueprint(Rc<BlueprintValue>),

    /// Object spawned from a blueprint
    Instance(Rc<Instance>),

    /// Namespace with explicit exports
    Toolkit(Rc<ToolkitValue>),

    /// Foreign-boundary placeholder
    Bridge(Rc<BridgeValue>),
}
