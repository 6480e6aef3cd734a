//! Scope records: bindings and scope-kind tags

use std::fmt;
use std::rc::Weak;

use crate::value::{Instance, Value};

use super::Environment;

/// A single variable binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value
    pub value: Value,

    /// Whether this binding was declared with `firm`
    pub constant: bool,
}

impl Binding {
    /// Mutable binding.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            constant: false,
        }
    }
}

/// What kind of construct a scope belongs to.
///
/// The tag replaces any positional convention for finding enclosing
/// constructs: `expose` walks outward to the nearest `Toolkit` scope, and
/// an `Instance` scope answers `self` for its owner.
#[derive(Clone)]
pub enum ScopeKind {
    /// Program root
    Global,
    /// `embed`, loop bodies, `attempt`/`trap` bodies
    Block,
    /// Function call frame
    Function,
    /// Method or constructor call frame
    Method,
    /// A blueprint's defining scope
    Blueprint,
    /// An instance's field scope; resolves `self` to its owner
    Instance(Weak<Instance>),
    /// A toolkit's internal scope, holding its exports scope
    Toolkit {
        /// Exports of this toolkit (a parentless scope)
        exports: Environment,
    },
    /// A toolkit's exports scope
    Exports,
    /// A bridge's scope
    Bridge,
}

impl ScopeKind {
    /// Short name for diagnostics and tracing.
    pub fn name(&self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Block => "block",
            ScopeKind::Function => "function",
            ScopeKind::Method => "method",
            ScopeKind::Blueprint => "blueprint",
            ScopeKind::Instance(_) => "instance",
            ScopeKind::Toolkit { .. } => "toolkit",
            ScopeKind::Exports => "exports",
            ScopeKind::Bridge => "bridge",
        }
    }

    /// Whether the scope lives only while its construct runs.
    pub fn is_frame(&self) -> bool {
        matches!(self, ScopeKind::Block | ScopeKind::Function | ScopeKind::Method)
    }
}

impl fmt::Debug for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for ScopeKind {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}
