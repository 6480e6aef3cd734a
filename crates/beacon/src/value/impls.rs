//! Value trait implementations: constructors, predicates, extractors, PartialEq

use std::rc::Rc;

use super::*;

/// Every name `kind` can produce, and so every name `is` accepts.
pub const TYPE_NAMES: &[&str] = &[
    "Nil",
    "Bool",
    "Num",
    "Text",
    "Range",
    "Spec",
    "Blueprint",
    "Instance",
    "Toolkit",
    "Bridge",
];

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is `Nil`
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if value is a reference (object or function) kind
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Value::Function(_)
                | Value::Blueprint(_)
                | Value::Instance(_)
                | Value::Toolkit(_)
                | Value::Bridge(_)
        )
    }

    /// Runtime type name, as reported by `kind`.
    ///
    /// Both `On` and `Off` report `Bool`. The literal spellings are values,
    /// not type names, so `x is "On"` fails with `UnknownTypeNameError`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Num",
            Value::String(_) => "Text",
            Value::Range(..) => "Range",
            Value::Function(_) => "Spec",
            Value::Blueprint(_) => "Blueprint",
            Value::Instance(_) => "Instance",
            Value::Toolkit(_) => "Toolkit",
            Value::Bridge(_) => "Bridge",
        }
    }

    /// Truthiness: `Nil` and `Off` are false, numbers are true when
    /// non-zero, text when non-empty, everything else is true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract an instance
    pub fn as_instance(&self) -> Option<&Rc<Instance>> {
        match self {
            Value::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// Extract a blueprint
    pub fn as_blueprint(&self) -> Option<&Rc<BlueprintValue>> {
        match self {
            Value::Blueprint(bp) => Some(bp),
            _ => None,
        }
    }

    /// Extract a toolkit
    pub fn as_toolkit(&self) -> Option<&Rc<ToolkitValue>> {
        match self {
            Value::Toolkit(tk) => Some(tk),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Typed equality, as used by `==` and `'=`.
///
/// Values of different kinds are never equal. Data compares by payload;
/// reference kinds are equal only when they alias the same object.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Range(a1, a2), Value::Range(b1, b2)) => a1 == b1 && a2 == b2,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Blueprint(a), Value::Blueprint(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Toolkit(a), Value::Toolkit(b)) => Rc::ptr_eq(a, b),
            (Value::Bridge(a), Value::Bridge(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
