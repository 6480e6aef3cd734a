//! Runtime environment managing variable bindings

mod scope;

pub use scope::{Binding, ScopeKind};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::error::EnvironmentError;
use crate::value::Value;

/// Name under which an instance scope answers with its owner.
pub const SELF_NAME: &str = "self";

struct Scope {
    /// Bindings in declaration order
    bindings: IndexMap<String, Binding>,

    /// Enclosing scope. Held weakly: objects stored in a scope own scopes
    /// whose parent is that same scope, so strong parents would form cycles.
    parent: Option<Weak<RefCell<Scope>>>,

    /// Nearest enclosing scope that is not a call or block frame. Lookup
    /// resumes here once `parent` has been released.
    outer: Option<Weak<RefCell<Scope>>>,

    /// Top of the chain, normally the global scope.
    root: Option<Weak<RefCell<Scope>>>,

    kind: ScopeKind,
}

/// A handle to one scope in a chain of lexical scopes.
///
/// Cloning the handle aliases the scope. A scope lives as long as some
/// handle to it does: the interpreter holds the global scope, the
/// evaluator holds call and block scopes for the duration of the
/// construct, and object values hold their own scopes.
///
/// # Example
///
/// ```
/// use beacon::{Environment, ScopeKind, Value};
///
/// let global = Environment::global();
/// global.declare("x", Value::Number(1.0), false).unwrap();
///
/// let inner = global.child(ScopeKind::Block);
/// inner.assign("x", Value::Number(2.0)).unwrap(); // mutates global x
/// inner.assign("y", Value::Number(3.0)).unwrap(); // creates y in inner
///
/// assert_eq!(global.lookup("x"), Some(Value::Number(2.0)));
/// assert_eq!(global.lookup("y"), None);
/// assert_eq!(inner.lookup("y"), Some(Value::Number(3.0)));
/// ```
#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::global()
    }
}

impl Environment {
    /// Create a parentless scope of the given kind.
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Scope {
                bindings: IndexMap::new(),
                parent: None,
                outer: None,
                root: None,
                kind,
            })),
        }
    }

    /// Create a fresh global scope.
    pub fn global() -> Self {
        Self::new(ScopeKind::Global)
    }

    /// Create a child scope whose parent is `self`.
    pub fn child(&self, kind: ScopeKind) -> Self {
        let this = self.inner.borrow();
        let outer = if this.kind.is_frame() {
            this.outer.clone()
        } else {
            Some(Rc::downgrade(&self.inner))
        };
        let root = this
            .root
            .clone()
            .or_else(|| Some(Rc::downgrade(&self.inner)));
        Self {
            inner: Rc::new(RefCell::new(Scope {
                bindings: IndexMap::new(),
                parent: Some(Rc::downgrade(&self.inner)),
                outer,
                root,
                kind,
            })),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Chain Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The enclosing scope.
    ///
    /// A blueprint, toolkit or bridge scope can outlive the frame that
    /// declared it. Once that frame is gone the chain continues at the
    /// nearest surviving non-frame ancestor, then at the root.
    pub fn parent(&self) -> Option<Environment> {
        let scope = self.inner.borrow();
        let enclosing = [&scope.parent, &scope.outer, &scope.root]
            .into_iter()
            .flatten()
            .find_map(Weak::upgrade);
        enclosing.map(|inner| Environment { inner })
    }

    /// The kind tag of this scope.
    pub fn kind(&self) -> ScopeKind {
        self.inner.borrow().kind.clone()
    }

    /// Whether two handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Weak handle, for checking release timing.
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The exports scope of the nearest enclosing toolkit, if any.
    pub fn nearest_toolkit_exports(&self) -> Option<Environment> {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            if let ScopeKind::Toolkit { exports } = &scope.inner.borrow().kind {
                return Some(exports.clone());
            }
            current = scope.parent();
        }
        None
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a name in this scope only.
    ///
    /// Returns a copy of the stored value. An instance scope also answers
    /// `self` with its owner.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        let scope = self.inner.borrow();
        if let Some(binding) = scope.bindings.get(name) {
            return Some(binding.value.clone());
        }
        match &scope.kind {
            ScopeKind::Instance(owner) if name == SELF_NAME => {
                owner.upgrade().map(Value::Instance)
            }
            _ => None,
        }
    }

    /// Look up a name, walking from this scope outward.
    ///
    /// Returns an independent copy for value kinds and an alias for
    /// reference kinds; the binding itself is never handed out.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            if let Some(value) = scope.get_local(name) {
                return Some(value);
            }
            current = scope.parent();
        }
        None
    }

    /// Whether a name resolves anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Whether a name is bound in this scope itself.
    pub fn contains_local(&self, name: &str) -> bool {
        self.inner.borrow().bindings.contains_key(name)
    }

    /// Whether a name is bound as a constant in this scope.
    pub fn is_constant(&self, name: &str) -> bool {
        self.inner
            .borrow()
            .bindings
            .get(name)
            .map(|b| b.constant)
            .unwrap_or(false)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declaration and Assignment
    // ═══════════════════════════════════════════════════════════════════

    /// Bind a name in this scope.
    ///
    /// Overwrites an existing mutable binding (and takes on the new
    /// constant flag); appends a new binding otherwise.
    ///
    /// # Errors
    ///
    /// `ConstAssign` if the name is already a constant in this scope. The
    /// stored value is left unchanged.
    pub fn declare(
        &self,
        name: impl Into<String>,
        value: Value,
        constant: bool,
    ) -> Result<(), EnvironmentError> {
        let name = name.into();
        let mut scope = self.inner.borrow_mut();
        match scope.bindings.get_mut(&name) {
            Some(existing) if existing.constant => Err(EnvironmentError::ConstAssign { name }),
            Some(existing) => {
                existing.value = value;
                existing.constant = constant;
                Ok(())
            }
            None => {
                scope.bindings.insert(name, Binding { value, constant });
                Ok(())
            }
        }
    }

    /// Assign to the nearest existing binding of `name`.
    ///
    /// If the name is not bound anywhere in the chain it is declared in
    /// this scope.
    ///
    /// # Errors
    ///
    /// `ConstAssign` if the nearest binding is a constant.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EnvironmentError> {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            {
                let mut inner = scope.inner.borrow_mut();
                if let Some(existing) = inner.bindings.get_mut(name) {
                    if existing.constant {
                        return Err(EnvironmentError::ConstAssign {
                            name: name.to_string(),
                        });
                    }
                    existing.value = value;
                    return Ok(());
                }
            }
            current = scope.parent();
        }
        self.declare(name, value, false)
    }

    /// Declare every binding of `source` into this scope, in order.
    ///
    /// Constant flags travel with the values. Names that are constant here
    /// already are skipped; the first such name is reported.
    pub fn copy_bindings_from(&self, source: &Environment) -> Result<(), EnvironmentError> {
        let snapshot: Vec<(String, Binding)> = source
            .inner
            .borrow()
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.clone()))
            .collect();

        let mut first_error = None;
        for (name, binding) in snapshot {
            if let Err(err) = self.declare(name, binding.value, binding.constant) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Snapshot of this scope's bindings, in declaration order.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.value.clone()))
            .collect()
    }

    /// Names bound in this scope, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().bindings.keys().cloned().collect()
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.inner.borrow().bindings.len()
    }

    /// Whether this scope has no bindings.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().bindings.is_empty()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are left out: instance scopes can reach themselves.
        match self.inner.try_borrow() {
            Ok(scope) => f
                .debug_struct("Environment")
                .field("kind", &scope.kind)
                .field("names", &scope.bindings.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => f.write_str("Environment { <borrowed> }"),
        }
    }
}

/// A non-owning handle to a scope.
#[derive(Clone)]
pub struct WeakEnvironment {
    inner: Weak<RefCell<Scope>>,
}

impl WeakEnvironment {
    /// Upgrade if the scope is still alive.
    pub fn upgrade(&self) -> Option<Environment> {
        self.inner.upgrade().map(|inner| Environment { inner })
    }

    /// Whether the scope has been released.
    pub fn is_released(&self) -> bool {
        self.inner.strong_count() == 0
    }
}

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakEnvironment(released: {})", self.is_released())
    }
}
