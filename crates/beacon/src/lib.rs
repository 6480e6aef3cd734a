//! # Beacon
//!
//! A tree-walking interpreter for the Beacon scripting language.
//!
//! Beacon consumes an already-parsed syntax tree ([`Node`]) and executes it
//! directly. Parsing, file loading and the command-line driver live
//! outside this crate; `bring` reaches them through a [`ModuleLoader`].
//!
//! ## Architecture
//!
//! - **Values**: plain data is copied, objects (blueprints, instances,
//!   toolkits, bridges) and functions are shared by reference count
//! - **Environment**: a chain of scopes with constant bindings and
//!   declaration on first assignment
//! - **Evaluator**: one [`Evaluate`] implementation per node family;
//!   recoverable faults become a diagnostic line and `Nil`
//! - **Interpreter**: owns the per-run state (task queue, event
//!   registry, streams, call depth)
//!
//! ## Example
//!
//! ```
//! use beacon::{CaptureBuffer, FunctionDecl, Interpreter, Node};
//!
//! let out = CaptureBuffer::new();
//! let mut interp = Interpreter::new().with_output(out.clone());
//!
//! let add = FunctionDecl::new(
//!     "add",
//!     &["a", "b"],
//!     vec![Node::back(Node::binary(Node::var("a"), "+", Node::var("b")))],
//! );
//! let program = Node::program(vec![
//!     Node::function(add),
//!     Node::show(vec![Node::call("add", vec![Node::number(2.0), Node::number(3.0)])]),
//! ]);
//!
//! interp.run(&program).unwrap();
//! assert_eq!(out.contents(), "5\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod events;
pub mod interpreter;
pub mod io;
pub mod loader;
pub mod stack;
pub mod tasks;
pub mod value;

// Re-export main types
pub use ast::{Attempt, BlueprintDecl, FunctionDecl, Node};
pub use context::{EvalContext, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{Binding, Environment, ScopeKind, WeakEnvironment};
pub use error::{EnvironmentError, EvalError, Result};
pub use eval::{exec_block, ControlFlow, Evaluate};
pub use interpreter::Interpreter;
pub use io::CaptureBuffer;
pub use loader::{MemoryLoader, ModuleLoader};
pub use value::{BlueprintValue, BridgeValue, Instance, ToolkitValue, Value};

/// Beacon version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
