//! Error types for Beacon evaluation
//!
//! Runtime faults fall into two groups. The *recoverable* ones (lookup,
//! arity, constant writes, type mismatches, malformed operators and type
//! names) are reported as a diagnostic and replaced by `Nil` at the node
//! that raised them. The rest travel up the Rust call stack through
//! `Result`: control flow (`back`, `halt`, `proceed`), a `trigger`ed error
//! looking for its `attempt`, and conditions that end the whole run.

use thiserror::Error;

use crate::eval::ControlFlow;

/// Errors produced by the environment itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    /// Attempt to overwrite a `firm` binding
    #[error("cannot assign to constant `{name}`")]
    ConstAssign {
        /// The constant's name
        name: String,
    },
}

/// Main error type for evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Undefined variable, method or attribute
    #[error("undefined {what} `{name}`")]
    Lookup {
        /// What was being looked up ("variable", "method", ...)
        what: &'static str,
        /// The missing name
        name: String,
    },

    /// Call, method or constructor argument-count mismatch
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    Arity {
        /// Callee name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Write to a constant binding
    #[error("cannot assign to constant `{name}`")]
    ConstAssign {
        /// The constant's name
        name: String,
    },

    /// Operation applied to the wrong kind of value
    #[error("{message}")]
    TypeMismatch {
        /// Description of the mismatch
        message: String,
    },

    /// Operator symbol not understood (malformed AST)
    #[error("unknown operator `{op}`")]
    UnknownOperator {
        /// The offending symbol
        op: String,
    },

    /// Type name not understood (malformed AST or bad `is` operand)
    #[error("unknown type name `{name}`")]
    UnknownTypeName {
        /// The offending name
        name: String,
    },

    /// Call depth limit exceeded
    #[error("call depth {depth} exceeds the limit of {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A `bring` could not be satisfied
    #[error("cannot bring `{path}`: {message}")]
    Load {
        /// Requested source path
        path: String,
        /// Why loading failed
        message: String,
    },

    /// A `trigger`ed error on its way to the nearest `attempt`
    #[error("{name}: {message}")]
    Raised {
        /// Error name given to `trigger`
        name: String,
        /// Error message given to `trigger`
        message: String,
    },

    /// Non-local control flow (`back`, `halt`, `proceed`)
    #[error("control flow outside of its construct: {0:?}")]
    ControlFlow(ControlFlow),

    /// Evaluation was interrupted through the context flag
    #[error("evaluation interrupted")]
    Interrupted,

    /// Writing program output or reading input failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl EvalError {
    /// Build a type-mismatch error from any message.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        EvalError::TypeMismatch {
            message: message.into(),
        }
    }

    /// Build an undefined-variable error.
    pub fn undefined(name: impl Into<String>) -> Self {
        EvalError::Lookup {
            what: "variable",
            name: name.into(),
        }
    }

    /// Whether the evaluator logs this error and substitutes `Nil`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EvalError::Lookup { .. }
                | EvalError::Arity { .. }
                | EvalError::ConstAssign { .. }
                | EvalError::TypeMismatch { .. }
                | EvalError::UnknownOperator { .. }
                | EvalError::UnknownTypeName { .. }
                | EvalError::StackOverflow { .. }
                | EvalError::Load { .. }
        )
    }

    /// Taxonomy name used as the diagnostic prefix.
    pub fn category(&self) -> &'static str {
        match self {
            EvalError::Lookup { .. } => "LookupError",
            EvalError::Arity { .. } => "ArityError",
            EvalError::ConstAssign { .. } => "ConstAssignError",
            EvalError::TypeMismatch { .. } => "TypeMismatchError",
            EvalError::UnknownOperator { .. } => "UnknownOperatorError",
            EvalError::UnknownTypeName { .. } => "UnknownTypeNameError",
            EvalError::StackOverflow { .. } => "StackOverflowError",
            EvalError::Load { .. } => "LoadError",
            EvalError::Raised { .. } => "UncaughtError",
            EvalError::ControlFlow(_) => "ControlFlowError",
            EvalError::Interrupted => "Interrupted",
            EvalError::Io(_) => "IoError",
        }
    }
}

impl From<EnvironmentError> for EvalError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::ConstAssign { name } => EvalError::ConstAssign { name },
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        EvalError::Io(err.to_string())
    }
}

/// Result type alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;
