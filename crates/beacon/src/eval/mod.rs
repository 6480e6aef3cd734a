//! Node evaluation

pub mod attempt;
pub mod binary;
pub mod call;
pub mod conditional;
pub mod control;
pub mod function;
pub mod literal;
pub mod loops;
pub mod module;
pub mod object;
pub mod schedule;
pub mod text;
pub mod unary;
pub mod variable;

use crate::ast::Node;
use crate::environment::{Environment, ScopeKind};
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter. The
/// `Node` implementation dispatches to one implementation per node family.
pub trait Evaluate {
    /// Evaluate this node in the given scope.
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Node Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Node {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        interp.check_interrupt()?;

        if interp.tracing_enabled() {
            tracing::trace!(node = self.kind_name(), scope = env.kind().name(), "eval");
        }

        // Recoverable faults stop at the node that raised them.
        match ensure_sufficient_stack(|| dispatch(self, interp, env)) {
            Err(err) if err.is_recoverable() => {
                interp.report(&err)?;
                Ok(Value::Nil)
            }
            other => other,
        }
    }
}

fn dispatch(node: &Node, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
    match node {
        Node::Program(statements) => exec_block(statements, interp, env).map(|_| Value::Nil),

        // Literals
        Node::Number(n) => Ok(Value::Number(*n)),
        Node::String(s) => Ok(Value::string(s.as_str())),
        Node::Bool(b) => Ok(Value::Bool(*b)),
        Node::Nil => Ok(Value::Nil),
        Node::Interpolated(parts) => literal::eval_interpolated(parts, interp, env),
        Node::Pack(items) => literal::eval_pack(items, interp, env),
        Node::TypeName(name) => Ok(Value::string(name.as_str())),
        Node::Docstring(_) => Ok(Value::Nil),

        // Operators
        Node::Binary(expr) => expr.eval(interp, env),
        Node::Unary(expr) => expr.eval(interp, env),
        Node::Kind(expr) => text::eval_kind(expr, interp, env),
        Node::Convert(expr) => expr.eval(interp, env),

        // Variables
        Node::Variable(name) => variable::lookup_variable(name, env),
        Node::Assign(assign) => assign.eval(interp, env),
        Node::ConstDecl(decl) => decl.eval(interp, env),
        Node::Nick(nick) => nick.eval(interp, env),

        // Statements
        Node::Show(items) => text::eval_show(items, interp, env),
        Node::ExprStmt(expr) => expr.eval(interp, env),
        Node::Embed(body) => {
            let scope = env.child(ScopeKind::Block);
            exec_block(body, interp, &scope).map(|_| Value::Nil)
        }
        Node::Ask(statements) => text::eval_ask(statements, interp, env),
        Node::Wait(_) => Ok(Value::Nil),

        // Functions
        Node::FunctionDecl(decl) => function::declare_function(decl, env),
        Node::Return(value) => control::eval_return(value.as_deref(), interp, env),
        Node::Call(call) => call.eval(interp, env),
        Node::MethodCall(call) => call.eval(interp, env),

        // Control flow
        Node::Check(check) => check.eval(interp, env),
        Node::Traverse(traverse) => traverse.eval(interp, env),
        Node::Each(each) => each.eval(interp, env),
        Node::Until(until) => until.eval(interp, env),
        Node::Halt => Err(EvalError::ControlFlow(ControlFlow::Halt)),
        Node::Proceed => Err(EvalError::ControlFlow(ControlFlow::Proceed)),

        // Objects
        Node::Blueprint(decl) => decl.eval(interp, env),
        Node::Spawn(spawn) => spawn.eval(interp, env),
        Node::Adopt(adopt) => adopt.eval(interp, env),
        Node::Attribute(access) => access.eval(interp, env),

        // Modules
        Node::Toolkit(decl) => decl.eval(interp, env),
        Node::Plug(plug) => plug.eval(interp, env),
        Node::Expose(name) => module::expose(name, env),
        Node::Bridge(decl) => decl.eval(interp, env),
        Node::Inlet(body) => exec_block(body, interp, env).map(|_| Value::Nil),
        Node::Link(link) => link.eval(interp, env),
        Node::Bring(bring) => bring.eval(interp, env),

        // Errors
        Node::Attempt(attempt) => attempt.eval(interp, env),
        Node::Trigger(trigger) => trigger.eval(interp, env),

        // Scheduling
        Node::Paral(body) => schedule::eval_paral(body, interp),
        Node::Hold(body) => schedule::eval_hold(body, interp, env),
        Node::Signal(body) => schedule::eval_signal(body, interp, env),
        Node::Listen(body) => schedule::eval_listen(body, interp, env),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Run statements in order in `env`, discarding their values.
///
/// Stops at the first error that is not recovered locally.
pub fn exec_block(
    statements: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<(), EvalError> {
    for stmt in statements {
        stmt.eval(interp, env)?;
    }
    Ok(())
}

/// Evaluate argument expressions left to right.
pub fn eval_args(
    args: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Vec<Value>, EvalError> {
    args.iter().map(|arg| arg.eval(interp, env)).collect()
}

// Re-export for use by other modules
pub use control::ControlFlow;
