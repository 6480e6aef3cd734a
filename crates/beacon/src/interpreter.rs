//! Interpreter session: the state a running program owns

use std::io::{BufRead, Write};

use crate::ast::Node;
use crate::context::EvalContext;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::eval::Evaluate;
use crate::events::EventBus;
use crate::io::Io;
use crate::loader::ModuleLoader;
use crate::tasks::TaskQueue;
use crate::value::Value;

/// One independent interpreter.
///
/// Everything a program can observe or mutate besides its scopes (the
/// `paral` queue, the `listen` registry, the streams, the call depth)
/// lives here, so two interpreters never interfere.
///
/// # Example
///
/// ```
/// use beacon::{CaptureBuffer, Interpreter, Node};
///
/// let out = CaptureBuffer::new();
/// let mut interp = Interpreter::new().with_output(out.clone());
/// interp
///     .run(&Node::program(vec![Node::show(vec![Node::binary(
///         Node::number(2.0),
///         "+",
///         Node::number(3.0),
///     )])]))
///     .unwrap();
/// assert_eq!(out.contents(), "5\n");
/// ```
pub struct Interpreter {
    ctx: EvalContext,
    globals: Environment,
    pub(crate) tasks: TaskQueue,
    pub(crate) events: EventBus,
    pub(crate) io: Io,
    loader: Option<Box<dyn ModuleLoader>>,
    call_depth: usize,
    bringing: Vec<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter on the process streams with a fresh global scope.
    pub fn new() -> Self {
        Self {
            ctx: EvalContext::default(),
            globals: Environment::global(),
            tasks: TaskQueue::new(),
            events: EventBus::new(),
            io: Io::default(),
            loader: None,
            call_depth: 0,
            bringing: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Configuration
    // ═══════════════════════════════════════════════════════════════════

    /// Use the given evaluation context.
    pub fn with_context(mut self, ctx: EvalContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Send program output to `out`.
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.io.set_output(out);
        self
    }

    /// Send diagnostics to `err`.
    pub fn with_diagnostics(mut self, err: impl Write + 'static) -> Self {
        self.io.set_diagnostics(err);
        self
    }

    /// Read `ask` input from `input`.
    pub fn with_input(mut self, input: impl BufRead + 'static) -> Self {
        self.io.set_input(input);
        self
    }

    /// Resolve `bring` through `loader`.
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// The interpreter's own global scope.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Number of `paral` tasks waiting for a `hold`.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Number of handlers registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.events.listener_count(event)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Entry Points
    // ═══════════════════════════════════════════════════════════════════

    /// Run a program in the interpreter's global scope.
    pub fn run(&mut self, program: &Node) -> Result<(), EvalError> {
        let globals = self.globals.clone();
        self.run_in(program, &globals)
    }

    /// Run a program in a caller-supplied global scope.
    ///
    /// Top-level statements run in order and their values are discarded.
    /// A triggered error nobody trapped is reported and the next statement
    /// runs. Only interruption and stream failures stop the run.
    pub fn run_in(&mut self, program: &Node, globals: &Environment) -> Result<(), EvalError> {
        let statements = match program {
            Node::Program(statements) => statements.as_slice(),
            other => std::slice::from_ref(other),
        };

        for stmt in statements {
            match stmt.eval(self, globals) {
                Ok(_) => {}
                Err(err @ EvalError::Raised { .. }) => self.report(&err)?,
                Err(EvalError::ControlFlow(flow)) => {
                    tracing::debug!(?flow, "control flow reached top level");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Evaluate a single node and return its value.
    ///
    /// Recoverable faults are reported and yield `Nil`; anything else,
    /// including an untrapped `trigger`, is returned as the error.
    pub fn eval(&mut self, node: &Node, env: &Environment) -> Result<Value, EvalError> {
        node.eval(self, env)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluator Support
    // ═══════════════════════════════════════════════════════════════════

    /// Write a diagnostic line for `err`.
    pub(crate) fn report(&mut self, err: &EvalError) -> Result<(), EvalError> {
        tracing::debug!(category = err.category(), %err, "runtime fault");
        let line = format!("{}: {}", err.category(), err);
        self.io.diagnostic(&line)
    }

    pub(crate) fn check_interrupt(&self) -> Result<(), EvalError> {
        if self.ctx.is_interrupted() {
            Err(EvalError::Interrupted)
        } else {
            Ok(())
        }
    }

    pub(crate) fn tracing_enabled(&self) -> bool {
        self.ctx.trace
    }

    /// Enter a call frame. Fails once the configured depth is reached.
    pub(crate) fn enter_call(&mut self) -> Result<(), EvalError> {
        if self.call_depth >= self.ctx.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.call_depth,
                max: self.ctx.max_call_depth,
            });
        }
        self.call_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    pub(crate) fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Load a module for `bring`, guarding against import cycles.
    ///
    /// On success the path stays marked as in progress until
    /// [`finish_bring`](Self::finish_bring).
    pub(crate) fn start_bring(&mut self, path: &str) -> Result<Vec<Node>, EvalError> {
        if self.bringing.iter().any(|p| p == path) {
            return Err(EvalError::Load {
                path: path.to_string(),
                message: "module is already being brought".to_string(),
            });
        }
        let loader = self.loader.as_ref().ok_or_else(|| EvalError::Load {
            path: path.to_string(),
            message: "no module loader configured".to_string(),
        })?;
        let statements = loader.load(path).map_err(|err| EvalError::Load {
            path: path.to_string(),
            message: format!("{:#}", err),
        })?;
        self.bringing.push(path.to_string());
        Ok(statements)
    }

    pub(crate) fn finish_bring(&mut self) {
        self.bringing.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CaptureBuffer;

    #[test]
    fn test_run_reports_untrapped_trigger_and_continues() {
        let out = CaptureBuffer::new();
        let err = CaptureBuffer::new();
        let mut interp = Interpreter::new()
            .with_output(out.clone())
            .with_diagnostics(err.clone());
        interp
            .run(&Node::program(vec![
                Node::trigger("Boom", "it broke"),
                Node::show(vec![Node::string("after")]),
            ]))
            .unwrap();
        assert_eq!(out.contents(), "after\n");
        assert_eq!(err.contents(), "UncaughtError: Boom: it broke\n");
    }

    #[test]
    fn test_interrupt_aborts_run() {
        let ctx = EvalContext::default();
        ctx.interrupt();
        let mut interp = Interpreter::new().with_context(ctx);
        let result = interp.run(&Node::program(vec![Node::number(1.0)]));
        assert_eq!(result, Err(EvalError::Interrupted));
    }

    #[test]
    fn test_call_depth_guard() {
        let mut interp = Interpreter::new().with_context(EvalContext::with_max_call_depth(1));
        interp.enter_call().unwrap();
        assert!(matches!(
            interp.enter_call(),
            Err(EvalError::StackOverflow { depth: 1, max: 1 })
        ));
        interp.exit_call();
        assert_eq!(interp.call_depth(), 0);
    }
}
