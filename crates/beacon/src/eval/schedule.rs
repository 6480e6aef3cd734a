//! `paral` / `hold` task queue and `listen` / `signal` events

use std::rc::Rc;

use crate::ast::Node;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::events::Handler;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::exec_block;

/// Queue the body for the next `hold`.
pub fn eval_paral(body: &Rc<[Node]>, interp: &mut Interpreter) -> Result<Value, EvalError> {
    interp.tasks.enqueue(Rc::clone(body));
    Ok(Value::Nil)
}

/// Drain the queue in enqueue order, then run the body.
///
/// Tasks queued while draining wait for the next `hold`.
pub fn eval_hold(
    body: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let tasks = interp.tasks.take_all();
    tracing::debug!(tasks = tasks.len(), "hold: draining");

    for task in tasks {
        exec_block(&task, interp, env)?;
    }
    exec_block(body, interp, env)?;
    Ok(Value::Nil)
}

/// Register the body under its leading event name.
///
/// Without an event name the body runs immediately.
pub fn eval_listen(
    body: &Rc<[Node]>,
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    match event_name(body) {
        Some(event) => interp.events.register(event, Handler::new(Rc::clone(body), 1)),
        None => exec_block(body, interp, env)?,
    }
    Ok(Value::Nil)
}

/// Run every handler for the leading event name, in registration order,
/// then the rest of the body.
pub fn eval_signal(
    body: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let Some(event) = event_name(body) else {
        exec_block(body, interp, env)?;
        return Ok(Value::Nil);
    };

    let handlers = interp.events.handlers(event);
    tracing::debug!(event, handlers = handlers.len(), "signal");

    for handler in &handlers {
        exec_block(handler.statements(), interp, env)?;
    }
    exec_block(&body[1..], interp, env)?;
    Ok(Value::Nil)
}

fn event_name(body: &[Node]) -> Option<&str> {
    body.first().and_then(Node::as_string_literal)
}
