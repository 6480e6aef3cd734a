//! Named-event registry behind `listen` / `signal`

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::Node;

/// A registered handler: the `listen` body minus its event-name statement.
#[derive(Debug, Clone)]
pub struct Handler {
    body: Rc<[Node]>,
    start: usize,
}

impl Handler {
    /// Handler running `body[start..]`.
    pub fn new(body: Rc<[Node]>, start: usize) -> Self {
        Self { body, start }
    }

    /// The statements to run.
    pub fn statements(&self) -> &[Node] {
        self.body.get(self.start..).unwrap_or(&[])
    }
}

/// Handlers per event name, in registration order.
#[derive(Debug, Default)]
pub struct EventBus {
    handlers: IndexMap<String, Vec<Handler>>,
}

impl EventBus {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `event`.
    pub fn register(&mut self, event: impl Into<String>, handler: Handler) {
        self.handlers.entry(event.into()).or_default().push(handler);
    }

    /// Snapshot of the handlers for `event`.
    ///
    /// Handlers registered while these run are not part of the snapshot.
    pub fn handlers(&self, event: &str) -> Vec<Handler> {
        self.handlers.get(event).cloned().unwrap_or_default()
    }

    /// Number of handlers registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.handlers.get(event).map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_appends() {
        let mut bus = EventBus::new();
        let body: Rc<[Node]> = vec![Node::string("go"), Node::number(1.0)].into();
        bus.register("go", Handler::new(Rc::clone(&body), 1));
        bus.register("go", Handler::new(body, 1));
        assert_eq!(bus.listener_count("go"), 2);
        assert_eq!(bus.listener_count("stop"), 0);
        assert_eq!(bus.handlers("go")[0].statements(), &[Node::number(1.0)]);
    }
}
