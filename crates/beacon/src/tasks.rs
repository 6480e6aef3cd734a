//! Deferred task queue behind `paral` / `hold`

use std::collections::VecDeque;
use std::rc::Rc;

use crate::ast::Node;

/// FIFO of statement blocks queued by `paral`.
///
/// Tasks reference the immutable AST; nothing is copied on enqueue.
#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: VecDeque<Rc<[Node]>>,
}

impl TaskQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.
    pub fn enqueue(&mut self, body: Rc<[Node]>) {
        self.pending.push_back(body);
    }

    /// Remove and return every pending task, oldest first.
    pub fn take_all(&mut self) -> Vec<Rc<[Node]>> {
        self.pending.drain(..).collect()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
