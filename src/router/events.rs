//! Navigation lifecycle events.
//!
//! The router records events into a queue instead of calling listeners
//! directly; the host drains the queue whenever it wants to react. Keeps
//! navigation mutation-free for observers and the ordering explicit.

use std::collections::VecDeque;

/// One navigation lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// Navigation to `path` is about to start mounting views.
    BeforeViewLoad { path: String },
    /// Navigation finished; the view chain for `path` is fully mounted.
    ViewLoaded { path: String },
}

/// FIFO queue of pending navigation events.
#[derive(Debug, Default)]
pub struct RouterEvents {
    queue: VecDeque<RouterEvent>,
}

impl RouterEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: RouterEvent) {
        self.queue.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<RouterEvent> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
