//! Delayed combat actions.
//!
//! Actions are scheduled a number of turn-boundary ticks into the future.
//! Ready actions (remaining delay <= 0) run lowest delay first, then highest
//! priority, then in insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Combat, CombatHost};

/// Deferred combat logic.
pub type DelayedFn = Box<dyn FnOnce(&mut Combat, &mut dyn CombatHost)>;

/// A scheduled action.
pub struct DelayedAction {
    action: DelayedFn,
    delay: i32,
    priority: i32,
    source: String,
    seq: u64,
}

impl DelayedAction {
    #[must_use]
    pub fn delay(&self) -> i32 {
        self.delay
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Diagnostic tag naming what scheduled this action.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run the action.
    pub fn run(self, combat: &mut Combat, host: &mut dyn CombatHost) {
        (self.action)(combat, host);
    }
}

impl std::fmt::Debug for DelayedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedAction")
            .field("delay", &self.delay)
            .field("priority", &self.priority)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// Max-heap order: the greatest element runs first.
impl Ord for DelayedAction {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .delay
            .cmp(&self.delay)
            .then(self.priority.cmp(&other.priority))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for DelayedAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DelayedAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DelayedAction {}

/// Priority queue of delayed actions.
#[derive(Debug, Default)]
pub struct DelayedQueue {
    heap: BinaryHeap<DelayedAction>,
    next_seq: u64,
}

impl DelayedQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action.
    pub fn push(&mut self, action: DelayedFn, delay: i32, priority: i32, source: impl Into<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(DelayedAction {
            action,
            delay,
            priority,
            source: source.into(),
            seq,
        });
    }

    /// Remove the next action if it is ready to run.
    pub fn pop_ready(&mut self) -> Option<DelayedAction> {
        if self.heap.peek()?.delay <= 0 {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Count down every pending action by one tick.
    pub fn tick(&mut self) {
        // Uniform decrement keeps the heap order valid.
        let mut actions = std::mem::take(&mut self.heap).into_vec();
        for action in &mut actions {
            action.delay -= 1;
        }
        self.heap = BinaryHeap::from(actions);
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending actions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &DelayedAction> {
        self.heap.iter()
    }
}
