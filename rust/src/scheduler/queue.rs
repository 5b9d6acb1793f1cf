//! Bounded FIFO ready queue for Round Robin.

use std::collections::VecDeque;

/// FIFO of process indices into a run's working copy.
///
/// A process occupies at most one slot at a time, so the capacity is the
/// number of processes in the run.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    slots: VecDeque<usize>,
    capacity: usize,
}

impl ReadyQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn enqueue(&mut self, process: usize) {
        debug_assert!(
            self.slots.len() < self.capacity,
            "ready queue overflow (capacity {})",
            self.capacity
        );
        debug_assert!(
            !self.slots.contains(&process),
            "process {process} enqueued twice"
        );
        self.slots.push_back(process);
    }

    pub fn dequeue(&mut self) -> Option<usize> {
        self.slots.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }
}
