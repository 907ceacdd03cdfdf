//! Time-ordered event queue
//!
//! A binary min-heap of pending events keyed by timestamp, guarded by a
//! single mutex so that policies running on different threads can schedule
//! events concurrently.
//!
//! # Ordering
//!
//! Events pop in non-decreasing timestamp order. Events with equal
//! timestamps pop in the order they were pushed *as observed by the lock*;
//! when several threads push concurrently that order is undefined, so
//! correctness must never depend on how equal timestamps are broken.

use crate::events::types::Event;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry: event plus its insertion sequence number
#[derive(Debug)]
struct QueuedEvent {
    sequence: u64,
    event: Event,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) yields the earliest event first
        other
            .event
            .timestamp()
            .cmp(&self.event.timestamp())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct Inner {
    heap: BinaryHeap<QueuedEvent>,
    next_sequence: u64,
}

/// Concurrency-safe priority queue of pending events
///
/// # Example
/// ```
/// use airport_capacity_core_rs::events::{Event, EventQueue};
/// use airport_capacity_core_rs::core::time::default_start;
/// use chrono::Duration;
///
/// let queue = EventQueue::new();
/// queue.push(Event::curfew_end(default_start() + Duration::hours(6)));
/// queue.push(Event::curfew_start(default_start()));
///
/// assert_eq!(queue.pop().unwrap().timestamp(), default_start());
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct EventQueue {
    inner: Mutex<Inner>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event
    pub fn push(&self, event: Event) {
        let mut inner = self.inner.lock();
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        inner.heap.push(QueuedEvent { sequence, event });
    }

    /// Remove and return the earliest event, `None` when empty
    pub fn pop(&self) -> Option<Event> {
        self.inner.lock().heap.pop().map(|queued| queued.event)
    }

    /// Copy of the earliest event without removing it
    pub fn peek(&self) -> Option<Event> {
        self.inner.lock().heap.peek().map(|queued| queued.event.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().heap.is_empty()
    }

    /// Drop every pending event
    pub fn clear(&self) {
        self.inner.lock().heap.clear();
    }
}
