//! Tests for the time-ordered event queue
//!
//! Equal-timestamp order is deliberately not asserted for concurrent
//! producers: only non-decreasing time order is guaranteed.

use airport_capacity_core_rs::core::time::default_start;
use airport_capacity_core_rs::{Event, EventQueue, EventType};
use chrono::Duration;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Test Helpers
// ============================================================================

fn at(minutes: i64) -> chrono::DateTime<chrono::Utc> {
    default_start() + Duration::minutes(minutes)
}

fn drain(queue: &EventQueue) -> Vec<Event> {
    std::iter::from_fn(|| queue.pop()).collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_pops_in_timestamp_order() {
    let queue = EventQueue::new();
    queue.push(Event::curfew_end(at(30)));
    queue.push(Event::curfew_start(at(10)));
    queue.push(Event::rotation_change(at(20), 0.9));

    let times: Vec<_> = drain(&queue).iter().map(|e| e.timestamp()).collect();
    assert_eq!(times, vec![at(10), at(20), at(30)]);
}

#[test]
fn test_peek_matches_next_pop() {
    let queue = EventQueue::new();
    queue.push(Event::curfew_end(at(30)));
    queue.push(Event::curfew_start(at(10)));

    let peeked = queue.peek().unwrap();
    assert_eq!(peeked.event_type(), EventType::CurfewStart);
    assert_eq!(queue.len(), 2, "Peek must not remove the event");
    assert_eq!(queue.pop().unwrap(), peeked);
}

#[test]
fn test_empty_queue_returns_none() {
    let queue = EventQueue::new();
    assert!(queue.pop().is_none());
    assert!(queue.peek().is_none());
    assert_eq!(queue.len(), 0);
}

#[test]
fn test_clear_drops_everything() {
    let queue = EventQueue::new();
    queue.push(Event::curfew_start(at(1)));
    queue.push(Event::curfew_end(at(2)));
    queue.clear();
    assert!(queue.is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_push_preserves_time_order() {
    let queue = Arc::new(EventQueue::new());
    let producers = 8;
    let per_producer = 250;

    let handles: Vec<_> = (0..producers)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..per_producer {
                    // Interleaved timestamps with plenty of collisions
                    let minute = ((i * 7 + p * 13) % 100) as i64;
                    queue.push(Event::rotation_change(at(minute), 0.9));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(queue.len(), producers * per_producer);

    let events = drain(&queue);
    assert_eq!(events.len(), producers * per_producer);
    assert!(
        events.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()),
        "Events must pop in non-decreasing timestamp order"
    );
}

#[test]
fn test_concurrent_push_and_pop_lose_nothing() {
    let queue = Arc::new(EventQueue::new());
    for i in 0..500 {
        queue.push(Event::curfew_start(at(i)));
    }

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || (0..250).filter(|_| queue.pop().is_some()).count())
    };
    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..250 {
                queue.push(Event::curfew_end(at(1000 + i)));
            }
        })
    };

    let popped = consumer.join().unwrap();
    producer.join().unwrap();

    assert_eq!(popped, 250);
    assert_eq!(queue.len(), 500);
}
