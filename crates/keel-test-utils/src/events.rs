//! Per-thread log of lifecycle events.
//!
//! [`Tracked`](crate::Tracked) drops and [`LedgerAllocator`](crate::LedgerAllocator)
//! allocations both append here, so a test can assert the relative order
//! of destructor calls and storage release.

use std::cell::RefCell;

use smallvec::SmallVec;

/// A single lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A `Tracked` carrying this value was dropped.
    Dropped(u64),
    /// A block of this many bytes was allocated through a ledger.
    Allocated(usize),
    /// A block of this many bytes was released through a ledger.
    Deallocated(usize),
}

/// Inline storage covers the short sequences most tests inspect.
pub type EventBuf = SmallVec<[Event; 16]>;

thread_local! {
    static EVENTS: RefCell<EventBuf> = RefCell::new(SmallVec::new());
}

/// Append an event to this thread's log.
pub fn record(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drain and return this thread's log.
pub fn take() -> EventBuf {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}

/// Discard this thread's log.
pub fn clear() {
    EVENTS.with(|events| events.borrow_mut().clear());
}

/// Values of the `Dropped` events currently in the log, in order.
pub fn dropped_values() -> Vec<u64> {
    EVENTS.with(|events| {
        events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Dropped(v) => Some(*v),
                _ => None,
            })
            .collect()
    })
}
