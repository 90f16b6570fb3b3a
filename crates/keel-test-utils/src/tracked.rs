//! Instrumented element type with live construction/destruction counters.

use std::cell::Cell;

use crate::events::{self, Event};

thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static CLONED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static CLONE_PANIC_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
    static DEFAULT_PANIC_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Count down a one-shot trigger; `true` when it fires.
fn fires(trigger: &'static std::thread::LocalKey<Cell<Option<usize>>>) -> bool {
    trigger.with(|c| match c.get() {
        Some(0) => {
            c.set(None);
            true
        }
        Some(n) => {
            c.set(Some(n - 1));
            false
        }
        None => false,
    })
}

/// Snapshot of the per-thread [`Tracked`] counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Values created by `new`, `default` or `clone`.
    pub constructed: usize,
    /// The subset of `constructed` created by `clone`.
    pub cloned: usize,
    /// Values dropped.
    pub dropped: usize,
}

impl Counters {
    /// Values constructed but not yet dropped.
    pub fn live(&self) -> usize {
        self.constructed - self.dropped
    }
}

/// A value that counts its own constructions and drops.
///
/// Counters are thread-local; the default test harness runs each test on
/// its own thread, so tests do not observe each other. Call
/// [`Tracked::reset_counters`] at the start of a test anyway.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tracked {
    value: u64,
}

impl Tracked {
    pub fn new(value: u64) -> Self {
        CONSTRUCTED.with(|c| c.set(c.get() + 1));
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }

    /// Current counter values for this thread.
    pub fn counters() -> Counters {
        Counters {
            constructed: CONSTRUCTED.with(Cell::get),
            cloned: CLONED.with(Cell::get),
            dropped: DROPPED.with(Cell::get),
        }
    }

    /// Zero the counters, disarm any armed panic and clear the event log.
    pub fn reset_counters() {
        CONSTRUCTED.with(|c| c.set(0));
        CLONED.with(|c| c.set(0));
        DROPPED.with(|c| c.set(0));
        CLONE_PANIC_AFTER.with(|c| c.set(None));
        DEFAULT_PANIC_AFTER.with(|c| c.set(None));
        events::clear();
    }

    /// Make the clone after `successful` more clones panic.
    ///
    /// The panic fires once, then the trigger disarms itself.
    pub fn arm_clone_panic(successful: usize) {
        CLONE_PANIC_AFTER.with(|c| c.set(Some(successful)));
    }

    /// Make the `Default` call after `successful` more calls panic.
    ///
    /// The panic fires once, then the trigger disarms itself.
    pub fn arm_default_panic(successful: usize) {
        DEFAULT_PANIC_AFTER.with(|c| c.set(Some(successful)));
    }
}

impl Default for Tracked {
    fn default() -> Self {
        if fires(&DEFAULT_PANIC_AFTER) {
            panic!("Tracked::default panicked");
        }
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if fires(&CLONE_PANIC_AFTER) {
            panic!("Tracked({}) clone panicked", self.value);
        }
        CLONED.with(|c| c.set(c.get() + 1));
        Self::new(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.with(|c| c.set(c.get() + 1));
        events::record(Event::Dropped(self.value));
    }
}
