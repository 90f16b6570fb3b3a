//! Byte-budgeted allocator adapter.
//!
//! [`Bounded`] forwards to an inner allocator until a fixed byte budget is
//! spent, then fails with [`AllocError::Exhausted`]. Released blocks return
//! their bytes to the budget.

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use crate::alloc::Allocator;
use crate::error::AllocError;

/// An allocator that refuses requests beyond a byte budget.
///
/// Accounting uses `Cell`, so a `Bounded` is single-threaded. Share one
/// budget between containers by handing them `&Bounded<A>`.
#[derive(Debug)]
pub struct Bounded<A: Allocator> {
    inner: A,
    limit: usize,
    in_use: Cell<usize>,
    peak: Cell<usize>,
}

impl<A: Allocator> Bounded<A> {
    /// Wrap `inner` with a budget of `limit` bytes.
    pub fn new(inner: A, limit: usize) -> Self {
        Self {
            inner,
            limit,
            in_use: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    /// The configured budget in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently handed out.
    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    /// Highest value [`in_use`](Self::in_use) has reached.
    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.limit - self.in_use.get()
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

// SAFETY: every block comes from `inner`, which upholds the contract.
unsafe impl<A: Allocator> Allocator for Bounded<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let exhausted = AllocError::Exhausted {
            bytes: layout.size(),
            align: layout.align(),
        };
        let next = match self.in_use.get().checked_add(layout.size()) {
            Some(next) if next <= self.limit => next,
            _ => return Err(exhausted),
        };
        let ptr = self.inner.allocate(layout)?;
        self.in_use.set(next);
        self.peak.set(self.peak.get().max(next));
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { self.inner.deallocate(ptr, layout) };
        self.in_use
            .set(self.in_use.get().saturating_sub(layout.size()));
    }

    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: forwarded caller contract.
        unsafe { self.inner.construct(ptr, value) }
    }

    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        // SAFETY: forwarded caller contract.
        unsafe { self.inner.destroy(ptr) }
    }
}
