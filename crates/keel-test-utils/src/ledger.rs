//! An allocator that keeps a ledger of every live block.
//!
//! Wraps [`Global`] and records each allocation in an `IndexMap` keyed by
//! address. Releasing an unknown block, or releasing with a layout that
//! differs from the one allocated, panics: both indicate a double free or
//! a container handing storage to the wrong allocator. The element hooks
//! are counted too, so tests can see that containers construct and destroy
//! through the allocator.

use std::alloc::Layout;
use std::cell::RefCell;
use std::ptr::NonNull;
use std::rc::Rc;

use indexmap::IndexMap;
use keel_core::{AllocError, Allocator, Global};

use crate::events::{self, Event};

#[derive(Debug, Default)]
struct Ledger {
    live: IndexMap<usize, Layout>,
    allocations: usize,
    deallocations: usize,
    constructs: usize,
    destroys: usize,
    fail_after: Option<usize>,
}

/// Cloneable handle to a shared allocation ledger.
///
/// Clones share one ledger, so a container and its deep copy (which
/// clones the allocator) are accounted together.
#[derive(Clone, Debug, Default)]
pub struct LedgerAllocator {
    ledger: Rc<RefCell<Ledger>>,
}

impl LedgerAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose allocation number `successful + 1` (and every one
    /// after it) fails with `AllocError::Exhausted`.
    pub fn failing_after(successful: usize) -> Self {
        let alloc = Self::new();
        alloc.set_fail_after(Some(successful));
        alloc
    }

    /// Change the failure trigger. `None` disables failure injection.
    pub fn set_fail_after(&self, successful: Option<usize>) {
        self.ledger.borrow_mut().fail_after = successful;
    }

    /// Number of blocks currently outstanding.
    pub fn live_blocks(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    /// Sum of the sizes of outstanding blocks.
    pub fn live_bytes(&self) -> usize {
        self.ledger.borrow().live.values().map(Layout::size).sum()
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.ledger.borrow().allocations
    }

    /// Deallocations so far.
    pub fn deallocations(&self) -> usize {
        self.ledger.borrow().deallocations
    }

    /// Values constructed through [`Allocator::construct`] so far.
    pub fn constructs(&self) -> usize {
        self.ledger.borrow().constructs
    }

    /// Values destroyed through [`Allocator::destroy`] so far.
    pub fn destroys(&self) -> usize {
        self.ledger.borrow().destroys
    }

    /// Every allocated block has been released.
    pub fn is_balanced(&self) -> bool {
        let ledger = self.ledger.borrow();
        ledger.live.is_empty() && ledger.allocations == ledger.deallocations
    }
}

// SAFETY: blocks come from `Global`; the ledger only observes them.
unsafe impl Allocator for LedgerAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let mut ledger = self.ledger.borrow_mut();
        match ledger.fail_after {
            Some(0) => {
                return Err(AllocError::Exhausted {
                    bytes: layout.size(),
                    align: layout.align(),
                })
            }
            Some(n) => ledger.fail_after = Some(n - 1),
            None => {}
        }
        let ptr = Global.allocate(layout)?;
        ledger.live.insert(ptr.as_ptr() as usize, layout);
        ledger.allocations += 1;
        events::record(Event::Allocated(layout.size()));
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let mut ledger = self.ledger.borrow_mut();
        let recorded = ledger.live.swap_remove(&(ptr.as_ptr() as usize));
        assert_eq!(
            recorded,
            Some(layout),
            "deallocating {ptr:p}: block unknown to ledger or layout mismatch"
        );
        ledger.deallocations += 1;
        events::record(Event::Deallocated(layout.size()));
        // SAFETY: the ledger confirmed `ptr` is live with this layout.
        unsafe { Global.deallocate(ptr, layout) };
    }

    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        self.ledger.borrow_mut().constructs += 1;
        // SAFETY: forwarded caller contract.
        unsafe { ptr.as_ptr().write(value) };
    }

    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        // The borrow ends before the destructor runs, which may release
        // nested blocks through this same ledger.
        self.ledger.borrow_mut().destroys += 1;
        // SAFETY: forwarded caller contract.
        unsafe { std::ptr::drop_in_place(ptr.as_ptr()) };
    }
}
