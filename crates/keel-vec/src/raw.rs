//! Raw storage blocks: capacity without constructed elements.
//!
//! A [`RawBlock`] owns one allocation large enough for `cap` values of `T`
//! and knows nothing about which slots are initialised. The container on
//! top tracks the constructed prefix. All pointer arithmetic that crosses
//! block boundaries lives here, each `unsafe` block with a `// SAFETY:`
//! comment.

use std::mem;
use std::ptr::{self, NonNull};

use keel_core::{AllocError, Allocator};

/// An owned block of uninitialised storage for `cap` elements.
///
/// Dropping a block releases the storage but never runs element
/// destructors. `cap == 0` means no storage is held and `ptr` is dangling.
pub(crate) struct RawBlock<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

impl<T, A: Allocator> RawBlock<T, A> {
    /// A block that holds no storage.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    /// A block with room for exactly `cap` elements.
    pub(crate) fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, AllocError> {
        if cap == 0 {
            return Ok(Self::new_in(alloc));
        }
        let ptr = alloc.allocate_array::<T>(cap).inspect_err(|err| {
            tracing::debug!(capacity = cap, %err, "block allocation failed");
        })?;
        tracing::trace!(capacity = cap, "block allocated");
        Ok(Self { ptr, cap, alloc })
    }

    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Address of slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= cap`.
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        // SAFETY: within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Construct `value` in slot `index` through the allocator.
    ///
    /// # Safety
    ///
    /// `index < cap` and the slot holds no live value.
    pub(crate) unsafe fn construct(&self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        // SAFETY: caller guarantees an empty slot inside the block.
        unsafe { self.alloc.construct(self.ptr.add(index), value) };
    }

    /// Destroy the values in slots `[from, to)` through the allocator,
    /// front to back. Storage is untouched.
    ///
    /// If a destructor panics, the values after it are leaked.
    ///
    /// # Safety
    ///
    /// Every slot in `[from, to)` holds a live value that the caller gives
    /// up, and `to <= cap`.
    pub(crate) unsafe fn destroy_range(&self, from: usize, to: usize) {
        debug_assert!(from <= to && to <= self.cap);
        for index in from..to {
            // SAFETY: caller guarantees a live value in every slot.
            unsafe { self.alloc.destroy(self.ptr.add(index)) };
        }
    }

    /// Move the first `len` elements into a fresh block of `new_cap` slots
    /// and release the old block.
    ///
    /// The new block is obtained before anything else happens, so on
    /// failure `self` is untouched. The transfer itself is a bitwise move
    /// and cannot fail, so there is never a half-populated new block.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be initialised, and `len <= new_cap`.
    pub(crate) unsafe fn try_reallocate(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), AllocError> {
        debug_assert!(len <= self.cap && len <= new_cap);
        let new_ptr = self.alloc.allocate_array::<T>(new_cap).inspect_err(|err| {
            tracing::debug!(
                old_capacity = self.cap,
                new_capacity = new_cap,
                %err,
                "reallocation failed, keeping old block"
            );
        })?;
        // SAFETY: the old block holds `len` initialised elements, the new
        // block has room for at least `len`, and they are distinct
        // allocations (or both dangling with a zero-byte copy).
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len) };
        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_cap = mem::replace(&mut self.cap, new_cap);
        // SAFETY: the old block came from `allocate_array::<T>(old_cap)` on
        // this allocator; its elements were moved out above, so only the
        // storage is left to free.
        unsafe { self.alloc.deallocate_array(old_ptr, old_cap) };
        tracing::trace!(
            old_capacity = old_cap,
            new_capacity = new_cap,
            moved = len,
            "block reallocated"
        );
        Ok(())
    }
}

impl<T, A: Allocator> Drop for RawBlock<T, A> {
    fn drop(&mut self) {
        if self.cap == 0 {
            return;
        }
        // SAFETY: `ptr`/`cap` are exactly what `allocate_array` produced;
        // the container has already destroyed any elements.
        unsafe { self.alloc.deallocate_array(self.ptr, self.cap) };
        tracing::trace!(capacity = self.cap, "block released");
    }
}
