//! The allocator seam consumed by every keel container.
//!
//! An [`Allocator`] hands out raw, uninitialised storage and takes it back.
//! It never runs constructors or destructors itself: the typed helpers
//! ([`Allocator::construct`], [`Allocator::destroy`]) are thin wrappers over
//! in-place writes and drops so that "memory is reserved" and "an object
//! lives there" stay separate steps.

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::error::AllocError;

/// Source of raw storage blocks.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and that stay valid
/// until passed back to [`deallocate`](Allocator::deallocate) on the same
/// allocator (or a clone of it). A block must never be handed out twice
/// while live.
pub unsafe trait Allocator {
    /// Acquire a block for `layout`.
    ///
    /// Zero-sized layouts are filtered out by the typed helpers and are
    /// never requested by keel containers.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block previously returned by [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must denote a live block from this allocator, and `layout`
    /// must be the layout it was allocated with.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Raw storage for `count` values of `T`, none of them constructed.
    ///
    /// Returns a dangling, well-aligned address without calling
    /// [`allocate`](Allocator::allocate) when the byte size is zero.
    fn allocate_array<T>(&self, count: usize) -> Result<NonNull<T>, AllocError>
    where
        Self: Sized,
    {
        let layout = array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        self.allocate(layout).map(NonNull::cast)
    }

    /// Release storage obtained from [`allocate_array`](Allocator::allocate_array).
    ///
    /// Does not run any destructor.
    ///
    /// # Safety
    ///
    /// `ptr` and `count` must be exactly what was passed to and returned
    /// from a previous `allocate_array::<T>` on this allocator, and the
    /// block must not have been released already.
    unsafe fn deallocate_array<T>(&self, ptr: NonNull<T>, count: usize)
    where
        Self: Sized,
    {
        let Ok(layout) = Layout::array::<T>(count) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: forwarded caller contract; the layout is the one used
            // by `allocate_array` for the same `count`.
            unsafe { self.deallocate(ptr.cast(), layout) };
        }
    }

    /// Construct `value` in place at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes and must not hold a live value
    /// (a live value there would be overwritten without being dropped).
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T)
    where
        Self: Sized,
    {
        // SAFETY: caller guarantees `ptr` is writable, aligned storage.
        unsafe { ptr.as_ptr().write(value) };
    }

    /// Run the destructor of the value at `ptr` without releasing storage.
    ///
    /// # Safety
    ///
    /// `ptr` must hold a live, constructed `T`, which is dead afterwards.
    unsafe fn destroy<T>(&self, ptr: NonNull<T>)
    where
        Self: Sized,
    {
        // SAFETY: caller guarantees a live value at `ptr`.
        unsafe { ptr::drop_in_place(ptr.as_ptr()) };
    }
}

// SAFETY: forwards to `A`, which upholds the contract.
unsafe impl<A: Allocator> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T)
    where
        Self: Sized,
    {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).construct(ptr, value) }
    }

    unsafe fn destroy<T>(&self, ptr: NonNull<T>)
    where
        Self: Sized,
    {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).destroy(ptr) }
    }
}

/// Layout of `count` contiguous `T`s, or `CapacityOverflow`.
pub fn array_layout<T>(count: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(count).map_err(|_| AllocError::CapacityOverflow { requested: count })
}

/// The process heap, via `std::alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

// SAFETY: `std::alloc::alloc` returns unique, aligned blocks for non-zero
// layouts, and zero-sized requests get a dangling aligned address that is
// never passed to `dealloc`.
unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            // Address equal to the alignment: non-null and aligned.
            let dangling = ptr::without_provenance_mut::<u8>(layout.align());
            return NonNull::new(dangling).ok_or(AllocError::Exhausted {
                bytes: 0,
                align: layout.align(),
            });
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { std::alloc::alloc(layout) };
        NonNull::new(raw).ok_or(AllocError::Exhausted {
            bytes: layout.size(),
            align: layout.align(),
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: caller guarantees `ptr` came from `allocate(layout)`.
            unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}
