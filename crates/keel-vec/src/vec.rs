//! The dynamic sequence container.
//!
//! [`DynVec`] stores its elements contiguously in a [`RawBlock`] obtained
//! from a pluggable allocator. Conceptually it is the three-marker layout
//! `start ≤ constructed-end ≤ capacity-end`, represented as
//! `(ptr, len, cap)`:
//!
//! ```text
//!   ptr                  ptr+len              ptr+cap
//!    │  live elements      │  raw storage       │
//!    ▼                     ▼                    ▼
//!    ┌──────┬──────┬──────┬──────┬──────┬──────┐
//!    │  a   │  b   │  c   │ uninit      uninit │
//!    └──────┴──────┴──────┴──────┴──────┴──────┘
//! ```
//!
//! Slots `[0, len)` always hold constructed values and slots
//! `[len, cap)` never do. Operations that run user code (`Clone`,
//! `Default`, closures) bump `len` after every element they construct, so
//! a panic part-way drops exactly the constructed prefix.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Rev;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use keel_core::{AllocError, Allocator, Global, GrowthPolicy, OutOfRange};

use crate::into_iter::IntoIter;
use crate::raw::RawBlock;

/// A contiguous, growable sequence of `T` backed by allocator `A`.
///
/// # Growth
///
/// When an insertion needs more room than the current capacity, a new
/// block sized by the container's [`GrowthPolicy`] is allocated, every
/// element is moved into it in order, and only then is the old block
/// released. Allocation failure leaves the container exactly as it was.
/// Any growth invalidates pointers and slices into the old storage; the
/// borrow checker rejects code that would hold one across it.
///
/// # Errors
///
/// Every allocating operation has a `try_` form returning
/// [`AllocError`]. The plain forms panic with the error's message.
pub struct DynVec<T, A: Allocator = Global> {
    buf: RawBlock<T, A>,
    len: usize,
    growth: GrowthPolicy,
}

// SAFETY: `DynVec` owns its elements exclusively, like `Vec<T>`.
unsafe impl<T: Send, A: Allocator + Send> Send for DynVec<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for DynVec<T, A> {}

#[track_caller]
fn expect_alloc<R>(result: Result<R, AllocError>, op: &str) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("DynVec::{op}: {err}"),
    }
}

impl<T> DynVec<T> {
    /// An empty container. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty container with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// `count` default-constructed elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn from_default(count: usize) -> Self
    where
        T: Default,
    {
        expect_alloc(Self::try_from_default_in(count, Global), "from_default")
    }

    /// `count` copies of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        expect_alloc(Self::try_from_elem_in(count, value, Global), "from_elem")
    }

    /// A copy of `items`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        expect_alloc(Self::try_from_slice_in(items, Global), "from_slice")
    }
}

impl<T, A: Allocator> DynVec<T, A> {
    /// An empty container using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBlock::new_in(alloc),
            len: 0,
            growth: GrowthPolicy::Geometric,
        }
    }

    /// An empty container with room for exactly `capacity` elements.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBlock::try_with_capacity_in(capacity, alloc)?,
            len: 0,
            growth: GrowthPolicy::Geometric,
        })
    }

    /// An empty container with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        expect_alloc(Self::try_with_capacity_in(capacity, alloc), "with_capacity_in")
    }

    /// `count` default-constructed elements.
    pub fn try_from_default_in(count: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut out = Self::try_with_capacity_in(count, alloc)?;
        for _ in 0..count {
            // SAFETY: capacity was reserved for `count` elements.
            unsafe { out.push_unchecked(T::default()) };
        }
        Ok(out)
    }

    /// `count` copies of `value`. The last slot receives `value` itself.
    pub fn try_from_elem_in(count: usize, value: T, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut out = Self::try_with_capacity_in(count, alloc)?;
        out.fill_clones(count, value);
        Ok(out)
    }

    /// A copy of `items`, in order.
    pub fn try_from_slice_in(items: &[T], alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut out = Self::try_with_capacity_in(items.len(), alloc)?;
        for item in items {
            // SAFETY: capacity was reserved for `items.len()` elements.
            unsafe { out.push_unchecked(item.clone()) };
        }
        Ok(out)
    }

    /// The elements of `iter`, in order.
    ///
    /// The iterator's lower size hint is reserved up front; anything
    /// beyond it grows per the default policy.
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut out = Self::try_with_capacity_in(iter.size_hint().0, alloc)?;
        for item in iter {
            out.try_push(item)?;
        }
        Ok(out)
    }

    /// The elements of `iter`, in order.
    ///
    /// # Panics
    ///
    /// Panics if an allocation fails.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        expect_alloc(Self::try_from_iter_in(iter, alloc), "from_iter_in")
    }

    /// Use `growth` for implicit reallocations from now on.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// The policy used for implicit reallocations.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// The allocator this container draws from.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Pointer to the first slot. Dangling while the capacity is zero.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// Mutable pointer to the first slot. Dangling while the capacity is
    /// zero.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialised; a dangling pointer is valid
        // for a zero-length slice.
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, with exclusive access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Bounds-checked access against the logical length.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Bounds-checked mutable access against the logical length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// Elements from back to front.
    pub fn rev_iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.as_slice().iter().rev()
    }

    /// Make sure the capacity is at least `min_capacity`.
    ///
    /// Grows to exactly `min_capacity` regardless of the growth policy;
    /// does nothing if the capacity already suffices. The length never
    /// changes. On failure the original storage is untouched.
    pub fn try_ensure_capacity(&mut self, min_capacity: usize) -> Result<(), AllocError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }
        // SAFETY: `[0, len)` is initialised and `len <= cap < min_capacity`.
        unsafe { self.buf.try_reallocate(self.len, min_capacity) }
    }

    /// Make sure the capacity is at least `min_capacity`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        expect_alloc(self.try_ensure_capacity(min_capacity), "ensure_capacity");
    }

    /// Make room for at least `additional` more elements, growing per the
    /// container's policy.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = GrowthPolicy::required(self.len, additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_cap = self.growth.next_capacity(self.capacity(), required);
        // SAFETY: `[0, len)` is initialised and `len < required <= new_cap`.
        unsafe { self.buf.try_reallocate(self.len, new_cap) }
    }

    /// Make room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn reserve(&mut self, additional: usize) {
        expect_alloc(self.try_reserve(additional), "reserve");
    }

    /// Release unused capacity, moving the elements into a block of
    /// exactly `len` slots.
    ///
    /// On failure the container keeps its current block.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
        if self.capacity() == self.len {
            return Ok(());
        }
        // SAFETY: `[0, len)` is initialised and `len < cap`.
        unsafe { self.buf.try_reallocate(self.len, self.len) }
    }

    /// Release unused capacity.
    ///
    /// # Panics
    ///
    /// Panics if the smaller block cannot be allocated.
    pub fn shrink_to_fit(&mut self) {
        expect_alloc(self.try_shrink_to_fit(), "shrink_to_fit");
    }

    /// Append `value`.
    ///
    /// On failure `value` is dropped and the container is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.capacity() {
            self.try_reserve(1)?;
        }
        // SAFETY: there is at least one free slot.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Append `value`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn push(&mut self, value: T) {
        expect_alloc(self.try_push(value), "push");
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialised and is now outside the live
        // prefix, so reading it out transfers ownership.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        let len = self.len;
        if index > len {
            panic!("DynVec::insert: {}", OutOfRange { index, len });
        }
        if len == self.capacity() {
            self.try_reserve(1)?;
        }
        // SAFETY: there is a free slot at `len`; shifting `[index, len)`
        // by one stays within capacity, then the gap at `index` is filled.
        unsafe {
            let at = self.buf.slot(index);
            ptr::copy(at, at.add(1), len - index);
            self.buf.construct(index, value);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if the allocation fails.
    pub fn insert(&mut self, index: usize, value: T) {
        expect_alloc(self.try_insert(index, value), "insert");
    }

    /// Remove and return the element at `index`, shifting later elements
    /// left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("DynVec::remove: {}", OutOfRange { index, len });
        }
        // SAFETY: `index < len`; the value is read out before the tail is
        // shifted over its slot.
        unsafe {
            let at = self.buf.slot(index);
            let value = at.read();
            ptr::copy(at.add(1), at, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Remove and return the element at `index`, moving the last element
    /// into its place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("DynVec::swap_remove: {}", OutOfRange { index, len });
        }
        // SAFETY: `index < len`; the last element moves into the vacated
        // slot (a no-op copy when they coincide).
        unsafe {
            let at = self.buf.slot(index);
            let value = at.read();
            ptr::copy(self.buf.slot(len - 1), at, 1);
            self.len = len - 1;
            value
        }
    }

    /// Drop every element at or past `len`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let end = mem::replace(&mut self.len, len);
        // SAFETY: `[len, end)` is initialised and already outside the live
        // prefix, so a panicking destructor cannot cause a double drop.
        unsafe { self.buf.destroy_range(len, end) };
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grow or shrink to `new_len`, filling with copies of `value`.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        let extra = new_len - self.len;
        self.try_reserve(extra)?;
        self.fill_clones(extra, value);
        Ok(())
    }

    /// Grow or shrink to `new_len`, filling with copies of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        expect_alloc(self.try_resize(new_len, value), "resize");
    }

    /// Grow or shrink to `new_len`, filling with values from `f`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len - self.len);
        while self.len < new_len {
            // SAFETY: capacity was reserved for `new_len` elements.
            unsafe { self.push_unchecked(f()) };
        }
    }

    /// Append clones of every element of `items`.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_reserve(items.len())?;
        for item in items {
            // SAFETY: capacity was reserved for `items.len()` more.
            unsafe { self.push_unchecked(item.clone()) };
        }
        Ok(())
    }

    /// Append clones of every element of `items`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        expect_alloc(self.try_extend_from_slice(items), "extend_from_slice");
    }

    /// Replace the contents with the elements of `iter`.
    ///
    /// Existing elements are dropped first and the capacity is reused.
    /// On failure the container holds the prefix appended so far.
    pub fn try_assign<I>(&mut self, iter: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        let iter = iter.into_iter();
        self.try_reserve(iter.size_hint().0)?;
        for item in iter {
            self.try_push(item)?;
        }
        Ok(())
    }

    /// Replace the contents with the elements of `iter`.
    ///
    /// # Panics
    ///
    /// Panics if an allocation fails.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        expect_alloc(self.try_assign(iter), "assign");
    }

    /// Replace the contents with `count` copies of `value`.
    ///
    /// On failure the container is empty (its old elements are already
    /// gone) but keeps its previous capacity.
    pub fn try_assign_elem(&mut self, count: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.clear();
        self.try_ensure_capacity(count)?;
        self.fill_clones(count, value);
        Ok(())
    }

    /// Replace the contents with `count` copies of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn assign_elem(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        expect_alloc(self.try_assign_elem(count, value), "assign_elem");
    }

    /// Keep only the elements for which `keep` returns `true`, in order.
    ///
    /// If `keep` or a destructor panics, the kept elements and the ones
    /// not yet visited stay in the container, in order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = mem::replace(&mut self.len, 0);
        let mut pass = RetainPass {
            vec: self,
            len,
            processed: 0,
            kept: 0,
        };
        while pass.processed < pass.len {
            let index = pass.processed;
            // SAFETY: every slot in `[index, len)` is still initialised and
            // kept elements are compacted into `[0, kept)` with
            // `kept <= index`. `processed` moves past a slot before its
            // value is destroyed, so the guard never revisits it.
            unsafe {
                let src = pass.vec.buf.slot(index);
                if keep(&*src) {
                    if pass.kept != index {
                        ptr::copy_nonoverlapping(src, pass.vec.buf.slot(pass.kept), 1);
                    }
                    pass.kept += 1;
                    pass.processed += 1;
                } else {
                    pass.processed += 1;
                    pass.vec.buf.destroy_range(index, index + 1);
                }
            }
        }
    }

    /// Move the contents out, leaving an empty container that shares the
    /// allocator and growth policy.
    ///
    /// No element is constructed, copied or dropped.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.allocator().clone()).with_growth(self.growth);
        mem::replace(self, empty)
    }

    /// A deep copy with independent storage from a clone of the allocator.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        Ok(Self::try_from_slice_in(self.as_slice(), self.allocator().clone())?
            .with_growth(self.growth))
    }

    /// Write `value` into the first free slot.
    ///
    /// # Safety
    ///
    /// `len < capacity`.
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: caller guarantees a free slot at `len`.
        unsafe { self.buf.construct(self.len, value) };
        self.len += 1;
    }

    /// Append `count` copies of `value`, moving `value` into the last one.
    ///
    /// Capacity for `count` more elements must already be reserved.
    fn fill_clones(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        assert!(self.capacity() - self.len >= count);
        if count == 0 {
            return;
        }
        for _ in 1..count {
            // SAFETY: capacity checked above.
            unsafe { self.push_unchecked(value.clone()) };
        }
        // SAFETY: capacity checked above.
        unsafe { self.push_unchecked(value) };
    }

    /// Hand the block and length to an owning iterator.
    fn into_raw_parts(self) -> (RawBlock<T, A>, usize) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the block has one owner.
        let buf = unsafe { ptr::read(&this.buf) };
        (buf, this.len)
    }
}

impl<T, A: Allocator> Drop for DynVec<T, A> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `[0, len)` is initialised; elements are destroyed front
        // to back, then the block field releases the storage.
        unsafe { self.buf.destroy_range(0, len) };
    }
}

/// In-progress state of [`DynVec::retain`].
///
/// On drop, normal or unwinding, slides the unvisited tail
/// `[processed, len)` down behind the kept prefix and restores the length.
struct RetainPass<'a, T, A: Allocator> {
    vec: &'a mut DynVec<T, A>,
    len: usize,
    processed: usize,
    kept: usize,
}

impl<T, A: Allocator> Drop for RetainPass<'_, T, A> {
    fn drop(&mut self) {
        let tail = self.len - self.processed;
        if tail > 0 && self.kept != self.processed {
            // SAFETY: `[processed, len)` is initialised and
            // `kept < processed`, so the tail moves into vacated slots.
            unsafe {
                ptr::copy(
                    self.vec.buf.slot(self.processed),
                    self.vec.buf.slot(self.kept),
                    tail,
                );
            }
        }
        self.vec.len = self.kept + tail;
    }
}

impl<T, A: Allocator> Deref for DynVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for DynVec<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for DynVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for DynVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Borrow<[T]> for DynVec<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for DynVec<T, A> {
    /// # Panics
    ///
    /// Panics if the allocation fails; use [`DynVec::try_clone`] to
    /// handle that case.
    fn clone(&self) -> Self {
        expect_alloc(self.try_clone(), "clone")
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_from_slice(source.as_slice());
    }
}

impl<T, A: Allocator + Default> Default for DynVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Hash, A: Allocator> Hash for DynVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, U, A, B> PartialEq<DynVec<U, B>> for DynVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &DynVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for DynVec<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for DynVec<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for DynVec<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for DynVec<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, const N: usize> From<[T; N]> for DynVec<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for item in items {
            // SAFETY: capacity was reserved for `N` elements.
            unsafe { out.push_unchecked(item) };
        }
        out
    }
}

impl<T: Clone> From<&[T]> for DynVec<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> FromIterator<T> for DynVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

impl<T, A: Allocator> Extend<T> for DynVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for DynVec<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: Allocator> IntoIterator for DynVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let (buf, len) = self.into_raw_parts();
        IntoIter::new(buf, len)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynvec;
    use keel_core::Bounded;
    use keel_test_utils::{events, Event, LedgerAllocator, Tracked};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn tracked_range(
        alloc: &LedgerAllocator,
        values: std::ops::Range<u64>,
    ) -> DynVec<Tracked, LedgerAllocator> {
        DynVec::from_iter_in(values.map(Tracked::new), alloc.clone())
    }

    #[test]
    fn new_is_empty_and_unallocated() {
        let v: DynVec<u32> = DynVec::new();
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn from_default_constructs_count_elements() {
        Tracked::reset_counters();
        let v: DynVec<Tracked> = DynVec::from_default(5);
        assert_eq!(v.len(), 5);
        assert_eq!(v.capacity(), 5);
        assert_eq!(Tracked::counters().constructed, 5);
        assert!(v.iter().all(|t| t.value() == 0));
    }

    #[test]
    fn from_default_zero_does_not_allocate() {
        let alloc = LedgerAllocator::new();
        let v = DynVec::<u8, _>::try_from_default_in(0, alloc.clone()).unwrap();
        assert!(v.is_empty());
        assert_eq!(alloc.allocations(), 0);
    }

    #[test]
    fn from_elem_clones_count_minus_one() {
        Tracked::reset_counters();
        let v = DynVec::from_elem(4, Tracked::new(9));
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|t| t.value() == 9));
        let c = Tracked::counters();
        assert_eq!(c.cloned, 3);
        assert_eq!(c.live(), 4);
    }

    #[test]
    fn from_elem_zero_drops_value() {
        Tracked::reset_counters();
        let v = DynVec::from_elem(0, Tracked::new(1));
        assert!(v.is_empty());
        assert_eq!(Tracked::counters().live(), 0);
    }

    #[test]
    fn from_slice_preserves_order() {
        let v = DynVec::from_slice(&[3, 1, 2]);
        assert_eq!(v, [3, 1, 2]);
    }

    #[test]
    fn literal_list_macro() {
        let v = dynvec![1, 2, 3];
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        let w = dynvec!["x"; 3];
        assert_eq!(w, ["x", "x", "x"]);
        let e: DynVec<u8> = dynvec![];
        assert!(e.is_empty());
    }

    #[test]
    fn at_checks_logical_length_not_capacity() {
        let mut v = DynVec::with_capacity(10);
        v.push(1u32);
        v.push(2);
        assert_eq!(v.at(1), Ok(&2));
        for index in 2..12 {
            assert_eq!(v.at(index), Err(OutOfRange { index, len: 2 }));
        }
        *v.at_mut(0).unwrap() = 5;
        assert_eq!(v[0], 5);
        assert!(v.at_mut(2).is_err());
    }

    #[test]
    fn push_grows_geometrically() {
        let mut v = DynVec::new();
        let mut caps = Vec::new();
        for i in 0..17u32 {
            v.push(i);
            caps.push(v.capacity());
        }
        assert_eq!(caps[0], 4);
        assert_eq!(caps[4], 8);
        assert_eq!(caps[8], 16);
        assert_eq!(caps[16], 32);
        assert!(v.iter().copied().eq(0..17));
    }

    #[test]
    fn exact_policy_grows_by_requirement() {
        let mut v = DynVec::new().with_growth(GrowthPolicy::Exact);
        for i in 0..5u8 {
            v.push(i);
            assert_eq!(v.capacity(), usize::from(i) + 1);
        }
    }

    #[test]
    fn growth_moves_without_constructing_or_dropping() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::new_in(alloc.clone());
        for i in 0..4 {
            v.push(Tracked::new(i));
        }
        let before = Tracked::counters();
        v.push(Tracked::new(4));
        let after = Tracked::counters();
        assert_eq!(after.constructed, before.constructed + 1);
        assert_eq!(after.dropped, before.dropped);
        assert_eq!(alloc.live_blocks(), 1);
        assert_eq!(alloc.deallocations(), 1);
    }

    #[test]
    fn failed_growth_leaves_contents_intact() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..4);
        assert_eq!(v.capacity(), 4);
        alloc.set_fail_after(Some(0));
        let ptr = v.as_ptr();
        let err = v.try_push(Tracked::new(99)).unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { .. }));
        assert_eq!(v.as_ptr(), ptr);
        assert_eq!(v.capacity(), 4);
        assert!(v.iter().map(Tracked::value).eq(0..4));
        // The rejected element was dropped, nothing else.
        assert_eq!(events::dropped_values(), vec![99]);
        drop(v);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn ensure_capacity_is_exact_and_keeps_len() {
        let mut v = dynvec![1u16, 2];
        v.ensure_capacity(10);
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.len(), 2);
        v.ensure_capacity(3);
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn failed_ensure_capacity_leaves_storage() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::from_iter_in([1u32, 2, 3], alloc.clone());
        alloc.set_fail_after(Some(0));
        assert!(v.try_ensure_capacity(100).is_err());
        assert_eq!(v.capacity(), 3);
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn reserve_overflow_is_reported() {
        let mut v = dynvec![1u8];
        assert!(matches!(
            v.try_reserve(usize::MAX),
            Err(AllocError::CapacityOverflow { .. })
        ));
        assert_eq!(v, [1]);
    }

    #[test]
    fn bounded_allocator_failure_propagates() {
        let bounded = Bounded::new(Global, 16);
        let mut v = DynVec::new_in(&bounded);
        for i in 0..4u32 {
            v.push(i);
        }
        assert_eq!(bounded.in_use(), 16);
        assert!(v.try_push(4).is_err());
        assert_eq!(v, [0, 1, 2, 3]);
        drop(v);
        assert_eq!(bounded.in_use(), 0);
    }

    #[test]
    fn shrink_to_fit_releases_slack() {
        let mut v = DynVec::with_capacity(16);
        v.extend([1, 2, 3]);
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 3);
        assert_eq!(v, [1, 2, 3]);
        v.clear();
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn pop_returns_last() {
        let mut v = dynvec![1, 2];
        assert_eq!(v.pop(), Some(2));
        assert_eq!(v.pop(), Some(1));
        assert_eq!(v.pop(), None);
    }

    #[test]
    fn insert_and_remove_shift() {
        let mut v = dynvec!['a', 'c'];
        v.insert(1, 'b');
        v.insert(3, 'd');
        v.insert(0, '_');
        assert_eq!(v, ['_', 'a', 'b', 'c', 'd']);
        assert_eq!(v.remove(0), '_');
        assert_eq!(v.remove(3), 'd');
        assert_eq!(v, ['a', 'b', 'c']);
        assert_eq!(v.swap_remove(0), 'a');
        assert_eq!(v, ['c', 'b']);
    }

    #[test]
    #[should_panic(expected = "index 3 out of range for length 2")]
    fn insert_past_end_panics() {
        let mut v = dynvec![1, 2];
        v.insert(3, 0);
    }

    #[test]
    #[should_panic(expected = "index 2 out of range for length 2")]
    fn remove_past_end_panics() {
        let mut v = dynvec![1, 2];
        v.remove(2);
    }

    #[test]
    fn truncate_drops_tail_in_order() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..5);
        v.truncate(2);
        assert_eq!(events::dropped_values(), vec![2, 3, 4]);
        assert_eq!(v.len(), 2);
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn drop_destroys_each_element_before_release() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let v = tracked_range(&alloc, 0..3);
        events::clear();
        drop(v);
        let size = 3 * mem::size_of::<Tracked>();
        assert_eq!(
            events::take().as_slice(),
            &[
                Event::Dropped(0),
                Event::Dropped(1),
                Event::Dropped(2),
                Event::Deallocated(size),
            ]
        );
        assert_eq!(Tracked::counters().live(), 0);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn clone_is_deep_and_independent() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let a = tracked_range(&alloc, 0..3);
        let mut b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.as_ptr(), b.as_ptr());
        b[1].set_value(42);
        assert_eq!(a[1].value(), 1);
        assert_eq!(alloc.live_blocks(), 2);
    }

    #[test]
    fn clone_from_reuses_capacity() {
        let mut dst = DynVec::with_capacity(8);
        dst.push(String::from("old"));
        let src = dynvec![String::from("a"), String::from("b")];
        let ptr = dst.as_ptr();
        dst.clone_from(&src);
        assert_eq!(dst, src);
        assert_eq!(dst.as_ptr(), ptr);
    }

    #[test]
    fn take_moves_storage_and_leaves_source_empty() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut a = tracked_range(&alloc, 0..3);
        let ptr = a.as_ptr();
        let before = Tracked::counters();
        let b = a.take();
        assert_eq!(Tracked::counters(), before);
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.as_ptr(), ptr);
        assert!(b.iter().map(Tracked::value).eq(0..3));
        drop(a);
        assert_eq!(Tracked::counters().dropped, 0);
    }

    #[test]
    fn assign_replaces_contents() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..3);
        v.assign((10..12).map(Tracked::new));
        assert!(v.iter().map(Tracked::value).eq(10..12));
        assert_eq!(events::dropped_values(), vec![0, 1, 2]);
        assert_eq!(Tracked::counters().live(), 2);
    }

    #[test]
    fn assign_elem_replaces_contents() {
        let mut v = dynvec![1, 2, 3];
        v.assign_elem(5, 7);
        assert_eq!(v, [7, 7, 7, 7, 7]);
        assert_eq!(v.capacity(), 5);
        v.assign_elem(0, 1);
        assert!(v.is_empty());
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut v = dynvec![1];
        v.resize(3, 0);
        assert_eq!(v, [1, 0, 0]);
        v.resize(1, 9);
        assert_eq!(v, [1]);
        let mut n = 0;
        v.resize_with(4, || {
            n += 1;
            n
        });
        assert_eq!(v, [1, 1, 2, 3]);
    }

    #[test]
    fn extend_from_slice_and_refs() {
        let mut v = dynvec![1, 2];
        v.extend_from_slice(&[3, 4]);
        v.extend(&[5, 6]);
        assert_eq!(v, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn retain_keeps_order_and_drops_rest() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..6);
        v.retain(|t| t.value() % 2 == 0);
        assert!(v.iter().map(Tracked::value).eq([0, 2, 4]));
        assert_eq!(events::dropped_values(), vec![1, 3, 5]);
    }

    #[test]
    fn reverse_iteration() {
        let v = dynvec![1, 2, 3];
        assert!(v.rev_iter().copied().eq([3, 2, 1]));
        assert!(v.iter().rev().copied().eq([3, 2, 1]));
    }

    #[test]
    fn iter_mut_writes_through() {
        let mut v = dynvec![1, 2, 3];
        for x in &mut v {
            *x *= 10;
        }
        assert_eq!(v, [10, 20, 30]);
    }

    #[test]
    fn panic_in_clone_drops_constructed_prefix_once() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let seed = Tracked::new(1);
        Tracked::arm_clone_panic(2);
        let result = catch_unwind(AssertUnwindSafe(|| {
            DynVec::try_from_elem_in(5, seed.clone(), alloc.clone())
        }));
        assert!(result.is_err());
        // The argument clone and one element clone succeed, the next one
        // panics. Only `seed` is still alive.
        assert_eq!(Tracked::counters().live(), 1);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn panic_during_clone_of_container_leaves_source_intact() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let a = tracked_range(&alloc, 0..4);
        Tracked::arm_clone_panic(2);
        let result = catch_unwind(AssertUnwindSafe(|| a.clone()));
        assert!(result.is_err());
        assert_eq!(Tracked::counters().live(), 4);
        assert!(a.iter().map(Tracked::value).eq(0..4));
        assert_eq!(alloc.live_blocks(), 1);
    }

    #[test]
    fn panic_in_default_drops_constructed_prefix_once() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        Tracked::arm_default_panic(2);
        let result = catch_unwind(AssertUnwindSafe(|| {
            DynVec::<Tracked, _>::try_from_default_in(5, alloc.clone())
        }));
        assert!(result.is_err());
        assert_eq!(Tracked::counters().constructed, 2);
        assert_eq!(Tracked::counters().live(), 0);
        assert_eq!(alloc.destroys(), 2);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn panic_in_resize_with_keeps_filled_prefix() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..2);
        let mut next = 10;
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.resize_with(6, || {
                if next == 13 {
                    panic!("generator exhausted");
                }
                next += 1;
                Tracked::new(next - 1)
            })
        }));
        assert!(result.is_err());
        assert!(v.iter().map(Tracked::value).eq([0, 1, 10, 11, 12]));
        assert_eq!(Tracked::counters().live(), 5);
        drop(v);
        assert_eq!(Tracked::counters().live(), 0);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn elements_go_through_allocator_hooks() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::new_in(alloc.clone());
        for s in ["a", "b", "c"] {
            v.push(String::from(s));
        }
        assert_eq!(alloc.constructs(), 3);
        v.insert(1, String::from("x"));
        assert_eq!(alloc.constructs(), 4);
        v.truncate(3);
        assert_eq!(alloc.destroys(), 1);
        v.retain(|s| s != "x");
        assert_eq!(alloc.destroys(), 2);
        drop(v);
        assert_eq!(alloc.destroys(), 4);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn borrowed_allocator_keeps_hooks() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::new_in(&alloc);
        v.extend([1u32, 2, 3]);
        drop(v);
        assert_eq!(alloc.constructs(), 3);
        assert_eq!(alloc.destroys(), 3);
    }

    #[test]
    fn failed_shrink_reports_error_and_keeps_block() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::with_capacity_in(8, alloc.clone());
        v.extend([1u64, 2, 3]);
        let ptr = v.as_ptr();
        alloc.set_fail_after(Some(0));
        let err = v.try_shrink_to_fit().unwrap_err();
        assert_eq!(err, AllocError::Exhausted { bytes: 24, align: 8 });
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.as_ptr(), ptr);
        assert_eq!(v, [1, 2, 3]);
        alloc.set_fail_after(None);
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 3);
    }

    #[test]
    #[should_panic(expected = "DynVec::shrink_to_fit: allocation failed")]
    fn shrink_to_fit_panics_on_failure() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::with_capacity_in(4, alloc.clone());
        v.push(1u8);
        alloc.set_fail_after(Some(0));
        v.shrink_to_fit();
    }

    #[test]
    fn panic_in_retain_keeps_kept_and_unvisited() {
        Tracked::reset_counters();
        let alloc = LedgerAllocator::new();
        let mut v = tracked_range(&alloc, 0..6);
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.retain(|t| {
                if t.value() == 3 {
                    panic!("predicate failed");
                }
                t.value() % 2 == 0
            })
        }));
        assert!(result.is_err());
        assert!(v.iter().map(Tracked::value).eq([0, 2, 3, 4, 5]));
        assert_eq!(events::dropped_values(), vec![1]);
        drop(v);
        assert_eq!(Tracked::counters().live(), 0);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn zero_sized_elements() {
        let alloc = LedgerAllocator::new();
        let mut v = DynVec::new_in(alloc.clone());
        for _ in 0..100 {
            v.push(());
        }
        assert_eq!(v.len(), 100);
        assert_eq!(v.pop(), Some(()));
        assert_eq!(alloc.allocations(), 0);
    }

    #[test]
    fn debug_formats_as_list() {
        assert_eq!(format!("{:?}", dynvec![1, 2]), "[1, 2]");
    }

    #[test]
    fn equality_across_allocators() {
        let a = DynVec::from_iter_in([1, 2], LedgerAllocator::new());
        let b = dynvec![1, 2];
        assert_eq!(a, b);
        assert_eq!(b, &[1, 2][..]);
    }

    #[test]
    fn hash_matches_slice() {
        use std::collections::hash_map::DefaultHasher;

        let v = dynvec![1u8, 2, 3];
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        v.hash(&mut h1);
        [1u8, 2, 3][..].hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn is_empty_iff_len_zero() {
        let mut v = DynVec::with_capacity(4);
        assert!(v.is_empty() && v.len() == 0);
        v.push(1);
        assert!(!v.is_empty() && v.len() == 1);
        v.clear();
        assert!(v.is_empty() && v.len() == 0);
        assert_eq!(v.capacity(), 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(u64),
            Pop,
            Insert(usize, u64),
            Remove(usize),
            Truncate(usize),
            Reserve(usize),
            ShrinkToFit,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => any::<u64>().prop_map(Op::Push),
                1 => Just(Op::Pop),
                2 => (any::<usize>(), any::<u64>()).prop_map(|(i, v)| Op::Insert(i, v)),
                1 => any::<usize>().prop_map(Op::Remove),
                1 => (0usize..20).prop_map(Op::Truncate),
                1 => (0usize..20).prop_map(Op::Reserve),
                1 => Just(Op::ShrinkToFit),
            ]
        }

        proptest! {
            #[test]
            fn matches_std_vec_model(ops in proptest::collection::vec(op(), 0..80)) {
                Tracked::reset_counters();
                let alloc = LedgerAllocator::new();
                {
                    let mut v = DynVec::new_in(alloc.clone());
                    let mut model: Vec<u64> = Vec::new();
                    for op in ops {
                        match op {
                            Op::Push(x) => {
                                v.push(Tracked::new(x));
                                model.push(x);
                            }
                            Op::Pop => {
                                prop_assert_eq!(v.pop().map(|t| t.value()), model.pop());
                            }
                            Op::Insert(i, x) => {
                                let i = i % (model.len() + 1);
                                v.insert(i, Tracked::new(x));
                                model.insert(i, x);
                            }
                            Op::Remove(i) => {
                                if !model.is_empty() {
                                    let i = i % model.len();
                                    prop_assert_eq!(v.remove(i).value(), model.remove(i));
                                }
                            }
                            Op::Truncate(n) => {
                                v.truncate(n);
                                model.truncate(n);
                            }
                            Op::Reserve(n) => v.reserve(n),
                            Op::ShrinkToFit => v.shrink_to_fit(),
                        }
                        prop_assert!(v.len() <= v.capacity());
                        prop_assert!(v.iter().map(Tracked::value).eq(model.iter().copied()));
                        prop_assert_eq!(Tracked::counters().live(), model.len());
                        prop_assert!(alloc.live_blocks() <= 1);
                    }
                }
                prop_assert_eq!(Tracked::counters().live(), 0);
                prop_assert!(alloc.is_balanced());
            }

            #[test]
            fn pushes_survive_every_reallocation(values in proptest::collection::vec(any::<u32>(), 0..200)) {
                let mut v = DynVec::new();
                for (i, &x) in values.iter().enumerate() {
                    v.push(x);
                    prop_assert_eq!(&v[..=i], &values[..=i]);
                }
                prop_assert_eq!(v.len(), values.len());
            }

            #[test]
            fn out_of_range_beyond_len(len in 0usize..32, extra in 0usize..64) {
                let v = DynVec::from_elem(len, 0u8);
                let index = len + extra;
                prop_assert_eq!(v.at(index), Err(OutOfRange { index, len }));
            }
        }
    }
}
