//! Single-owner heap handle.
//!
//! A [`UniqueHandle`] is either empty or the sole owner of one `T` living
//! in storage obtained from its allocator. Ownership moves with the
//! handle; there is no `Clone`. The pointee is destroyed and its storage
//! released exactly once, when the handle is dropped, reset or assigned
//! over.

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use keel_core::{AllocError, Allocator, Global};

/// Exclusive owner of one heap-allocated `T`, or empty.
///
/// # Invariants
///
/// - `ptr` is `Some` only while a live `T` is owned, and that `T` was
///   allocated by `alloc` (or an allocator it was cloned from).
/// - No other handle owns the same address.
///
/// Moving a handle transfers ownership; the moved-from binding is gone.
/// Assigning over a live handle drops it first, which destroys the old
/// pointee.
pub struct UniqueHandle<T, A: Allocator = Global> {
    ptr: Option<NonNull<T>>,
    alloc: A,
    _owns: PhantomData<T>,
}

// SAFETY: the handle owns its `T` exclusively, like `Box<T>`.
unsafe impl<T: Send, A: Allocator + Send> Send for UniqueHandle<T, A> {}
// SAFETY: `&UniqueHandle` only hands out `&T`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for UniqueHandle<T, A> {}

impl<T> UniqueHandle<T> {
    /// Move `value` into fresh heap storage.
    ///
    /// # Panics
    ///
    /// Panics if the global allocator fails.
    pub fn new(value: T) -> Self {
        Self::new_in(value, Global)
    }

    /// A handle that owns nothing.
    pub const fn empty() -> Self {
        Self {
            ptr: None,
            alloc: Global,
            _owns: PhantomData,
        }
    }

    /// Take ownership of a raw address from the global allocator.
    ///
    /// # Safety
    ///
    /// See [`UniqueHandle::from_raw_in`].
    pub unsafe fn from_raw(ptr: NonNull<T>) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { Self::from_raw_in(ptr, Global) }
    }
}

impl<T, A: Allocator> UniqueHandle<T, A> {
    /// Move `value` into storage from `alloc`.
    ///
    /// On failure `value` is dropped and the error returned; nothing is
    /// leaked.
    pub fn try_new_in(value: T, alloc: A) -> Result<Self, AllocError> {
        let ptr = alloc.allocate_array::<T>(1)?;
        // SAFETY: fresh storage for exactly one `T`.
        unsafe { alloc.construct(ptr, value) };
        Ok(Self {
            ptr: Some(ptr),
            alloc,
            _owns: PhantomData,
        })
    }

    /// Move `value` into storage from `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if `alloc` fails.
    pub fn new_in(value: T, alloc: A) -> Self {
        match Self::try_new_in(value, alloc) {
            Ok(handle) => handle,
            Err(err) => panic!("UniqueHandle::new_in: {err}"),
        }
    }

    /// A handle that owns nothing but holds `alloc` for later resets.
    pub const fn empty_in(alloc: A) -> Self {
        Self {
            ptr: None,
            alloc,
            _owns: PhantomData,
        }
    }

    /// Take ownership of `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must hold a live `T` in storage for one `T` obtained from
    /// `alloc` (typically via [`release`](Self::release) on a handle using
    /// the same allocator), and no other owner may use or free it
    /// afterwards. Handing one address to two handles is a double free.
    pub unsafe fn from_raw_in(ptr: NonNull<T>, alloc: A) -> Self {
        Self {
            ptr: Some(ptr),
            alloc,
            _owns: PhantomData,
        }
    }

    /// The owned address, without giving up ownership.
    pub fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Whether an object is owned.
    pub fn is_some(&self) -> bool {
        self.ptr.is_some()
    }

    /// Whether the handle is empty.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Shared access to the pointee, if any.
    pub fn get_ref(&self) -> Option<&T> {
        // SAFETY: a `Some` pointer always holds a live `T` we own.
        self.ptr.map(|p| unsafe { &*p.as_ptr() })
    }

    /// Exclusive access to the pointee, if any.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        self.ptr.map(|p| unsafe { &mut *p.as_ptr() })
    }

    /// The allocator this handle releases storage to.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Give up ownership without destroying the pointee.
    ///
    /// The handle becomes empty. The caller now owns the returned address
    /// and must eventually destroy and free it, usually by passing it back
    /// to [`from_raw_in`](Self::from_raw_in) with the same allocator.
    #[must_use = "the released object leaks unless it is reclaimed"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Destroy the owned object, if any, and become empty.
    pub fn reset(&mut self) {
        if let Some(old) = self.ptr.take() {
            // SAFETY: `old` was owned by this handle and is now detached.
            unsafe { dispose(&self.alloc, old) };
        }
    }

    /// Destroy the owned object, if any, and take ownership of `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr`, when `Some`, must satisfy the contract of
    /// [`from_raw_in`](Self::from_raw_in) for this handle's allocator, and
    /// must not be the address this handle already owns.
    pub unsafe fn reset_raw(&mut self, ptr: Option<NonNull<T>>) {
        let old = std::mem::replace(&mut self.ptr, ptr);
        if let Some(old) = old {
            // SAFETY: `old` is detached from the handle.
            unsafe { dispose(&self.alloc, old) };
        }
    }

    /// Own a newly allocated `value`, destroying the previous pointee.
    ///
    /// The new storage is obtained first: if that fails the handle still
    /// owns its previous object and `value` is dropped.
    pub fn try_reset_with(&mut self, value: T) -> Result<(), AllocError> {
        let fresh = self.alloc.allocate_array::<T>(1)?;
        // SAFETY: fresh storage for exactly one `T`.
        unsafe {
            self.alloc.construct(fresh, value);
            self.reset_raw(Some(fresh));
        }
        Ok(())
    }

    /// Own a newly allocated `value`, destroying the previous pointee.
    ///
    /// # Panics
    ///
    /// Panics if the allocator fails.
    pub fn reset_with(&mut self, value: T) {
        if let Err(err) = self.try_reset_with(value) {
            panic!("UniqueHandle::reset_with: {err}");
        }
    }

    /// Exchange pointees (and allocators) with `other`. Nothing is
    /// destroyed.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Move the pointee out into a new handle, leaving this one empty.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        Self {
            ptr: self.ptr.take(),
            alloc: self.alloc.clone(),
            _owns: PhantomData,
        }
    }

    /// Move the value out of the heap and release the storage.
    pub fn into_inner(self) -> Option<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so reading the allocator out
        // leaves no second owner behind.
        let alloc = unsafe { ptr::read(&this.alloc) };
        let owned = this.ptr?;
        // SAFETY: we own a live `T` at `owned`; after reading it the slot
        // is dead and only the storage remains to free.
        unsafe {
            let value = owned.as_ptr().read();
            alloc.deallocate_array(owned, 1);
            Some(value)
        }
    }
}

/// Destroy the `T` at `ptr`, then free its storage.
///
/// The storage is released even if the destructor panics.
///
/// # Safety
///
/// `ptr` must hold a live `T` allocated by `alloc`, owned by the caller.
unsafe fn dispose<T, A: Allocator>(alloc: &A, ptr: NonNull<T>) {
    struct Release<'a, T, A: Allocator> {
        alloc: &'a A,
        ptr: NonNull<T>,
    }

    impl<T, A: Allocator> Drop for Release<'_, T, A> {
        fn drop(&mut self) {
            // SAFETY: storage for one `T` from `alloc`; the value in it is
            // already destroyed.
            unsafe { self.alloc.deallocate_array(self.ptr, 1) };
        }
    }

    let _release = Release { alloc, ptr };
    // SAFETY: caller contract.
    unsafe { alloc.destroy(ptr) };
}

impl<T, A: Allocator> Drop for UniqueHandle<T, A> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T, A: Allocator + Default> Default for UniqueHandle<T, A> {
    fn default() -> Self {
        Self::empty_in(A::default())
    }
}

impl<T> From<T> for UniqueHandle<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, A: Allocator> Deref for UniqueHandle<T, A> {
    type Target = T;

    /// # Panics
    ///
    /// Dereferencing an empty handle is a precondition violation and
    /// panics.
    fn deref(&self) -> &T {
        match self.get_ref() {
            Some(value) => value,
            None => panic!("dereferenced an empty UniqueHandle"),
        }
    }
}

impl<T, A: Allocator> DerefMut for UniqueHandle<T, A> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(value) => value,
            None => panic!("dereferenced an empty UniqueHandle"),
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for UniqueHandle<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_ref() {
            Some(value) => f.debug_tuple("UniqueHandle").field(value).finish(),
            None => f.write_str("UniqueHandle(<empty>)"),
        }
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<UniqueHandle<T, B>>
    for UniqueHandle<T, A>
{
    fn eq(&self, other: &UniqueHandle<T, B>) -> bool {
        self.get_ref() == other.get_ref()
    }
}

impl<T: Eq, A: Allocator> Eq for UniqueHandle<T, A> {}
