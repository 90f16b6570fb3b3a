//! Owning iterator over a [`DynVec`](crate::DynVec).

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use keel_core::Allocator;

use crate::raw::RawBlock;

/// Moves elements out of a consumed [`DynVec`](crate::DynVec).
///
/// Slots `[start, end)` still hold values; everything outside that window
/// has been moved out. Dropping the iterator destroys the remaining values
/// and then releases the storage.
pub struct IntoIter<T, A: Allocator> {
    buf: RawBlock<T, A>,
    start: usize,
    end: usize,
}

// SAFETY: the iterator owns the remaining elements exclusively.
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
// SAFETY: shared access only exposes `&[T]`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(buf: RawBlock<T, A>, len: usize) -> Self {
        Self {
            buf,
            start: 0,
            end: len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is initialised and within the block.
        unsafe { slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }

    /// The elements not yet yielded, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, with exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.slot(self.start), self.end - self.start) }
    }

    /// The allocator the storage came from.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: `index` was inside the live window, which no longer
        // covers it, so the value is read out exactly once.
        Some(unsafe { self.buf.slot(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: as in `next`, from the other end.
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        // SAFETY: the window held the only values still owned and is now
        // empty; the block field releases the storage afterwards.
        unsafe { self.buf.destroy_range(start, end) };
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
