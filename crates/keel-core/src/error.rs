//! Storage and access error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur when acquiring raw storage.
///
/// Returned by [`Allocator::allocate`](crate::Allocator::allocate) and
/// propagated unchanged by every container operation that allocates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The backing allocator could not satisfy the request.
    Exhausted {
        /// Number of bytes requested.
        bytes: usize,
        /// Alignment requested.
        align: usize,
    },
    /// The requested element count cannot be expressed as a valid layout
    /// (the byte size overflows `isize::MAX`).
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { bytes, align } => {
                write!(
                    f,
                    "allocation failed: requested {bytes} bytes with alignment {align}"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements do not fit a layout")
            }
        }
    }
}

impl Error for AllocError {}

/// A bounds-checked access named an index outside `[0, len)`.
///
/// Checked against the logical length, never against capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The index that was requested.
    pub index: usize,
    /// The logical length at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for length {}",
            self.index, self.len
        )
    }
}

impl Error for OutOfRange {}
