//! Growth policy for containers that reallocate on demand.

use crate::error::AllocError;

/// How a container picks its next capacity when an insertion would
/// overflow the current block.
///
/// Explicit capacity requests (`ensure_capacity`, `shrink_to_fit`) are
/// always exact; the policy only governs implicit growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// Double the capacity, starting from [`GrowthPolicy::MIN_NON_ZERO_CAP`].
    ///
    /// Amortised O(1) insertion at the end.
    #[default]
    Geometric,
    /// Grow to exactly the required number of elements.
    ///
    /// Every growing insertion reallocates, so pushing `n` elements costs
    /// O(n²) element moves in total. Useful when memory is tight and the
    /// final size is known to be reached in few steps.
    Exact,
}

impl GrowthPolicy {
    /// Smallest capacity handed out by geometric growth.
    pub const MIN_NON_ZERO_CAP: usize = 4;

    /// Capacity to grow to so that at least `required` elements fit.
    ///
    /// Returns `current` unchanged if it already suffices.
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        if required <= current {
            return current;
        }
        match self {
            Self::Exact => required,
            Self::Geometric => current
                .saturating_mul(2)
                .max(required)
                .max(Self::MIN_NON_ZERO_CAP),
        }
    }

    /// Capacity needed to hold `len + additional` elements.
    pub fn required(len: usize, additional: usize) -> Result<usize, AllocError> {
        len.checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                requested: usize::MAX,
            })
    }
}
