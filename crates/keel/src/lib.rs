//! Keel: owning handles and contiguous containers over pluggable allocators.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all keel sub-crates. For most users, adding `keel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use keel::prelude::*;
//!
//! let mut v = dynvec![1, 2, 3];
//! v.push(4);
//! assert_eq!(v.at(3), Ok(&4));
//! assert!(v.at(4).is_err());
//!
//! // Storage can come from any allocator, here one with a byte budget.
//! let budget = Bounded::new(Global, 64);
//! let mut small: DynVec<u64, _> = DynVec::new_in(&budget);
//! small.extend([1, 2, 3, 4]);
//! assert!(small.try_reserve(100).is_err());
//! assert_eq!(small, [1, 2, 3, 4]);
//!
//! let h = UniqueHandle::new(String::from("owned"));
//! assert_eq!(h.get_ref().map(String::as_str), Some("owned"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`storage`] | `keel-core` | `Allocator`, `Global`, `Bounded`, `GrowthPolicy`, errors |
//! | [`unique`] | `keel-unique` | `UniqueHandle` |
//! | [`vec`] | `keel-vec` | `DynVec`, `IntoIter`, `dynvec!` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocator seam, growth policy and error types (`keel-core`).
///
/// Implement [`storage::Allocator`] to plug custom storage into every
/// container.
pub use keel_core as storage;

/// Single-owner heap handle (`keel-unique`).
pub use keel_unique as unique;

/// Contiguous growable sequence (`keel-vec`).
///
/// See [`vec::DynVec`] for growth and failure semantics.
pub use keel_vec as vec;

pub use keel_vec::dynvec;

/// Common imports for typical keel usage.
///
/// ```rust
/// use keel::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use keel_core::{Allocator, Bounded, Global, GrowthPolicy};

    // Errors
    pub use keel_core::{AllocError, OutOfRange};

    // Containers
    pub use keel_unique::UniqueHandle;
    pub use keel_vec::{dynvec, DynVec};
}
