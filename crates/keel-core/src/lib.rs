//! Core allocation types for keel containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! allocator seam every container is generic over, the growth policy
//! that governs reallocation, and the error types surfaced by storage
//! and bounds-checked access.
//!
//! # Storage model
//!
//! ```text
//! Allocator (trait)
//! ├── Global          process heap via std::alloc
//! ├── Bounded<A>      byte budget over another allocator
//! └── &A              borrow one allocator from several containers
//!
//! allocate_array::<T>(n)    raw storage, nothing constructed
//! construct / destroy       one element, in place
//! deallocate_array::<T>     release storage, no destructors
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod alloc;
pub mod bounded;
pub mod config;
pub mod error;

// Public re-exports for the primary API surface.
pub use alloc::{array_layout, Allocator, Global};
pub use bounded::Bounded;
pub use config::GrowthPolicy;
pub use error::{AllocError, OutOfRange};
