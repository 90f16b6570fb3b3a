//! Dynamic contiguous sequence for keel.
//!
//! [`DynVec`] is a growable array whose storage comes from any
//! [`Allocator`](keel_core::Allocator). It separates raw capacity from
//! constructed elements:
//!
//! ```text
//! RawBlock<T, A>   ptr + cap + allocator, no element knowledge
//!      │
//! DynVec<T, A>     RawBlock + len + GrowthPolicy
//!      │
//! IntoIter<T, A>   RawBlock + live window [start, end)
//! ```
//!
//! Reallocation is strongly exception safe: the new block is obtained
//! first, elements are moved bitwise, and the old block is released last.
//! If the allocator fails, the container is left exactly as it was.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod into_iter;
mod macros;
mod raw;
pub mod vec;

pub use into_iter::IntoIter;
pub use vec::DynVec;
