//! Single-owner heap handle for keel.
//!
//! [`UniqueHandle`] owns at most one heap-allocated value, obtained from
//! any [`Allocator`](keel_core::Allocator). Ownership is move-only: there is
//! no `Clone`, and the pointee is destroyed exactly once when the handle
//! is dropped, reset or assigned over.
//!
//! # Lifecycle
//!
//! ```text
//!            new / try_new_in / from_raw_in
//!   empty ─────────────────────────────────▶ owning(ptr)
//!     ▲                                          │
//!     │   release (caller now owns ptr)          │
//!     ├──────────────────────────────────────────┤
//!     │   reset / drop (destroy, then free)      │
//!     └──────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod handle;

pub use handle::UniqueHandle;
