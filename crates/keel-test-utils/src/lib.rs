//! Test utilities for keel development.
//!
//! Provides the correctness oracle used across the workspace:
//!
//! - [`Tracked`]: an element type with live construction/destruction
//!   counters and an armable clone panic.
//! - [`LedgerAllocator`]: an allocator that records every live block and
//!   rejects double frees, with optional failure injection.
//! - [`events`]: a per-thread log interleaving drops and deallocations.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod events;
pub mod ledger;
pub mod tracked;

pub use events::Event;
pub use ledger::LedgerAllocator;
pub use tracked::{Counters, Tracked};
