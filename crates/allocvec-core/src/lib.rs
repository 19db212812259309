// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Pluggable allocator capability for allocator-agnostic containers.
//!
//! A container built on this crate never talks to a fixed memory source.
//! Instead it receives an [`Allocator`] at construction time and performs
//! every storage decision through it.
//!
//! # Capabilities
//!
//! An allocator exposes up to three operations:
//!
//! - **allocate** (required): hand out a fresh block.
//! - **reallocate** (optional): resize a block, possibly moving it.
//! - **release** (optional): give a block back.
//!
//! Which of them are present is reported by [`Allocator::capabilities`].
//! Containers read the [`Capabilities`] once and pick their growth path
//! accordingly: an allocator without `reallocate` forces an
//! allocate-copy-release path, an allocator without `release` means old
//! buffers are simply abandoned (the arena case, where memory is reclaimed in
//! bulk by the arena's owner).
//!
//! # Implementations
//!
//! - [`MallocAllocator`]: `malloc`/`realloc`/`free` from the C heap.
//! - [`AllocatorRecord`]: a capability record of optional function slots bound
//!   to an opaque context pointer. [`AllocatorRecord::malloc`] builds the heap
//!   allocator in this form.
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//! use allocvec_core::{AllocError, Allocator, MallocAllocator};
//!
//! fn example() -> Result<(), AllocError> {
//!     let allocator = MallocAllocator;
//!     assert!(allocator.capabilities().reallocate);
//!
//!     let layout = Layout::from_size_align(64, 8).expect("valid layout");
//!     let ptr = allocator.allocate(layout)?;
//!
//!     unsafe { allocator.release(ptr, layout) };
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "test-utils"))]
mod instrumented;

mod error;
mod malloc;
mod record;
mod traits;

pub use error::AllocError;
pub use malloc::MallocAllocator;
pub use record::{AllocateFn, AllocatorRecord, ReallocateFn, ReleaseFn};
pub use traits::{Allocator, Capabilities};

#[cfg(any(test, feature = "test-utils"))]
pub use instrumented::{AllocatorBehaviour, AllocatorStats, InstrumentedAllocator};
