// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! mmap-backed bump arena usable as an allocate-only allocator.
//!
//! An [`Arena`] maps memory in blocks and hands out pieces of them with a
//! bump cursor. Individual allocations are never freed: the whole arena is
//! reset or unmapped at once by its owner.
//!
//! [`ArenaAllocator`] adapts an arena to the [`Allocator`] capability. It only
//! supports `allocate`, so any container using it must grow through the
//! allocate-copy path and abandon its old buffers to the arena.
//!
//! # Example
//!
//! ```rust
//! #[cfg(unix)]
//! fn example() -> Result<(), allocvec_arena::ArenaError> {
//!     use allocvec_arena::{Arena, ArenaConfig};
//!     use allocvec_core::{Allocator, Capabilities};
//!
//!     let arena = Arena::new(ArenaConfig::default())?;
//!     let allocator = arena.allocator();
//!     assert_eq!(allocator.capabilities(), Capabilities::ALLOCATE_ONLY);
//!
//!     let block = arena.alloc_aligned(24, 8)?;
//!     assert_eq!(block.as_ptr() as usize % 8, 0);
//!     Ok(())
//! }
//! # #[cfg(unix)]
//! # example().unwrap();
//! ```
//!
//! [`Allocator`]: allocvec_core::Allocator

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(all(test, unix))]
mod tests;

#[cfg(unix)]
mod adapter;
#[cfg(unix)]
mod arena;
#[cfg(unix)]
mod block;

mod config;
mod error;

#[cfg(unix)]
pub use adapter::ArenaAllocator;
#[cfg(unix)]
pub use arena::Arena;

pub use config::ArenaConfig;
pub use error::ArenaError;
