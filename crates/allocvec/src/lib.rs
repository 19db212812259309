// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous vector over a pluggable allocator capability.
//!
//! The vector never picks a memory source on its own: every allocation,
//! reallocation and release goes through the [`Allocator`] handed to it at
//! construction.
//!
//! # Core Guarantees
//!
//! - **Allocator-agnostic growth**: with `reallocate` the storage is resized
//!   in place; without it the vector allocates, copies and releases. An
//!   allocator that can neither reallocate nor release (an arena) is fully
//!   supported: old buffers are simply left to the arena.
//! - **Overflow-safe sizing**: `capacity * element_size` is checked before
//!   any multiplication that could wrap. Growth saturates at the largest
//!   representable capacity.
//! - **Failure atomicity**: every mutation either succeeds completely or
//!   leaves length, capacity and live element bytes exactly as they were.
//! - **Two-tier errors**: contract violations (bad index, wrong element size,
//!   popping an empty vector) panic under [`ContractMode::Strict`] and are
//!   returned under [`ContractMode::Tolerant`]; allocator failures are always
//!   returned.
//!
//! # Growth Policy
//!
//! A full vector grows to [`VectorConfig::initial_capacity`] (8) when it has
//! no storage yet and to `capacity * growth_factor` (x2) otherwise.
//!
//! # Example: Heap
//!
//! ```rust
//! use allocvec::{Vector, VectorError};
//!
//! fn example() -> Result<(), VectorError> {
//!     let mut vec = Vector::<u32>::with_malloc()?;
//!
//!     for i in 0..9 {
//!         vec.push(i)?;
//!     }
//!
//!     assert_eq!(vec.len(), 9);
//!     assert_eq!(vec.capacity(), 16);
//!
//!     vec.shrink_to_fit()?;
//!     assert_eq!(vec.capacity(), 9);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Arena
//!
//! ```rust
//! #[cfg(unix)]
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     use allocvec::{Arena, ArenaConfig, Vector};
//!
//!     let arena = Arena::new(ArenaConfig::default())?;
//!     let mut vec = Vector::<u32, _>::new(arena.allocator())?;
//!
//!     // Grows past the initial capacity without reallocate or release.
//!     for i in 0..20 {
//!         vec.push(i)?;
//!     }
//!
//!     assert_eq!(vec.len(), 20);
//!     Ok(())
//! }
//! # #[cfg(unix)]
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod config;
mod error;
mod raw_vector;
mod vector;

pub use config::{ContractMode, VectorConfig};
pub use error::VectorError;
pub use raw_vector::RawVector;
pub use vector::Vector;

pub use allocvec_core::{
    AllocError, AllocateFn, Allocator, AllocatorRecord, Capabilities, MallocAllocator,
    ReallocateFn, ReleaseFn,
};

#[cfg(unix)]
pub use allocvec_arena::{Arena, ArenaAllocator};

pub use allocvec_arena::{ArenaConfig, ArenaError};
