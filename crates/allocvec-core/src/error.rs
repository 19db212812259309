// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for allocvec-core.

use thiserror::Error;

/// Errors reported by an [`Allocator`](crate::Allocator).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The memory source could not satisfy the request.
    #[error("allocator is out of memory")]
    Exhausted,

    /// The allocator does not provide this operation.
    #[error("operation not supported by this allocator")]
    Unsupported,

    /// The requested alignment is stricter than what the allocator guarantees.
    #[error("alignment {align} is not supported by this allocator")]
    UnsupportedAlignment {
        /// Requested alignment in bytes.
        align: usize,
    },
}
