// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for allocvec.

use allocvec_core::AllocError;
use thiserror::Error;

/// Errors returned by vector construction and mutation.
///
/// Every failed mutation leaves the vector exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VectorError {
    /// Elements must occupy at least one byte.
    #[error("element size must be greater than zero")]
    ZeroElementSize,

    /// The allocator cannot allocate, so no storage could ever be obtained.
    #[error("allocator does not provide allocate")]
    MissingAllocate,

    /// A [`VectorConfig`](crate::VectorConfig) field is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Index is past the end of the vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },

    /// Element bytes do not match the vector's element size.
    #[error("element is {actual} bytes, expected {expected}")]
    ElementSizeMismatch {
        /// The vector's element size.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Attempted to pop from an empty vector.
    #[error("vector is empty")]
    Empty,

    /// `capacity * element_size` does not fit in the address space.
    ///
    /// Checked before any multiplication that could wrap.
    #[error("capacity {capacity} with element size {element_size} overflows the address space")]
    CapacityOverflow {
        /// Requested capacity in elements.
        capacity: usize,
        /// Element size in bytes.
        element_size: usize,
    },

    /// The allocator failed to provide storage.
    #[error("allocation of {bytes} bytes failed: {source}")]
    AllocationFailed {
        /// Size of the failed request.
        bytes: usize,
        /// What the allocator reported.
        source: AllocError,
    },
}

impl VectorError {
    /// Returns `true` for programmer errors (bad index, wrong element size,
    /// popping an empty vector), as opposed to resource failures.
    ///
    /// These are the errors that panic under
    /// [`ContractMode::Strict`](crate::ContractMode::Strict).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::ElementSizeMismatch { .. } | Self::Empty
        )
    }
}
