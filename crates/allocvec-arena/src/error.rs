// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for allocvec-arena.

use allocvec_core::AllocError;
use thiserror::Error;

/// Errors that can occur during arena operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ArenaError {
    /// `mmap` refused to map a new block.
    #[error("mmap failed for a block of {bytes} bytes")]
    MapFailed {
        /// Size of the block that could not be mapped.
        bytes: usize,
    },

    /// Alignment is not a power of two, or exceeds the page size.
    #[error("invalid alignment: {align}")]
    InvalidAlignment {
        /// Requested alignment.
        align: usize,
    },

    /// Request size plus alignment padding overflows `usize`.
    #[error("requested size overflows the address space")]
    SizeOverflow,

    /// Blocks must be mapped readable and writable.
    #[error("protection {protection:#x} lacks PROT_READ | PROT_WRITE")]
    InvalidProtection {
        /// Rejected `mmap` protection flags.
        protection: i32,
    },

    /// `sysconf(_SC_PAGESIZE)` did not report a usable page size.
    #[error("page size unavailable (sysconf returned {raw})")]
    PageSizeUnavailable {
        /// Raw value returned by `sysconf`.
        raw: i64,
    },
}

impl From<ArenaError> for AllocError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::InvalidAlignment { align } => AllocError::UnsupportedAlignment { align },
            ArenaError::InvalidProtection { .. } | ArenaError::PageSizeUnavailable { .. } => {
                AllocError::Unsupported
            }
            ArenaError::MapFailed { .. } | ArenaError::SizeOverflow => AllocError::Exhausted,
        }
    }
}
