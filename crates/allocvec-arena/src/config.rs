// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Immutable once the arena is created.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ArenaConfig {
    /// Minimum size of each mapped block in bytes.
    ///
    /// Rounded up to the page size. Requests larger than a block get a
    /// dedicated block of their own size.
    pub block_size: usize,

    /// `mmap` protection flags for every block (`PROT_READ | PROT_WRITE` by default).
    ///
    /// Must include both `PROT_READ` and `PROT_WRITE`; extra flags such as
    /// `PROT_EXEC` are passed through.
    pub protection: i32,
}

impl ArenaConfig {
    /// Default block size: 1 MiB.
    pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

    /// `PROT_READ | PROT_WRITE`.
    pub const DEFAULT_PROTECTION: i32 = 0x1 | 0x2;

    /// Alignment used when a caller passes `0` as alignment.
    pub const DEFAULT_ALIGN: usize = 2 * core::mem::size_of::<usize>();

    /// Creates a config with the given block size and default protection.
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            ..Self::default()
        }
    }

    /// Checks that blocks will be mapped readable and writable.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.protection & Self::DEFAULT_PROTECTION != Self::DEFAULT_PROTECTION {
            return Err(ArenaError::InvalidProtection {
                protection: self.protection,
            });
        }

        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            protection: Self::DEFAULT_PROTECTION,
        }
    }
}
