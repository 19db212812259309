// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ArenaAllocator - the arena seen through the allocator capability.

use core::alloc::Layout;
use core::ptr::NonNull;

use allocvec_core::{AllocError, Allocator, Capabilities};

use crate::arena::Arena;

/// Allocate-only view of an [`Arena`].
///
/// No reallocate, no release: containers fall back to allocate-copy and
/// leave their old buffers to the arena, which reclaims them on reset.
#[derive(Debug, Clone, Copy)]
pub struct ArenaAllocator<'a> {
    arena: &'a Arena,
}

impl<'a> ArenaAllocator<'a> {
    /// Wraps `arena`.
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena }
    }

    /// The arena behind this allocator.
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }
}

// SAFETY: Arena::new only maps readable and writable blocks, bump
// allocations never overlap, and reset() needs &mut Arena, which cannot be
// obtained while this borrow lives.
unsafe impl Allocator for ArenaAllocator<'_> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALLOCATE_ONLY
    }

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.arena
            .alloc_aligned(layout.size(), layout.align())
            .map_err(AllocError::from)
    }
}
