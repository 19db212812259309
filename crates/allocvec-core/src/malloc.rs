// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! MallocAllocator - C heap allocator.
//!
//! Thin pass-through to `malloc`/`realloc`/`free`. Works everywhere libc does,
//! no alignment beyond what `malloc` already guarantees.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::traits::{Allocator, Capabilities};

/// `malloc` / `realloc` / `free`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct MallocAllocator;

impl MallocAllocator {
    /// Alignment `malloc` guarantees for every block (`2 * size_of::<usize>()`).
    pub const MAX_ALIGN: usize = 2 * core::mem::size_of::<usize>();

    #[inline(always)]
    fn check_align(layout: Layout) -> Result<(), AllocError> {
        if layout.align() > Self::MAX_ALIGN {
            return Err(AllocError::UnsupportedAlignment {
                align: layout.align(),
            });
        }

        Ok(())
    }
}

// SAFETY: malloc and realloc return blocks of at least the requested size,
// aligned to MAX_ALIGN, that stay exclusive until free.
unsafe impl Allocator for MallocAllocator {
    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        Self::check_align(layout)?;

        // malloc(0) may legally return NULL, which would read as exhaustion.
        // SAFETY: plain libc call with a non-zero size.
        let ptr = unsafe { libc::malloc(layout.size().max(1)) };

        NonNull::new(ptr.cast()).ok_or(AllocError::Exhausted)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        Self::check_align(old_layout)?;

        // SAFETY: caller guarantees ptr came from malloc/realloc and is live.
        // realloc leaves the original block intact when it returns NULL.
        let new_ptr = unsafe { libc::realloc(ptr.as_ptr().cast(), new_size.max(1)) };

        NonNull::new(new_ptr.cast()).ok_or(AllocError::Exhausted)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, _layout: Layout) {
        // SAFETY: caller guarantees ptr came from malloc/realloc and is live.
        unsafe { libc::free(ptr.as_ptr().cast()) };
    }
}
