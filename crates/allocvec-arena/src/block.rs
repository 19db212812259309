// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Block - one mmap'd region with a bump cursor.

use core::ptr::{self, NonNull};

use crate::error::ArenaError;

/// Returns the system page size.
pub(crate) fn page_size() -> Result<usize, ArenaError> {
    // SAFETY: sysconf has no preconditions.
    page_size_from(unsafe { libc::sysconf(libc::_SC_PAGESIZE) })
}

/// Validates a raw `sysconf` answer. `-1` means the limit is unavailable.
pub(crate) fn page_size_from(raw: libc::c_long) -> Result<usize, ArenaError> {
    match usize::try_from(raw) {
        Ok(size) if size.is_power_of_two() => Ok(size),
        _ => {
            tracing::error!(raw = i64::from(raw), "arena: unusable page size");
            Err(ArenaError::PageSizeUnavailable { raw: i64::from(raw) })
        }
    }
}

/// A contiguous mapped region. Never moves, never shrinks.
#[derive(Debug)]
pub(crate) struct Block {
    ptr: NonNull<u8>,
    len: usize,
    cursor: usize,
}

impl Block {
    /// Maps `len` bytes (already rounded to a page multiple).
    pub(crate) fn map(len: usize, protection: i32) -> Result<Self, ArenaError> {
        // SAFETY: anonymous private mapping, no existing memory is touched.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                protection,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            tracing::error!(bytes = len, "arena: mmap failed");
            return Err(ArenaError::MapFailed { bytes: len });
        }

        let ptr = NonNull::new(ptr.cast()).ok_or(ArenaError::MapFailed { bytes: len })?;

        tracing::debug!(bytes = len, "arena: mapped block");

        Ok(Self {
            ptr,
            len,
            cursor: 0,
        })
    }

    /// Offset of the first `align`-aligned address at or after the cursor
    /// from which `size` bytes still fit, if any.
    pub(crate) fn fit(&self, size: usize, align: usize) -> Option<usize> {
        let base = self.ptr.as_ptr() as usize;
        let here = base.checked_add(self.cursor)?;
        let aligned = here.checked_add(align - 1)? & !(align - 1);
        let offset = aligned - base;
        let end = offset.checked_add(size)?;

        (end <= self.len).then_some(offset)
    }

    /// Bumps the cursor to `offset + size` and returns the address at `offset`.
    ///
    /// `offset` must come from [`fit`](Self::fit) with the same size.
    pub(crate) fn bump(&mut self, offset: usize, size: usize) -> NonNull<u8> {
        debug_assert!(offset + size <= self.len);
        self.cursor = offset + size;

        // SAFETY: offset <= len, so the result stays inside the mapping.
        unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(offset)) }
    }

    /// Moves the cursor to `end` if it lies inside the block.
    pub(crate) fn set_cursor(&mut self, end: usize) -> bool {
        if end > self.len {
            return false;
        }

        self.cursor = end;
        true
    }

    /// Offset of `ptr` within this block, if it points inside it.
    pub(crate) fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
        let base = self.ptr.as_ptr() as usize;
        let addr = ptr.as_ptr() as usize;

        (addr >= base && addr < base + self.len).then(|| addr - base)
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn used(&self) -> usize {
        self.cursor
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        // SAFETY: ptr and len describe a mapping owned by this block.
        unsafe { libc::munmap(self.ptr.as_ptr().cast(), self.len) };
    }
}
