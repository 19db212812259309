// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Arena - growable list of mapped blocks with bump allocation.
//!
//! Blocks are mapped lazily and kept until the arena is dropped. `reset()`
//! rewinds every cursor so the same blocks serve the next round of
//! allocations.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::ptr::{self, NonNull};

use crate::adapter::ArenaAllocator;
use crate::block::{Block, page_size};
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Position of the most recent allocation, the only one that can grow in place.
#[derive(Debug, Clone, Copy)]
struct LastAllocation {
    block: usize,
    offset: usize,
}

/// A bump arena over `mmap`'d blocks.
///
/// Allocation goes through `&self`, so any number of [`ArenaAllocator`]s can
/// borrow the same arena. `reset()` takes `&mut self`, which statically
/// guarantees no allocator (and no container holding one) outlives the
/// memory it was given.
pub struct Arena {
    blocks: RefCell<Vec<Block>>,
    /// Index of the block currently being filled.
    current: Cell<usize>,
    last: Cell<Option<LastAllocation>>,
    config: ArenaConfig,
    page_size: usize,
    block_len: usize,
}

impl Arena {
    /// Creates an arena and maps its first block.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidProtection`] unless `config.protection` has both
    ///   `PROT_READ` and `PROT_WRITE`.
    /// - [`ArenaError::PageSizeUnavailable`] if the page size cannot be read.
    /// - [`ArenaError::MapFailed`] if the first block cannot be mapped.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let page_size = page_size()?;
        let block_len =
            round_up(config.block_size.max(1), page_size).ok_or(ArenaError::SizeOverflow)?;
        let first = Block::map(block_len, config.protection)?;

        let mut blocks = Vec::new();
        blocks.push(first);

        Ok(Self {
            blocks: RefCell::new(blocks),
            current: Cell::new(0),
            last: Cell::new(None),
            config,
            page_size,
            block_len,
        })
    }

    /// Returns an allocate-only [`Allocator`](allocvec_core::Allocator) over this arena.
    pub fn allocator(&self) -> ArenaAllocator<'_> {
        ArenaAllocator::new(self)
    }

    /// The configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn normalize_align(&self, align: usize) -> Result<usize, ArenaError> {
        let align = if align == 0 {
            ArenaConfig::DEFAULT_ALIGN
        } else {
            align
        };

        if !align.is_power_of_two() || align > self.page_size {
            return Err(ArenaError::InvalidAlignment { align });
        }

        Ok(align)
    }

    /// Allocates `size` bytes with the default alignment.
    pub fn alloc(&self, size: usize) -> Result<NonNull<u8>, ArenaError> {
        self.alloc_aligned(size, 0)
    }

    /// Allocates `size` bytes aligned to `align`.
    ///
    /// `align == 0` selects [`ArenaConfig::DEFAULT_ALIGN`]. Any other value
    /// must be a power of two no larger than the page size.
    pub fn alloc_aligned(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        let align = self.normalize_align(align)?;
        let mut blocks = self.blocks.borrow_mut();

        // Current block first, then blocks left over from before a reset.
        for index in self.current.get()..blocks.len() {
            if let Some(offset) = blocks[index].fit(size, align) {
                let ptr = blocks[index].bump(offset, size);
                self.current.set(index);
                self.last.set(Some(LastAllocation {
                    block: index,
                    offset,
                }));
                return Ok(ptr);
            }
        }

        let needed = size.checked_add(align - 1).ok_or(ArenaError::SizeOverflow)?;
        let len = round_up(needed.max(self.block_len), self.page_size)
            .ok_or(ArenaError::SizeOverflow)?;

        let mut block = Block::map(len, self.config.protection)?;
        let offset = block.fit(size, align).ok_or(ArenaError::SizeOverflow)?;
        let ptr = block.bump(offset, size);

        blocks.push(block);
        let index = blocks.len() - 1;
        self.current.set(index);
        self.last.set(Some(LastAllocation {
            block: index,
            offset,
        }));

        Ok(ptr)
    }

    /// Resizes an allocation.
    ///
    /// The most recent allocation grows or shrinks in place while its block
    /// has room. Anything else is copied into a fresh allocation; the old one
    /// stays in the arena until reset.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this arena for `old_size` bytes since
    /// the last reset.
    pub unsafe fn realloc_aligned(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Result<NonNull<u8>, ArenaError> {
        let align = self.normalize_align(align)?;

        if self.try_resize_in_place(ptr, new_size, align) {
            return Ok(ptr);
        }

        let new_ptr = self.alloc_aligned(new_size, align)?;

        // SAFETY: both ranges live in this arena; a fresh bump allocation
        // never overlaps an older one.
        unsafe {
            ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), old_size.min(new_size));
        }

        Ok(new_ptr)
    }

    fn try_resize_in_place(&self, ptr: NonNull<u8>, new_size: usize, align: usize) -> bool {
        let Some(last) = self.last.get() else {
            return false;
        };

        if ptr.as_ptr() as usize % align != 0 {
            return false;
        }

        let mut blocks = self.blocks.borrow_mut();
        let block = &mut blocks[last.block];

        if block.offset_of(ptr) != Some(last.offset) {
            return false;
        }

        match last.offset.checked_add(new_size) {
            Some(end) => block.set_cursor(end),
            None => false,
        }
    }

    /// Rewinds every block. All previous allocations become invalid.
    pub fn reset(&mut self) {
        for block in self.blocks.get_mut().iter_mut() {
            block.reset();
        }

        self.current.set(0);
        self.last.set(None);
    }

    /// Bytes handed out since the last reset, alignment padding included.
    pub fn used(&self) -> usize {
        self.blocks.borrow().iter().map(Block::used).sum()
    }

    /// Total bytes currently mapped.
    pub fn mapped_bytes(&self) -> usize {
        self.blocks.borrow().iter().map(Block::len).sum()
    }

    /// Number of mapped blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.borrow().len()
    }
}

impl core::fmt::Debug for Arena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Arena")
            .field("blocks", &self.block_count())
            .field("used", &self.used())
            .field("mapped_bytes", &self.mapped_bytes())
            .finish_non_exhaustive()
    }
}

fn round_up(value: usize, multiple: usize) -> Option<usize> {
    value.checked_next_multiple_of(multiple)
}
