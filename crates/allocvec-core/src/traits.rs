// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// The set of operations an allocator exposes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Capabilities {
    /// `allocate` is present. Containers refuse allocators without it.
    pub allocate: bool,
    /// `reallocate` is present.
    pub reallocate: bool,
    /// `release` is present.
    pub release: bool,
}

impl Capabilities {
    /// allocate + reallocate + release.
    pub const FULL: Self = Self {
        allocate: true,
        reallocate: true,
        release: true,
    };

    /// allocate only (bump arenas).
    pub const ALLOCATE_ONLY: Self = Self {
        allocate: true,
        reallocate: false,
        release: false,
    };

    /// Nothing at all. Not usable by any container.
    pub const NONE: Self = Self {
        allocate: false,
        reallocate: false,
        release: false,
    };

    /// Returns `true` if a container can be built on top of these capabilities.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.allocate
    }
}

/// A polymorphic memory source.
///
/// Only [`allocate`](Allocator::allocate) is mandatory. The default
/// [`reallocate`](Allocator::reallocate) fails with
/// [`AllocError::Unsupported`] and the default
/// [`release`](Allocator::release) does nothing, matching the default
/// [`capabilities`](Allocator::capabilities) of [`Capabilities::ALLOCATE_ONLY`].
/// Implementations overriding either operation must report it in
/// `capabilities()`, since containers only consult the capabilities.
///
/// # Safety
///
/// Containers write through the blocks they receive, so implementors must
/// guarantee:
///
/// - A block returned by `allocate` is valid for reads and writes of
///   `layout.size()` bytes.
/// - A block returned by `reallocate` is valid for reads and writes of
///   `new_size` bytes and holds the first `min(old_layout.size(), new_size)`
///   bytes of the old block. Its alignment is at least that of the old block.
/// - A block is not handed out again, nor otherwise aliased, until it has
///   been released or replaced by a successful `reallocate`.
/// - Moving the allocator does not invalidate blocks it handed out.
///
/// A safe `impl` is rejected:
///
/// ```compile_fail,E0200
/// use core::alloc::Layout;
/// use core::ptr::NonNull;
/// use allocvec_core::{AllocError, Allocator};
///
/// struct Dangling;
///
/// impl Allocator for Dangling {
///     fn allocate(&self, _layout: Layout) -> Result<NonNull<u8>, AllocError> {
///         Ok(NonNull::dangling())
///     }
/// }
/// ```
pub unsafe trait Allocator {
    /// Reports which operations this allocator supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALLOCATE_ONLY
    }

    /// Allocates a block of `layout.size()` bytes.
    ///
    /// The contents of the block are unspecified.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Resizes the block at `ptr` to `new_size` bytes, keeping the first
    /// `min(old_layout.size(), new_size)` bytes.
    ///
    /// On failure the original block is left untouched and stays owned by
    /// the caller.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old_layout` and
    /// must not have been released.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        let _ = (ptr, old_layout, new_size);
        Err(AllocError::Unsupported)
    }

    /// Gives the block at `ptr` back to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and must
    /// not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        let _ = (ptr, layout);
    }
}

// SAFETY: forwards every call to A, which upholds the contract.
unsafe impl<A> Allocator for &A
where
    A: Allocator + ?Sized,
{
    #[inline]
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: forwarded verbatim, caller upholds the contract.
        unsafe { (**self).reallocate(ptr, old_layout, new_size) }
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded verbatim, caller upholds the contract.
        unsafe { (**self).release(ptr, layout) }
    }
}
