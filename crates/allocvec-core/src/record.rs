// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AllocatorRecord - capability record of optional function slots.
//!
//! The record does not own its context. Whoever builds it keeps the context
//! alive for as long as any container holds the record.

use core::alloc::Layout;
use core::ffi::c_void;
use core::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::traits::{Allocator, Capabilities};

/// Allocates `size` bytes. Returns null on failure.
pub type AllocateFn = unsafe fn(context: *mut c_void, size: usize) -> *mut u8;

/// Resizes the block at `ptr` to `size` bytes. Returns null on failure,
/// leaving the original block intact.
pub type ReallocateFn = unsafe fn(context: *mut c_void, ptr: *mut u8, size: usize) -> *mut u8;

/// Releases the block at `ptr`.
pub type ReleaseFn = unsafe fn(context: *mut c_void, ptr: *mut u8);

/// Three optional operation slots bound to an opaque context.
///
/// Blocks handed out by a record are only as aligned as its `allocate`
/// slot makes them; containers reject misaligned blocks.
///
/// Slots are only settable through the `unsafe` constructors, which carry
/// the [`Allocator`] contract:
///
/// ```compile_fail,E0451
/// use allocvec_core::AllocatorRecord;
///
/// let record = AllocatorRecord {
///     context: core::ptr::null_mut(),
///     ..AllocatorRecord::malloc()
/// };
/// ```
#[derive(Clone, Copy)]
pub struct AllocatorRecord {
    allocate: Option<AllocateFn>,
    reallocate: Option<ReallocateFn>,
    release: Option<ReleaseFn>,
    context: *mut c_void,
}

unsafe fn malloc_allocate(_context: *mut c_void, size: usize) -> *mut u8 {
    // SAFETY: plain libc call with a non-zero size.
    unsafe { libc::malloc(size.max(1)).cast() }
}

unsafe fn malloc_reallocate(_context: *mut c_void, ptr: *mut u8, size: usize) -> *mut u8 {
    // SAFETY: the record only passes pointers obtained from malloc_allocate.
    unsafe { libc::realloc(ptr.cast(), size.max(1)).cast() }
}

unsafe fn malloc_release(_context: *mut c_void, ptr: *mut u8) {
    // SAFETY: as in malloc_reallocate().
    unsafe { libc::free(ptr.cast()) }
}

impl AllocatorRecord {
    /// A record with every slot empty and a null context.
    pub const fn empty() -> Self {
        Self {
            allocate: None,
            reallocate: None,
            release: None,
            context: ptr::null_mut(),
        }
    }

    /// The C heap as a record, with a null context.
    pub fn malloc() -> Self {
        Self {
            allocate: Some(malloc_allocate),
            reallocate: Some(malloc_reallocate),
            release: Some(malloc_release),
            context: ptr::null_mut(),
        }
    }

    /// A record with the given slots bound to `context`.
    ///
    /// # Safety
    ///
    /// - Non-null pointers returned by the slots must satisfy the
    ///   [`Allocator`] contract for the requested sizes.
    /// - `reallocate` and `release` must accept any pointer returned by
    ///   `allocate` or `reallocate` that is still live.
    /// - `context` must stay valid for the slots for as long as the record,
    ///   or any copy of it, is in use.
    pub unsafe fn new(
        allocate: Option<AllocateFn>,
        reallocate: Option<ReallocateFn>,
        release: Option<ReleaseFn>,
        context: *mut c_void,
    ) -> Self {
        Self {
            allocate,
            reallocate,
            release,
            context,
        }
    }

    /// A record with only an `allocate` slot bound to `context`.
    ///
    /// # Safety
    ///
    /// Same as [`new`](Self::new).
    pub unsafe fn allocate_only(allocate: AllocateFn, context: *mut c_void) -> Self {
        // SAFETY: forwarded to the caller.
        unsafe { Self::new(Some(allocate), None, None, context) }
    }

    /// The context passed to every slot.
    pub fn context(&self) -> *mut c_void {
        self.context
    }
}

impl Default for AllocatorRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for AllocatorRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AllocatorRecord")
            .field("allocate", &self.allocate.is_some())
            .field("reallocate", &self.reallocate.is_some())
            .field("release", &self.release.is_some())
            .field("context", &self.context)
            .finish()
    }
}

// SAFETY: the slots were supplied through the unsafe constructors, whose
// callers vouch for them; malloc() and empty() are trivially sound.
unsafe impl Allocator for AllocatorRecord {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            allocate: self.allocate.is_some(),
            reallocate: self.reallocate.is_some(),
            release: self.release.is_some(),
        }
    }

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let allocate = self.allocate.ok_or(AllocError::Unsupported)?;

        // SAFETY: the record's builder vouches for the slot and its context.
        let ptr = unsafe { allocate(self.context, layout.size()) };

        NonNull::new(ptr).ok_or(AllocError::Exhausted)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        _old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        let reallocate = self.reallocate.ok_or(AllocError::Unsupported)?;

        // SAFETY: caller guarantees ptr came from this record and is live.
        let new_ptr = unsafe { reallocate(self.context, ptr.as_ptr(), new_size) };

        NonNull::new(new_ptr).ok_or(AllocError::Exhausted)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, _layout: Layout) {
        if let Some(release) = self.release {
            // SAFETY: caller guarantees ptr came from this record and is live.
            unsafe { release(self.context, ptr.as_ptr()) };
        }
    }
}
