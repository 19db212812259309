// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! InstrumentedAllocator - fault injection and call accounting.
//!
//! Only available with the `test-utils` feature.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::traits::{Allocator, Capabilities};

/// Injected behaviour for an [`InstrumentedAllocator`].
///
/// The behaviour is sticky - once set, it remains active until changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AllocatorBehaviour {
    /// Forward everything to the inner allocator.
    #[default]
    None,
    /// `allocate()` fails with [`AllocError::Exhausted`].
    FailAtAllocate,
    /// `reallocate()` fails with [`AllocError::Exhausted`].
    FailAtReallocate,
    /// Both `allocate()` and `reallocate()` fail.
    FailAll,
    /// Report (and behave as) an allocate-only allocator.
    ///
    /// Containers read capabilities once, so this must be set before the
    /// allocator is handed to one.
    AllocateOnly,
}

/// Counters of forwarded calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorStats {
    /// Successful `allocate()` calls.
    pub allocations: usize,
    /// Successful `reallocate()` calls.
    pub reallocations: usize,
    /// `release()` calls.
    pub releases: usize,
    /// Calls that failed, injected or not.
    pub failures: usize,
}

impl AllocatorStats {
    /// Blocks handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.allocations.saturating_sub(self.releases)
    }
}

/// Wraps an allocator, counts its calls and injects failures on demand.
///
/// # Example
///
/// ```rust
/// // test-utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use core::alloc::Layout;
///     use allocvec_core::{
///         AllocError, Allocator, AllocatorBehaviour, InstrumentedAllocator, MallocAllocator,
///     };
///
///     #[test]
///     fn test_handles_exhaustion() {
///         let allocator = InstrumentedAllocator::new(MallocAllocator);
///         let layout = Layout::from_size_align(16, 1).unwrap();
///
///         allocator.change_behaviour(AllocatorBehaviour::FailAtAllocate);
///         assert_eq!(allocator.allocate(layout), Err(AllocError::Exhausted));
///         assert_eq!(allocator.stats().failures, 1);
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct InstrumentedAllocator<A> {
    inner: A,
    behaviour: Cell<AllocatorBehaviour>,
    stats: Cell<AllocatorStats>,
}

impl<A> InstrumentedAllocator<A>
where
    A: Allocator,
{
    /// Wraps `inner` with [`AllocatorBehaviour::None`].
    pub fn new(inner: A) -> Self {
        Self::with_behaviour(inner, AllocatorBehaviour::None)
    }

    /// Wraps `inner` with an initial behaviour.
    pub fn with_behaviour(inner: A, behaviour: AllocatorBehaviour) -> Self {
        Self {
            inner,
            behaviour: Cell::new(behaviour),
            stats: Cell::new(AllocatorStats::default()),
        }
    }

    /// Changes the injected behaviour.
    pub fn change_behaviour(&self, behaviour: AllocatorBehaviour) {
        self.behaviour.set(behaviour);
    }

    /// Current behaviour.
    pub fn behaviour(&self) -> AllocatorBehaviour {
        self.behaviour.get()
    }

    /// Snapshot of the call counters.
    pub fn stats(&self) -> AllocatorStats {
        self.stats.get()
    }

    /// Returns the wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn record(&self, f: impl FnOnce(&mut AllocatorStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    fn fail(&self) -> AllocError {
        self.record(|s| s.failures += 1);
        AllocError::Exhausted
    }
}

// SAFETY: every block comes from the inner allocator unchanged.
unsafe impl<A> Allocator for InstrumentedAllocator<A>
where
    A: Allocator,
{
    fn capabilities(&self) -> Capabilities {
        match self.behaviour.get() {
            AllocatorBehaviour::AllocateOnly => Capabilities::ALLOCATE_ONLY,
            _ => self.inner.capabilities(),
        }
    }

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if matches!(
            self.behaviour.get(),
            AllocatorBehaviour::FailAtAllocate | AllocatorBehaviour::FailAll
        ) {
            return Err(self.fail());
        }

        match self.inner.allocate(layout) {
            Ok(ptr) => {
                self.record(|s| s.allocations += 1);
                Ok(ptr)
            }
            Err(e) => {
                self.record(|s| s.failures += 1);
                Err(e)
            }
        }
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        match self.behaviour.get() {
            AllocatorBehaviour::FailAtReallocate | AllocatorBehaviour::FailAll => {
                return Err(self.fail());
            }
            AllocatorBehaviour::AllocateOnly => {
                self.record(|s| s.failures += 1);
                return Err(AllocError::Unsupported);
            }
            _ => {}
        }

        // SAFETY: forwarded verbatim, caller upholds the contract.
        match unsafe { self.inner.reallocate(ptr, old_layout, new_size) } {
            Ok(new_ptr) => {
                self.record(|s| s.reallocations += 1);
                Ok(new_ptr)
            }
            Err(e) => {
                self.record(|s| s.failures += 1);
                Err(e)
            }
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if self.behaviour.get() == AllocatorBehaviour::AllocateOnly {
            return;
        }

        self.record(|s| s.releases += 1);

        // SAFETY: forwarded verbatim, caller upholds the contract.
        unsafe { self.inner.release(ptr, layout) };
    }
}
