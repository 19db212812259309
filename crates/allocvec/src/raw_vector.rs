// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RawVector - type-erased vector of fixed-size byte blocks.
//!
//! Every storage decision goes through the [`Allocator`] given at
//! construction. Elements are opaque: they are moved with plain byte copies
//! and never constructed or dropped.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use allocvec_core::{AllocError, Allocator, Capabilities};

use crate::config::{ContractMode, VectorConfig};
use crate::error::VectorError;

/// A growable contiguous array of `element_size`-byte blocks.
///
/// # Example
///
/// ```rust
/// use allocvec::{MallocAllocator, RawVector, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vec = RawVector::new(MallocAllocator, 4)?;
///
///     vec.push(&10u32.to_ne_bytes())?;
///     vec.push(&30u32.to_ne_bytes())?;
///     vec.insert(1, &20u32.to_ne_bytes())?;
///
///     assert_eq!(vec.len(), 3);
///     assert_eq!(vec.get(1), Some(&20u32.to_ne_bytes()[..]));
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct RawVector<A>
where
    A: Allocator,
{
    storage: Option<NonNull<u8>>,
    size: usize,
    capacity: usize,
    element_size: usize,
    align: usize,
    capabilities: Capabilities,
    config: VectorConfig,
    allocator: A,
}

// Safety: RawVector exclusively owns its storage; sending it moves that
// ownership along with the allocator.
unsafe impl<A> Send for RawVector<A> where A: Allocator + Send {}

impl<A> core::fmt::Debug for RawVector<A>
where
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawVector")
            .field("len", &self.size)
            .field("capacity", &self.capacity)
            .field("element_size", &self.element_size)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl<A> RawVector<A>
where
    A: Allocator,
{
    /// Creates an empty vector of `element_size`-byte elements with the
    /// default [`VectorConfig`].
    ///
    /// # Errors
    ///
    /// - [`VectorError::ZeroElementSize`] if `element_size == 0`.
    /// - [`VectorError::MissingAllocate`] if the allocator cannot allocate.
    pub fn new(allocator: A, element_size: usize) -> Result<Self, VectorError> {
        Self::with_config(allocator, element_size, VectorConfig::default())
    }

    /// Creates an empty vector with an explicit [`VectorConfig`].
    pub fn with_config(
        allocator: A,
        element_size: usize,
        config: VectorConfig,
    ) -> Result<Self, VectorError> {
        Self::with_layout(allocator, element_size, 1, config)
    }

    pub(crate) fn with_layout(
        allocator: A,
        element_size: usize,
        align: usize,
        config: VectorConfig,
    ) -> Result<Self, VectorError> {
        config.validate()?;

        if element_size == 0 {
            return Err(VectorError::ZeroElementSize);
        }

        let capabilities = allocator.capabilities();
        if !capabilities.is_usable() {
            return Err(VectorError::MissingAllocate);
        }

        debug_assert!(align.is_power_of_two());

        Ok(Self {
            storage: None,
            size: 0,
            capacity: 0,
            element_size,
            align,
            capabilities,
            config,
            allocator,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of element slots backed by storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Capabilities of the allocator, as read at construction.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The allocator backing this vector.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The configuration this vector was created with.
    #[inline]
    pub fn config(&self) -> &VectorConfig {
        &self.config
    }

    /// Largest capacity whose byte size is representable.
    pub fn max_capacity(&self) -> usize {
        (isize::MAX as usize - (self.align - 1)) / self.element_size
    }

    /// Bytes of the element at `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.size {
            return None;
        }

        let start = index * self.element_size;
        Some(&self.as_bytes()[start..start + self.element_size])
    }

    /// Mutable bytes of the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.size {
            return None;
        }

        let start = index * self.element_size;
        let element_size = self.element_size;
        Some(&mut self.as_bytes_mut()[start..start + element_size])
    }

    /// Bytes of the first element.
    pub fn front(&self) -> Option<&[u8]> {
        self.get(0)
    }

    /// Bytes of the last element.
    pub fn back(&self) -> Option<&[u8]> {
        self.size.checked_sub(1).and_then(|last| self.get(last))
    }

    /// The `len() * element_size()` live bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self.storage {
            // SAFETY: storage holds capacity * element_size bytes, of which
            // the first size * element_size have been written.
            Some(ptr) => unsafe {
                core::slice::from_raw_parts(ptr.as_ptr(), self.size * self.element_size)
            },
            None => &[],
        }
    }

    /// The `len() * element_size()` live bytes, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self.storage {
            // SAFETY: as in as_bytes(); &mut self guarantees exclusivity.
            Some(ptr) => unsafe {
                core::slice::from_raw_parts_mut(ptr.as_ptr(), self.size * self.element_size)
            },
            None => &mut [],
        }
    }

    pub(crate) fn as_ptr(&self) -> Option<NonNull<u8>> {
        self.storage
    }

    // =========================================================================
    // Capacity management
    // =========================================================================

    /// Ensures room for at least `target_capacity` elements.
    ///
    /// Does nothing if the capacity is already sufficient. Never changes
    /// `len()`.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityOverflow`] if the byte size would not fit.
    /// - [`VectorError::AllocationFailed`] if the allocator fails. The vector
    ///   is left untouched.
    pub fn reserve(&mut self, target_capacity: usize) -> Result<(), VectorError> {
        if target_capacity <= self.capacity {
            return Ok(());
        }

        let layout = self.layout_for(target_capacity)?;
        self.replace_storage(target_capacity, layout)?;

        self.debug_check_invariants();
        Ok(())
    }

    /// Shrinks the capacity to exactly `len()`.
    ///
    /// An empty vector gives its storage back entirely. On failure the
    /// vector is left untouched.
    pub fn shrink_to_fit(&mut self) -> Result<(), VectorError> {
        if self.size == self.capacity {
            return Ok(());
        }

        if self.size == 0 {
            self.release_storage();
            self.debug_check_invariants();
            return Ok(());
        }

        let layout = self.layout_for(self.size)?;
        self.replace_storage(self.size, layout)?;

        self.debug_check_invariants();
        Ok(())
    }

    fn layout_for(&self, capacity: usize) -> Result<Layout, VectorError> {
        let overflow = VectorError::CapacityOverflow {
            capacity,
            element_size: self.element_size,
        };

        let bytes = capacity.checked_mul(self.element_size).ok_or(overflow)?;
        Layout::from_size_align(bytes, self.align).map_err(|_| overflow)
    }

    fn current_layout(&self) -> Layout {
        // SAFETY: the current capacity was validated by layout_for() when
        // the storage was obtained.
        unsafe {
            Layout::from_size_align_unchecked(self.capacity * self.element_size, self.align)
        }
    }

    /// Moves the live elements into a block of `new_capacity` slots.
    ///
    /// Reallocates in place when possible, otherwise allocates, copies and
    /// releases (or abandons) the old block. Self is only written once the
    /// new block holds every live element.
    fn replace_storage(&mut self, new_capacity: usize, layout: Layout) -> Result<(), VectorError> {
        let old_capacity = self.capacity;

        let new_ptr = match self.storage {
            Some(old) if self.capabilities.reallocate => {
                let old_layout = self.current_layout();

                // SAFETY: old was obtained from this allocator with old_layout.
                let ptr = unsafe { self.allocator.reallocate(old, old_layout, layout.size()) }
                    .map_err(|e| self.exhausted(layout.size(), e))?;

                debug_assert!(
                    ptr.as_ptr() as usize % self.align == 0,
                    "reallocate() must preserve alignment"
                );

                tracing::debug!(
                    from = old_capacity,
                    to = new_capacity,
                    "allocvec: storage reallocated"
                );

                ptr
            }
            old => {
                let ptr = self
                    .allocator
                    .allocate(layout)
                    .map_err(|e| self.exhausted(layout.size(), e))?;

                if ptr.as_ptr() as usize % self.align != 0 {
                    if self.capabilities.release {
                        // SAFETY: ptr was just obtained for layout.
                        unsafe { self.allocator.release(ptr, layout) };
                    }

                    return Err(self.exhausted(
                        layout.size(),
                        AllocError::UnsupportedAlignment { align: self.align },
                    ));
                }

                if let Some(old) = old {
                    let old_layout = self.current_layout();

                    // SAFETY: both blocks are live and distinct; the new one
                    // holds at least size * element_size bytes because
                    // new_capacity >= size.
                    unsafe {
                        ptr::copy_nonoverlapping(
                            old.as_ptr(),
                            ptr.as_ptr(),
                            self.size * self.element_size,
                        );
                    }

                    self.give_back(old, old_layout);
                }

                tracing::debug!(
                    from = old_capacity,
                    to = new_capacity,
                    "allocvec: storage moved by allocate-copy"
                );

                ptr
            }
        };

        self.storage = Some(new_ptr);
        self.capacity = new_capacity;

        Ok(())
    }

    fn give_back(&self, ptr: NonNull<u8>, layout: Layout) {
        if self.capabilities.release {
            // SAFETY: ptr was obtained from this allocator for layout and is
            // no longer referenced by self.
            unsafe { self.allocator.release(ptr, layout) };
        } else {
            tracing::trace!(
                bytes = layout.size(),
                "allocvec: allocator cannot release, old block abandoned"
            );
        }
    }

    fn release_storage(&mut self) {
        if let Some(ptr) = self.storage.take() {
            let layout = self.current_layout();
            self.give_back(ptr, layout);
        }

        self.capacity = 0;
    }

    fn exhausted(&self, bytes: usize, source: AllocError) -> VectorError {
        tracing::error!(
            bytes,
            element_size = self.element_size,
            len = self.size,
            capacity = self.capacity,
            error = %source,
            "allocvec: allocator failed"
        );

        VectorError::AllocationFailed { bytes, source }
    }

    /// Makes room for one more element if the vector is full.
    fn grow_for_one(&mut self) -> Result<(), VectorError> {
        if self.size < self.capacity {
            return Ok(());
        }

        let Some(target) = next_capacity(self.capacity, self.max_capacity(), &self.config) else {
            return Err(VectorError::CapacityOverflow {
                capacity: self.capacity.saturating_add(1),
                element_size: self.element_size,
            });
        };

        self.reserve(target)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    fn violation(&self, error: VectorError) -> VectorError {
        if self.config.contract_mode == ContractMode::Strict {
            panic!("allocvec: contract violation: {error}");
        }

        error
    }

    fn check_element(&self, elem: &[u8]) -> Result<(), VectorError> {
        if elem.len() != self.element_size {
            return Err(self.violation(VectorError::ElementSizeMismatch {
                expected: self.element_size,
                actual: elem.len(),
            }));
        }

        Ok(())
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> *mut u8 {
        debug_assert!(index <= self.capacity);

        match self.storage {
            // SAFETY: index <= capacity keeps the offset inside (or one past)
            // the block.
            Some(ptr) => unsafe { ptr.as_ptr().add(index * self.element_size) },
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// Appends one element.
    ///
    /// # Errors
    ///
    /// - [`VectorError::ElementSizeMismatch`] if `elem.len() != element_size()`.
    /// - Any growth failure from [`reserve`](Self::reserve).
    pub fn push(&mut self, elem: &[u8]) -> Result<(), VectorError> {
        self.check_element(elem)?;

        // SAFETY: elem holds exactly element_size readable bytes and, being a
        // shared borrow, cannot alias our storage.
        unsafe { self.push_from(elem.as_ptr()) }
    }

    /// # Safety
    ///
    /// `src` must point to `element_size` readable bytes outside this
    /// vector's storage.
    pub(crate) unsafe fn push_from(&mut self, src: *const u8) -> Result<(), VectorError> {
        self.grow_for_one()?;

        // SAFETY: grow_for_one() guarantees size < capacity.
        unsafe { ptr::copy_nonoverlapping(src, self.slot(self.size), self.element_size) };
        self.size += 1;

        self.debug_check_invariants();
        Ok(())
    }

    /// Inserts one element at `index`, shifting `[index, len)` up by one.
    ///
    /// Inserting at `len()` is equivalent to [`push`](Self::push).
    ///
    /// # Errors
    ///
    /// - [`VectorError::IndexOutOfBounds`] if `index > len()`.
    /// - [`VectorError::ElementSizeMismatch`] if `elem.len() != element_size()`.
    /// - Any growth failure from [`reserve`](Self::reserve).
    pub fn insert(&mut self, index: usize, elem: &[u8]) -> Result<(), VectorError> {
        self.check_element(elem)?;

        // SAFETY: as in push().
        unsafe { self.insert_from(index, elem.as_ptr()) }
    }

    /// # Safety
    ///
    /// Same as [`push_from`](Self::push_from).
    pub(crate) unsafe fn insert_from(
        &mut self,
        index: usize,
        src: *const u8,
    ) -> Result<(), VectorError> {
        if index > self.size {
            return Err(self.violation(VectorError::IndexOutOfBounds {
                index,
                len: self.size,
            }));
        }

        self.grow_for_one()?;

        // SAFETY: size < capacity after growth, so [index + 1, size + 1) is
        // in bounds. ptr::copy handles the overlapping ranges.
        unsafe {
            ptr::copy(
                self.slot(index),
                self.slot(index + 1),
                (self.size - index) * self.element_size,
            );
            ptr::copy_nonoverlapping(src, self.slot(index), self.element_size);
        }
        self.size += 1;

        self.debug_check_invariants();
        Ok(())
    }

    /// Removes the element at `index`, shifting `[index + 1, len)` down by one.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfBounds`] if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<(), VectorError> {
        if index >= self.size {
            return Err(self.violation(VectorError::IndexOutOfBounds {
                index,
                len: self.size,
            }));
        }

        // SAFETY: index < size, so both ranges lie within the live elements.
        unsafe {
            ptr::copy(
                self.slot(index + 1),
                self.slot(index),
                (self.size - index - 1) * self.element_size,
            );
        }
        self.size -= 1;

        self.debug_check_invariants();
        Ok(())
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// [`VectorError::Empty`] if the vector is empty.
    pub fn pop(&mut self) -> Result<(), VectorError> {
        match self.size.checked_sub(1) {
            Some(last) => self.erase(last),
            None => Err(self.violation(VectorError::Empty)),
        }
    }

    /// Appends every element in `bytes`, reserving exactly once.
    ///
    /// # Errors
    ///
    /// - [`VectorError::ElementSizeMismatch`] if `bytes.len()` is not a
    ///   multiple of `element_size()`.
    /// - [`VectorError::CapacityOverflow`] / [`VectorError::AllocationFailed`]
    ///   from the reservation.
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) -> Result<(), VectorError> {
        if bytes.len() % self.element_size != 0 {
            return Err(self.violation(VectorError::ElementSizeMismatch {
                expected: self.element_size,
                actual: bytes.len(),
            }));
        }

        // SAFETY: bytes holds count * element_size readable bytes and cannot
        // alias our storage.
        unsafe { self.extend_from(bytes.as_ptr(), bytes.len() / self.element_size) }
    }

    /// # Safety
    ///
    /// `src` must point to `count * element_size` readable bytes outside this
    /// vector's storage.
    pub(crate) unsafe fn extend_from(
        &mut self,
        src: *const u8,
        count: usize,
    ) -> Result<(), VectorError> {
        if count == 0 {
            return Ok(());
        }

        let target = self
            .size
            .checked_add(count)
            .ok_or(VectorError::CapacityOverflow {
                capacity: usize::MAX,
                element_size: self.element_size,
            })?;
        self.reserve(target)?;

        // SAFETY: reserve() guarantees capacity >= size + count.
        unsafe {
            ptr::copy_nonoverlapping(src, self.slot(self.size), count * self.element_size);
        }
        self.size = target;

        self.debug_check_invariants();
        Ok(())
    }

    /// Drops every element. Capacity and storage are kept for reuse.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Releases the storage and ends the vector's life.
    ///
    /// Storage goes back through `release` when the allocator has it and is
    /// otherwise left to the allocator's owner. Dropping the vector does the
    /// same.
    pub fn destroy(mut self) {
        self.release_storage();
        self.size = 0;
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.size <= self.capacity);
        debug_assert!(self.capacity == 0 || self.storage.is_some());
        debug_assert!(self.element_size > 0);
        debug_assert!(self.capabilities.allocate);
        debug_assert!(self.capacity <= self.max_capacity());
    }
}

/// Capacity a full vector of `capacity` slots grows to.
///
/// `initial_capacity` from empty, `capacity * growth_factor` otherwise, both
/// clamped to `max_capacity`. `None` when the clamp leaves no room to grow.
pub(crate) fn next_capacity(
    capacity: usize,
    max_capacity: usize,
    config: &VectorConfig,
) -> Option<usize> {
    let target = if capacity == 0 {
        config.initial_capacity
    } else {
        capacity.saturating_mul(config.growth_factor)
    };
    let target = target.min(max_capacity);

    (target > capacity).then_some(target)
}

impl<A> Drop for RawVector<A>
where
    A: Allocator,
{
    fn drop(&mut self) {
        self.release_storage();
    }
}
