// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ops::{Deref, DerefMut};

use allocvec_core::{Allocator, Capabilities, MallocAllocator};

use crate::config::VectorConfig;
use crate::error::VectorError;
use crate::raw_vector::RawVector;

/// A growable contiguous array of `T` over a pluggable allocator.
///
/// A typed view of [`RawVector`]: the growth and shift algorithms are the
/// same, the element size and alignment come from `T`. Elements are moved
/// as plain bytes, hence `T: Copy`.
///
/// # Example
///
/// ```rust
/// use allocvec::{MallocAllocator, Vector, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vec = Vector::<i32>::new(MallocAllocator)?;
///     for value in [10, 20, 30] {
///         vec.push(value)?;
///     }
///
///     vec.insert(1, 15)?;
///     assert_eq!(vec.as_slice(), &[10, 15, 20, 30]);
///
///     vec.erase(2)?;
///     assert_eq!(vec.as_slice(), &[10, 15, 30]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Vector<T, A = MallocAllocator>
where
    T: Copy,
    A: Allocator,
{
    raw: RawVector<A>,
    _marker: PhantomData<T>,
}

impl<T, A> core::fmt::Debug for Vector<T, A>
where
    T: Copy + core::fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector")
            .field("data", &self.as_slice())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T> Vector<T, MallocAllocator>
where
    T: Copy,
{
    /// Creates an empty vector on the C heap.
    pub fn with_malloc() -> Result<Self, VectorError> {
        Self::new(MallocAllocator)
    }
}

impl<T, A> Vector<T, A>
where
    T: Copy,
    A: Allocator,
{
    /// Creates an empty vector with the default [`VectorConfig`].
    ///
    /// # Errors
    ///
    /// - [`VectorError::ZeroElementSize`] if `T` is zero-sized.
    /// - [`VectorError::MissingAllocate`] if the allocator cannot allocate.
    pub fn new(allocator: A) -> Result<Self, VectorError> {
        Self::with_config(allocator, VectorConfig::default())
    }

    /// Creates an empty vector with an explicit [`VectorConfig`].
    pub fn with_config(allocator: A, config: VectorConfig) -> Result<Self, VectorError> {
        let raw = RawVector::with_layout(allocator, size_of::<T>(), align_of::<T>(), config)?;

        Ok(Self {
            raw,
            _marker: PhantomData,
        })
    }

    /// Builds a vector holding a copy of `values`, reserving exactly once.
    pub fn from_slice(allocator: A, values: &[T]) -> Result<Self, VectorError> {
        let mut vec = Self::new(allocator)?;
        vec.extend_from_slice(values)?;
        Ok(vec)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of element slots backed by storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Capabilities of the allocator, as read at construction.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.raw.capabilities()
    }

    /// The allocator backing this vector.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// The type-erased vector underneath.
    pub fn as_raw(&self) -> &RawVector<A> {
        &self.raw
    }

    /// Returns a slice over the live elements.
    pub fn as_slice(&self) -> &[T] {
        match self.raw.as_ptr() {
            // SAFETY: storage is aligned for T (checked on allocation) and
            // its first len() slots hold values written from T.
            Some(ptr) => unsafe {
                core::slice::from_raw_parts(ptr.as_ptr().cast::<T>(), self.len())
            },
            None => &[],
        }
    }

    /// Returns a mutable slice over the live elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.raw.as_ptr() {
            // SAFETY: as in as_slice(); &mut self guarantees exclusivity.
            Some(ptr) => unsafe {
                core::slice::from_raw_parts_mut(ptr.as_ptr().cast::<T>(), self.len())
            },
            None => &mut [],
        }
    }

    /// First element.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// See [`RawVector::reserve`].
    pub fn reserve(&mut self, target_capacity: usize) -> Result<(), VectorError> {
        self.raw.reserve(target_capacity)
    }

    /// See [`RawVector::shrink_to_fit`].
    pub fn shrink_to_fit(&mut self) -> Result<(), VectorError> {
        self.raw.shrink_to_fit()
    }

    /// Appends `value`, growing if the vector is full.
    pub fn push(&mut self, value: T) -> Result<(), VectorError> {
        // SAFETY: value is a live local holding size_of::<T>() bytes.
        unsafe { self.raw.push_from((&value as *const T).cast()) }
    }

    /// Inserts `value` at `index`, shifting later elements up by one.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        // SAFETY: as in push().
        unsafe { self.raw.insert_from(index, (&value as *const T).cast()) }
    }

    /// Removes the element at `index`, shifting later elements down by one.
    pub fn erase(&mut self, index: usize) -> Result<(), VectorError> {
        self.raw.erase(index)
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, VectorError> {
        let value = self.as_slice().get(index).copied();
        self.raw.erase(index)?;

        // erase() succeeded, so index was in bounds.
        value.ok_or(VectorError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Result<T, VectorError> {
        let value = self.back().copied();
        self.raw.pop()?;

        value.ok_or(VectorError::Empty)
    }

    /// Appends a copy of every element in `values`, reserving exactly once.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), VectorError> {
        // SAFETY: values holds values.len() * size_of::<T>() readable bytes
        // and, being a shared borrow, cannot alias our storage.
        unsafe { self.raw.extend_from(values.as_ptr().cast(), values.len()) }
    }

    /// Drops every element. Capacity and storage are kept for reuse.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Releases the storage and ends the vector's life.
    pub fn destroy(self) {
        self.raw.destroy();
    }
}

impl<T, A> Deref for Vector<T, A>
where
    T: Copy,
    A: Allocator,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A> DerefMut for Vector<T, A>
where
    T: Copy,
    A: Allocator,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}
