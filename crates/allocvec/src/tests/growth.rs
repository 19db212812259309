// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use allocvec_core::{AllocatorBehaviour, AllocatorStats, InstrumentedAllocator};

use crate::raw_vector::next_capacity;
use crate::{AllocError, MallocAllocator, RawVector, VectorConfig, VectorError};

#[test]
fn test_first_growth_uses_initial_capacity() {
    let mut vec = RawVector::new(MallocAllocator, 1).expect("Failed to create RawVector");

    vec.push(&[0]).expect("Failed to push(..)");

    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_growth_doubles() {
    let mut vec = RawVector::new(MallocAllocator, 2).expect("Failed to create RawVector");
    let mut seen = Vec::new();

    for i in 0..100u16 {
        vec.push(&i.to_ne_bytes()).expect("Failed to push(..)");
        if seen.last() != Some(&vec.capacity()) {
            seen.push(vec.capacity());
        }
    }

    assert_eq!(seen, vec![8, 16, 32, 64, 128]);
}

#[test]
fn test_growth_uses_reallocate_when_available() {
    let allocator = InstrumentedAllocator::new(MallocAllocator);
    let mut vec = RawVector::new(&allocator, 4).expect("Failed to create RawVector");

    for i in 0..20u32 {
        vec.push(&i.to_ne_bytes()).expect("Failed to push(..)");
    }

    let stats = allocator.stats();
    assert_eq!(stats.allocations, 1);
    assert_eq!(stats.reallocations, 2);
    assert_eq!(stats.releases, 0);

    drop(vec);
    assert_eq!(allocator.stats().releases, 1);
    assert_eq!(allocator.stats().outstanding(), 0);
}

#[test]
fn test_growth_without_reallocate_copies_and_releases() {
    struct NoRealloc;

    // SAFETY: every block comes from MallocAllocator.
    unsafe impl allocvec_core::Allocator for NoRealloc {
        fn capabilities(&self) -> allocvec_core::Capabilities {
            allocvec_core::Capabilities {
                allocate: true,
                reallocate: false,
                release: true,
            }
        }

        fn allocate(
            &self,
            layout: core::alloc::Layout,
        ) -> Result<core::ptr::NonNull<u8>, AllocError> {
            allocvec_core::Allocator::allocate(&MallocAllocator, layout)
        }

        unsafe fn release(&self, ptr: core::ptr::NonNull<u8>, layout: core::alloc::Layout) {
            unsafe { allocvec_core::Allocator::release(&MallocAllocator, ptr, layout) }
        }
    }

    let allocator = InstrumentedAllocator::new(NoRealloc);
    let mut vec = RawVector::new(&allocator, 4).expect("Failed to create RawVector");

    for i in 0..20u32 {
        vec.push(&i.to_ne_bytes()).expect("Failed to push(..)");
    }

    let stats = allocator.stats();
    assert_eq!(stats.allocations, 3);
    assert_eq!(stats.reallocations, 0);
    assert_eq!(stats.releases, 2);

    let values: Vec<u32> = vec
        .as_bytes()
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(values, (0..20).collect::<Vec<_>>());

    vec.destroy();
    assert_eq!(allocator.stats().outstanding(), 0);
}

// =============================================================================
// saturation
// =============================================================================

#[test]
fn test_reserve_is_bounded_by_max_capacity() {
    // With elements this large only 4 fit in the address space.
    let element_size = isize::MAX as usize / 4;
    let allocator =
        InstrumentedAllocator::with_behaviour(MallocAllocator, AllocatorBehaviour::FailAll);
    let mut vec = RawVector::new(&allocator, element_size).expect("Failed to create RawVector");

    assert_eq!(vec.max_capacity(), 4);

    assert_eq!(
        vec.reserve(8),
        Err(VectorError::CapacityOverflow {
            capacity: 8,
            element_size
        })
    );

    assert_eq!(
        vec.reserve(4),
        Err(VectorError::AllocationFailed {
            bytes: 4 * element_size,
            source: AllocError::Exhausted,
        })
    );
}

#[test]
fn test_first_growth_saturates_at_max_capacity() {
    let config = VectorConfig {
        initial_capacity: usize::MAX,
        ..VectorConfig::default()
    };
    let allocator =
        InstrumentedAllocator::with_behaviour(MallocAllocator, AllocatorBehaviour::FailAll);
    let mut vec =
        RawVector::with_config(&allocator, 4, config).expect("Failed to create RawVector");

    // The clamped request is the largest block a Layout can describe.
    assert_eq!(
        vec.push(&7u32.to_ne_bytes()),
        Err(VectorError::AllocationFailed {
            bytes: vec.max_capacity() * 4,
            source: AllocError::Exhausted,
        })
    );
    assert_eq!(vec.max_capacity() * 4, isize::MAX as usize - 3);
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn test_multiplied_growth_saturates_at_max_capacity() {
    let config = VectorConfig {
        initial_capacity: 3,
        growth_factor: usize::MAX,
        ..VectorConfig::default()
    };
    let allocator = InstrumentedAllocator::new(MallocAllocator);
    let mut vec =
        RawVector::with_config(&allocator, 4, config).expect("Failed to create RawVector");

    for i in 0..3u32 {
        vec.push(&i.to_ne_bytes()).expect("Failed to push(..)");
    }
    assert_eq!(vec.capacity(), 3);

    allocator.change_behaviour(AllocatorBehaviour::FailAtReallocate);

    // 3 * usize::MAX saturates, then clamps to max_capacity().
    assert_eq!(
        vec.push(&3u32.to_ne_bytes()),
        Err(VectorError::AllocationFailed {
            bytes: vec.max_capacity() * 4,
            source: AllocError::Exhausted,
        })
    );
    assert_eq!(vec.len(), 3);
    assert_eq!(vec.capacity(), 3);
}

#[test]
fn test_push_without_room_reports_capacity_overflow() {
    // Not even one element of this size fits in the address space.
    let element_size = usize::MAX;
    let allocator = InstrumentedAllocator::new(MallocAllocator);
    let mut vec = RawVector::new(&allocator, element_size).expect("Failed to create RawVector");
    assert_eq!(vec.max_capacity(), 0);

    let byte = 0u8;
    // SAFETY: grow_for_one() rejects the push before src is read.
    let result = unsafe { vec.push_from(&byte) };

    assert_eq!(
        result,
        Err(VectorError::CapacityOverflow {
            capacity: 1,
            element_size
        })
    );
    assert_eq!(allocator.stats(), AllocatorStats::default());
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 0);
}

// =============================================================================
// next_capacity()
// =============================================================================

#[test]
fn test_next_capacity_policy() {
    let config = VectorConfig::default();

    assert_eq!(next_capacity(0, 1000, &config), Some(8));
    assert_eq!(next_capacity(8, 1000, &config), Some(16));
    assert_eq!(next_capacity(600, 1000, &config), Some(1000));
    assert_eq!(next_capacity(0, 5, &config), Some(5));
}

#[test]
fn test_next_capacity_at_max_has_no_room() {
    let config = VectorConfig::default();

    assert_eq!(next_capacity(1000, 1000, &config), None);
    assert_eq!(next_capacity(0, 0, &config), None);
    assert_eq!(next_capacity(usize::MAX, usize::MAX, &config), None);
}

#[test]
fn test_next_capacity_saturates_multiplication() {
    let config = VectorConfig {
        growth_factor: usize::MAX,
        ..VectorConfig::default()
    };

    assert_eq!(next_capacity(2, usize::MAX, &config), Some(usize::MAX));
    assert_eq!(next_capacity(2, 7, &config), Some(7));
}
