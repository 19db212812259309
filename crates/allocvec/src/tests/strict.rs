// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{MallocAllocator, RawVector, Vector, VectorConfig, VectorError};

fn strict_vec() -> Vector<u32> {
    let mut vec = Vector::with_config(MallocAllocator, VectorConfig::strict())
        .expect("Failed to create Vector");
    vec.extend_from_slice(&[1, 2, 3]).expect("Failed to extend_from_slice(..)");
    vec
}

#[test]
#[should_panic(expected = "contract violation")]
fn test_erase_out_of_bounds_panics() {
    let mut vec = strict_vec();
    let _ = vec.erase(3);
}

#[test]
#[should_panic(expected = "contract violation")]
fn test_insert_out_of_bounds_panics() {
    let mut vec = strict_vec();
    let _ = vec.insert(4, 0);
}

#[test]
#[should_panic(expected = "contract violation")]
fn test_pop_empty_panics() {
    let mut vec = strict_vec();
    vec.clear();
    let _ = vec.pop();
}

#[test]
#[should_panic(expected = "contract violation")]
fn test_element_size_mismatch_panics() {
    let mut vec = RawVector::with_config(MallocAllocator, 4, VectorConfig::strict())
        .expect("Failed to create RawVector");
    let _ = vec.push(&[1, 2]);
}

#[test]
fn test_valid_operations_do_not_panic() {
    let mut vec = strict_vec();

    vec.insert(3, 4).expect("Failed to insert(..)");
    vec.erase(0).expect("Failed to erase(..)");
    assert_eq!(vec.pop(), Ok(4));
    assert_eq!(vec.as_slice(), &[2, 3]);
}

#[test]
fn test_resource_failures_are_returned() {
    let mut vec = strict_vec();

    assert!(matches!(
        vec.reserve(usize::MAX),
        Err(VectorError::CapacityOverflow { .. })
    ));
    assert_eq!(vec.len(), 3);
}
