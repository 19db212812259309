// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{ContractMode, MallocAllocator, RawVector, VectorConfig, VectorError};

#[test]
fn test_defaults() {
    let config = VectorConfig::default();

    assert_eq!(config.initial_capacity, 8);
    assert_eq!(config.growth_factor, 2);
    assert_eq!(config.contract_mode, ContractMode::Tolerant);
    assert!(config.validate().is_ok());
}

#[test]
fn test_strict() {
    assert_eq!(VectorConfig::strict().contract_mode, ContractMode::Strict);
}

#[test]
fn test_zero_initial_capacity_is_rejected() {
    let config = VectorConfig {
        initial_capacity: 0,
        ..VectorConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(VectorError::InvalidConfig(_))
    ));
    assert!(matches!(
        RawVector::with_config(MallocAllocator, 4, config),
        Err(VectorError::InvalidConfig(_))
    ));
}

#[test]
fn test_growth_factor_below_two_is_rejected() {
    let config = VectorConfig {
        growth_factor: 1,
        ..VectorConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(VectorError::InvalidConfig(_))
    ));
}

#[test]
fn test_custom_growth_is_used() {
    let config = VectorConfig {
        initial_capacity: 3,
        growth_factor: 3,
        ..VectorConfig::default()
    };
    let mut vec =
        RawVector::with_config(MallocAllocator, 1, config).expect("Failed to create RawVector");

    vec.push(&[1]).expect("Failed to push(..)");
    assert_eq!(vec.capacity(), 3);

    vec.extend_from_bytes(&[2, 3]).expect("Failed to extend_from_bytes(..)");
    vec.push(&[4]).expect("Failed to push(..)");
    assert_eq!(vec.capacity(), 9);
}
