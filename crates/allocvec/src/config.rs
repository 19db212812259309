// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Vector configuration parameters.

use crate::error::VectorError;

/// How contract violations (bad index, wrong element size, empty pop) are
/// handled.
///
/// Resource failures are never affected: they are always returned.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum ContractMode {
    /// Report the violation as an `Err`.
    #[default]
    Tolerant,
    /// Panic immediately.
    Strict,
}

/// Growth and validation parameters for a vector.
///
/// Validated at construction; immutable afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct VectorConfig {
    /// Capacity of the first allocation made by `push`/`insert`.
    ///
    /// Default: 8. Must be at least 1.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity when a full vector must grow.
    ///
    /// Default: 2. Must be at least 2.
    pub growth_factor: usize,

    /// Contract violation handling. Default: [`ContractMode::Tolerant`].
    pub contract_mode: ContractMode,
}

impl VectorConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Default config with [`ContractMode::Strict`].
    pub fn strict() -> Self {
        Self {
            contract_mode: ContractMode::Strict,
            ..Self::default()
        }
    }

    /// Checks every field is in range.
    pub fn validate(&self) -> Result<(), VectorError> {
        if self.initial_capacity == 0 {
            return Err(VectorError::InvalidConfig(
                "initial_capacity must be at least 1",
            ));
        }

        if self.growth_factor < 2 {
            return Err(VectorError::InvalidConfig("growth_factor must be at least 2"));
        }

        Ok(())
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            contract_mode: ContractMode::Tolerant,
        }
    }
}
