//
// Copyright 2020, Gobsmacked Labs, LLC.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An N-Dimensional Z-Order Curve base trait.
//!
//! Bit `i` of the field stored at dimension offset `d` lives at bit
//! `i * DIMENSIONS + d` of the key, so the most significant bits of every
//! dimension are grouped at the top of the key.

use crate::error::{Result, ZRectError};
use tracing::debug;

/// An N-Dimensional Z-Order Curve base trait.
pub trait ZN {
    /// Number of Bits per Dimension.
    const BITS_PER_DIMENSION: u32;

    /// Number of Dimensions.
    const DIMENSIONS: u32;

    /// MAX Value of a single dimension.
    const MAX_MASK: u64;

    /// Total bits used. Always `BITS_PER_DIMENSION * DIMENSIONS`.
    const TOTAL_BITS: u32;

    /// Key bits owned by dimension offset 0, i.e. `split(MAX_MASK)`.
    const SPREAD_MASK: u64;

    /// Insert (DIMENSIONS - 1) zeros between each bit to create a zvalue
    ///  from a single dimension.
    ///
    /// #Note:
    ///   - Only the first `BITS_PER_DIMENSION` can be considered.
    fn split(value: u32) -> u64;

    /// Combine every (Dimensions - 1) bits to re-create a single dimension. Opposite
    /// of split.
    fn combine(z: u64) -> u32;

    /// Replace the field at `offset` in `key` with `value`.
    ///
    /// Bits of `value` above `BITS_PER_DIMENSION` are dropped without notice.
    /// `offset` must be less than `DIMENSIONS`.
    #[must_use]
    fn encode_field(key: u64, value: u32, offset: u32) -> u64 {
        debug_assert!(offset < Self::DIMENSIONS);
        (key & !(Self::SPREAD_MASK << offset)) | (Self::split(value) << offset)
    }

    /// Like `encode_field`, but rejects values that would be truncated and
    /// offsets outside of `[0, DIMENSIONS)`.
    fn try_encode_field(key: u64, value: u32, offset: u32) -> Result<u64> {
        if offset >= Self::DIMENSIONS {
            debug!(offset, "rejecting dimension offset");
            return Err(ZRectError::DimensionOutOfRange {
                offset,
                dimensions: Self::DIMENSIONS,
            });
        }
        if u64::from(value) > Self::MAX_MASK {
            debug!(value, "rejecting field value");
            return Err(ZRectError::FieldOutOfRange {
                value,
                max: Self::max_field(),
            });
        }
        Ok(Self::encode_field(key, value, offset))
    }

    /// Read back the field stored at `offset`.
    #[must_use]
    fn decode_field(key: u64, offset: u32) -> u32 {
        debug_assert!(offset < Self::DIMENSIONS);
        Self::combine(key >> offset)
    }

    /// Largest value a single dimension can hold.
    #[must_use]
    fn max_field() -> u32 {
        Self::combine(Self::SPREAD_MASK)
    }

    /// Check that `precision` is a valid number of retained bits per dimension.
    fn check_precision(precision: u32) -> Result<u32> {
        if precision > Self::BITS_PER_DIMENSION {
            debug!(precision, "rejecting precision");
            Err(ZRectError::PrecisionOutOfRange {
                precision,
                max: Self::BITS_PER_DIMENSION,
            })
        } else {
            Ok(precision)
        }
    }

    /// Number of low key bits cleared when keeping `precision` bits per dimension.
    ///
    /// # NOTE:
    ///   panics if `precision > BITS_PER_DIMENSION`
    #[must_use]
    fn truncated_bits(precision: u32) -> u32 {
        assert!(precision <= Self::BITS_PER_DIMENSION);
        (Self::BITS_PER_DIMENSION - precision) * Self::DIMENSIONS
    }

    /// Mask keeping the high `precision` bits of every dimension.
    #[must_use]
    fn prefix_mask(precision: u32) -> u64 {
        u64::max_value()
            .checked_shl(Self::truncated_bits(precision))
            .unwrap_or(0)
    }

    /// Clear the low `BITS_PER_DIMENSION - precision` bits of every dimension.
    #[must_use]
    fn truncate(key: u64, precision: u32) -> u64 {
        key & Self::prefix_mask(precision)
    }

    /// Distance in a single dimension between neighbouring truncated values.
    #[must_use]
    fn step(precision: u32) -> u64 {
        assert!(precision <= Self::BITS_PER_DIMENSION);
        1_u64 << (Self::BITS_PER_DIMENSION - precision)
    }

    /// Compute the longest common prefix, in bits per dimension, for a slice of keys.
    ///
    /// # NOTE:
    ///   panics if `values.len() == 0`
    #[must_use]
    fn longest_common_prefix(values: &[u64]) -> ZPrefix {
        assert!(!values.is_empty());

        let head = values[0];
        let mut precision = Self::BITS_PER_DIMENSION;

        while precision > 0
            && !values[1..]
                .iter()
                .all(|v| Self::truncate(*v, precision) == Self::truncate(head, precision))
        {
            precision -= 1;
        }

        ZPrefix {
            prefix: Self::truncate(head, precision),
            precision,
        }
    }
}

/// The longest common prefix for a group of z-indexes.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ZPrefix {
    /// The common prefix.
    pub prefix: u64,
    /// The number of bits in common per dimension.
    pub precision: u32,
}
