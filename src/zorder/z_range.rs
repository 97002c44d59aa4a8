//! `ZRange` is the contiguous run of z-indexes sharing a truncated prefix.
//!

use crate::zorder::z_n::ZN;

/// Inclusive range of z-indexes, from `min` to `max`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZRange {
    /// Smallest z-index in the range.
    pub min: u64,
    /// Largest z-index in the range.
    pub max: u64,
}

impl ZRange {
    /// The bucket of every key that truncates to the same value as `key`
    /// when `precision` bits per dimension are kept.
    #[must_use]
    pub fn bucket<Z: ZN>(key: u64, precision: u32) -> Self {
        let mask = Z::prefix_mask(precision);
        let min = key & mask;
        ZRange {
            min,
            max: min | !mask,
        }
    }

    /// In index space, contains the bits value.
    #[must_use]
    pub const fn contains(&self, bits: u64) -> bool {
        bits >= self.min && bits <= self.max
    }

    /// Contains another `ZRange`.
    #[must_use]
    pub const fn contains_zrange(&self, r: ZRange) -> bool {
        self.contains(r.min) && self.contains(r.max)
    }

    /// Tests whether self and other overlap.
    #[must_use]
    pub const fn overlaps(&self, other: ZRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}
