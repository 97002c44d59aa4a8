//! Maps an `f64` in the range [0.0, `domain_max`] to a field value in
//! [0, 2^`field_bits` - 1] and back.
//!
//! The mapping is linear and lossy: `to_coordinate(to_field(x))` lands within
//! one field step of `x`, never exactly on it in general. Inputs outside the
//! domain are not validated.

use crate::error::{Result, ZRectError};
#[cfg(feature = "serde")]
use core::convert::TryFrom;
#[allow(unused_imports)]
use num_traits::Float;

/// Maps a `f64` to a `u32` <= `max_index`.
pub trait NormalizedDimension {
    /// The minimum input.
    fn min(&self) -> f64;

    /// The maximum input.
    fn max(&self) -> f64;

    /// The maximum output value.
    fn max_index(&self) -> u32;

    /// Normalize input `f64` into range [0, `max_index`].
    fn normalize(&self, x: f64) -> u32;

    /// Reverse of normalize.
    fn denormalize(&self, y: u32) -> f64;
}

fn max_index(field_bits: u32) -> f64 {
    1_u64
        .checked_shl(field_bits)
        .unwrap_or(0)
        .wrapping_sub(1) as f64
}

/// `floor(x / domain_max * (2^field_bits - 1))`.
///
/// # NOTE:
///   `field_bits` is meaningful in `1..=32`. Wider fields saturate at
///   `u32::max_value()`.
#[must_use]
pub fn to_field(x: f64, domain_max: f64, field_bits: u32) -> u32 {
    (x / domain_max * max_index(field_bits)).floor() as u32
}

/// `value / (2^field_bits - 1) * domain_max`.
///
/// # NOTE:
///   `field_bits` is meaningful in `1..=32`.
#[must_use]
pub fn to_coordinate(value: u32, domain_max: f64, field_bits: u32) -> f64 {
    f64::from(value) / max_index(field_bits) * domain_max
}

/// A `NormalizedDimension` for the range [0.0, `domain_max`].
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFieldNormalizer")
)]
pub struct FieldNormalizer {
    domain_max: f64,
    field_bits: u32,
}

/// Unchecked wire form of a `FieldNormalizer`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFieldNormalizer {
    domain_max: f64,
    field_bits: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFieldNormalizer> for FieldNormalizer {
    type Error = ZRectError;

    fn try_from(raw: RawFieldNormalizer) -> Result<Self> {
        Self::try_new(raw.domain_max, raw.field_bits)
    }
}

impl FieldNormalizer {
    /// Constructor panics if `field_bits` is 0 or above 32, or `domain_max`
    /// is not a positive finite number.
    #[must_use]
    pub fn new(domain_max: f64, field_bits: u32) -> Self {
        assert!(field_bits > 0);
        assert!(field_bits <= 32);
        assert!(domain_max.is_finite() && domain_max > 0.0);
        FieldNormalizer {
            domain_max,
            field_bits,
        }
    }

    /// Constructor returning an error instead of panicking.
    pub fn try_new(domain_max: f64, field_bits: u32) -> Result<Self> {
        if field_bits == 0 || field_bits > 32 {
            return Err(ZRectError::InvalidFieldBits(field_bits));
        }
        if !domain_max.is_finite() || domain_max <= 0.0 {
            return Err(ZRectError::InvalidDomain(domain_max));
        }
        Ok(FieldNormalizer {
            domain_max,
            field_bits,
        })
    }

    /// Bits of the output field.
    #[must_use]
    pub fn field_bits(&self) -> u32 {
        self.field_bits
    }

    /// Coordinate width of one cell when only `precision` bits of the field
    /// are kept.
    ///
    /// # NOTE:
    ///   panics if `precision > field_bits`
    #[must_use]
    pub fn cell_extent(&self, precision: u32) -> f64 {
        assert!(precision <= self.field_bits);
        let step = (1_u64 << (self.field_bits - precision)) as f64;
        step / max_index(self.field_bits) * self.domain_max
    }
}

impl NormalizedDimension for FieldNormalizer {
    fn min(&self) -> f64 {
        0.0
    }

    fn max(&self) -> f64 {
        self.domain_max
    }

    fn max_index(&self) -> u32 {
        // 2^32 - 1 still fits.
        max_index(self.field_bits) as u32
    }

    fn normalize(&self, x: f64) -> u32 {
        to_field(x, self.domain_max, self.field_bits)
    }

    fn denormalize(&self, y: u32) -> f64 {
        to_coordinate(y, self.domain_max, self.field_bits)
    }
}
