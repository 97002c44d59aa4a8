//! Errors returned by the strict-checked constructors and encoders.
//!
//! The permissive paths (`Z4::new`, `ZN::encode_field`, ...) never return
//! these: they truncate wide values silently.

use thiserror::Error;

/// Convenience alias for results carrying a `ZRectError`.
pub type Result<T> = core::result::Result<T, ZRectError>;

/// Out-of-range input rejected by a strict-checked function.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ZRectError {
    /// A field value does not fit into the bits available to one dimension.
    #[error("field value {value} exceeds the per-dimension maximum {max}")]
    FieldOutOfRange {
        /// The rejected value.
        value: u32,
        /// Largest value representable in one dimension.
        max: u32,
    },

    /// A dimension offset is not in `[0, dimensions)`.
    #[error("dimension offset {offset} is out of range for {dimensions} dimensions")]
    DimensionOutOfRange {
        /// The rejected offset.
        offset: u32,
        /// Number of interleaved dimensions.
        dimensions: u32,
    },

    /// More precision bits were requested than a dimension holds.
    #[error("precision {precision} exceeds the {max} bits of a dimension")]
    PrecisionOutOfRange {
        /// The rejected precision.
        precision: u32,
        /// Bits per dimension.
        max: u32,
    },

    /// The coordinate domain maximum must be finite and positive.
    #[error("domain maximum {0} must be finite and greater than zero")]
    InvalidDomain(f64),

    /// Field bit width must be in `1..=32`.
    #[error("field bit width {0} must be between 1 and 32")]
    InvalidFieldBits(u32),
}
