#![no_std]
#![deny(missing_docs)]
//! Z-order (Morton) encoding of axis-aligned rectangles.
//!
//! A rectangle `(x0, x1, y0, y1)` of 16-bit fields is interleaved into a
//! single `u64`. Because the high bits of every field end up at the top of
//! the key, truncating the key keeps a coarse version of all four fields at
//! once, and rectangles that agree at some precision share a contiguous key
//! range. That is enough to run approximate rectangle matching on an ordinary
//! sorted index.
//!
//! ```
//! use zrect::SpaceFillingCurves;
//!
//! let curve = SpaceFillingCurves::get_rect_curve(100.0, 4).unwrap();
//! let indexed = curve.index(20.12, 89.99, 15.12, 57.99);
//! let nearby = curve.index(20.5, 89.5, 15.5, 57.5);
//!
//! assert!(curve.matches(indexed, nearby));
//! assert!(curve.bucket(indexed).contains(nearby.z()));
//!
//! let span = curve.spans(indexed);
//! assert!(span.bounds(&nearby));
//! ```

pub mod error;
pub mod normalized_dimension;
pub mod zorder;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
extern crate rand;

pub use error::{Result, ZRectError};
pub use normalized_dimension::{to_coordinate, to_field, FieldNormalizer, NormalizedDimension};
pub use zorder::span::{max_span_rectangle, min_span_rectangle, rect_span, RectSpan};
pub use zorder::z_4::Z4;
pub use zorder::z_n::{ZPrefix, ZN};
pub use zorder::z_range::ZRange;
pub use zorder::z_rect_curve::{Rect, ZRectCurve};

/// Factory providing space filling curves
pub struct SpaceFillingCurves;

impl SpaceFillingCurves {
    /// Return a rectangle curve over [0.0, `domain_max`] matching at `precision`
    /// bits per dimension.
    pub fn get_rect_curve(domain_max: f64, precision: u32) -> Result<ZRectCurve> {
        ZRectCurve::new(domain_max, precision)
    }
}

#[cfg(test)]
use quickcheck::{QuickCheck, StdGen};

/// Property runner whose generator spans the full range of every integer type.
#[cfg(test)]
pub(crate) fn wide_quickcheck() -> QuickCheck<StdGen<rand::rngs::ThreadRng>> {
    QuickCheck::new().gen(StdGen::new(rand::thread_rng(), usize::max_value()))
}
