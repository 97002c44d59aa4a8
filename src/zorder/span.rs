//! Minimum and maximum span rectangles for a truncated `Z4`.
//!
//! Truncating a key to `precision` bits per dimension defines a bucket of
//! rectangles. The minimum span moves the low corner of the truncated
//! rectangle in by one precision step, the maximum span moves the high
//! corner out by one step. Every rectangle in the bucket has its `x0`/`y0`
//! between the two spans' `x0`/`y0`, and its `x1`/`y1` between theirs too.
//! This bounds the bucket axis by axis; it is not an exact geometric cover.
//!
//! Sums are clamped to the field maximum instead of wrapping.

use crate::zorder::{z_4::Z4, z_n::ZN};
use tracing::trace;

/// The pair of span rectangles for a key at some precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectSpan {
    /// Smallest rectangle still matching.
    pub min: Z4,
    /// Largest rectangle still matching.
    pub max: Z4,
}

fn advance(value: u32, step: u64) -> u32 {
    // Bounded by MAX_MASK, so the cast is lossless.
    (u64::from(value) + step).min(Z4::MAX_MASK) as u32
}

/// The truncated rectangle with `x0` and `y0` moved up by one precision step.
///
/// # NOTE:
///   panics if `precision > 16`
#[must_use]
pub fn min_span_rectangle(key: Z4, precision: u32) -> Z4 {
    let truncated = key.truncate(precision);
    let step = Z4::step(precision);
    truncated
        .with_x0(advance(truncated.x0(), step))
        .with_y0(advance(truncated.y0(), step))
}

/// The truncated rectangle with `x1` and `y1` moved up by one precision step.
///
/// # NOTE:
///   panics if `precision > 16`
#[must_use]
pub fn max_span_rectangle(key: Z4, precision: u32) -> Z4 {
    let truncated = key.truncate(precision);
    let step = Z4::step(precision);
    truncated
        .with_x1(advance(truncated.x1(), step))
        .with_y1(advance(truncated.y1(), step))
}

/// Both span rectangles of `key` at `precision`.
#[must_use]
pub fn rect_span(key: Z4, precision: u32) -> RectSpan {
    let span = RectSpan {
        min: min_span_rectangle(key, precision),
        max: max_span_rectangle(key, precision),
    };
    trace!(
        key = key.z(),
        precision,
        min = span.min.z(),
        max = span.max.z(),
        "computed rect span"
    );
    span
}

impl RectSpan {
    /// Whether `rect` lies between the two spans on every axis.
    #[must_use]
    pub fn bounds(&self, rect: &Z4) -> bool {
        self.max.x0() <= rect.x0()
            && rect.x0() <= self.min.x0()
            && self.max.y0() <= rect.y0()
            && rect.y0() <= self.min.y0()
            && self.min.x1() <= rect.x1()
            && rect.x1() <= self.max.x1()
            && self.min.y1() <= rect.y1()
            && rect.y1() <= self.max.y1()
    }
}
