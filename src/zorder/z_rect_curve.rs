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

//! Rectangle Z-Order curve over a square coordinate domain [0.0, `domain_max`].

use crate::error::Result;
use crate::normalized_dimension::{FieldNormalizer, NormalizedDimension};
use crate::zorder::{
    span::{rect_span, RectSpan},
    z_4::Z4,
    z_n::ZN,
    z_range::ZRange,
};
#[cfg(feature = "serde")]
use core::convert::TryFrom;
use tracing::trace;

/// A rectangle in coordinate space as `(x0, x1, y0, y1)`.
pub type Rect = (f64, f64, f64, f64);

/// Rectangle `ZCurve` with a fixed matching precision.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawRectCurve", into = "RawRectCurve")
)]
pub struct ZRectCurve {
    normalizer: FieldNormalizer,
    precision: u32,
}

/// Wire form of a `ZRectCurve`, checked by `ZRectCurve::new` on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawRectCurve {
    domain_max: f64,
    precision: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRectCurve> for ZRectCurve {
    type Error = crate::error::ZRectError;

    fn try_from(raw: RawRectCurve) -> Result<Self> {
        Self::new(raw.domain_max, raw.precision)
    }
}

#[cfg(feature = "serde")]
impl From<ZRectCurve> for RawRectCurve {
    fn from(curve: ZRectCurve) -> Self {
        RawRectCurve {
            domain_max: curve.domain_max(),
            precision: curve.precision,
        }
    }
}

impl ZRectCurve {
    /// Constructor. Fails if `domain_max` is not a positive finite number or
    /// `precision` exceeds the 16 bits of a field.
    pub fn new(domain_max: f64, precision: u32) -> Result<Self> {
        let normalizer = FieldNormalizer::try_new(domain_max, Z4::BITS_PER_DIMENSION)?;
        let precision = Z4::check_precision(precision)?;
        trace!(domain_max, precision, "created rect curve");
        Ok(ZRectCurve {
            normalizer,
            precision,
        })
    }

    /// Bits per dimension used for matching.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Upper bound of the coordinate domain.
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.normalizer.max()
    }

    /// Coordinate width of one precision cell.
    #[must_use]
    pub fn cell_extent(&self) -> f64 {
        self.normalizer.cell_extent(self.precision)
    }

    /// Get the index for a rectangle.
    #[must_use]
    pub fn index(&self, x0: f64, x1: f64, y0: f64, y1: f64) -> Z4 {
        Z4::new(
            self.normalizer.normalize(x0),
            self.normalizer.normalize(x1),
            self.normalizer.normalize(y0),
            self.normalizer.normalize(y1),
        )
    }

    /// Get the rectangle for an index.
    #[must_use]
    pub fn rect(&self, index: Z4) -> Rect {
        let (x0, x1, y0, y1) = index.decode();
        (
            self.normalizer.denormalize(x0),
            self.normalizer.denormalize(x1),
            self.normalizer.denormalize(y0),
            self.normalizer.denormalize(y1),
        )
    }

    /// Span rectangles of `index` at the curve precision.
    #[must_use]
    pub fn spans(&self, index: Z4) -> RectSpan {
        rect_span(index, self.precision)
    }

    /// Span rectangles of `index` in coordinate space, as `(min, max)`.
    #[must_use]
    pub fn span_rects(&self, index: Z4) -> (Rect, Rect) {
        let span = self.spans(index);
        (self.rect(span.min), self.rect(span.max))
    }

    /// Key range a sorted index would scan to find matches of `index`.
    #[must_use]
    pub fn bucket(&self, index: Z4) -> ZRange {
        index.bucket(self.precision)
    }

    /// Whether two indexes match at the curve precision.
    #[must_use]
    pub fn matches(&self, a: Z4, b: Z4) -> bool {
        a.matches(&b, self.precision)
    }
}
