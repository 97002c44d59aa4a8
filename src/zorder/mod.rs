//! Z-Order curve for rectangles: the interleaving codec, key ranges, span
//! rectangles and a coordinate-space facade.

pub mod span;
pub mod z_4;
pub mod z_n;
pub mod z_range;
pub mod z_rect_curve;
