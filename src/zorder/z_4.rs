//! A four dimensional Z-Order curve holding an axis-aligned rectangle.
//!
//! The rectangle `(x0, x1, y0, y1)` is packed into one `u64` with 16 bits
//! per field. Dimension offsets, from the most significant bit of each
//! group of four down to the least:
//!
//! | field | offset |
//! |-------|--------|
//! | `x0`  | 3      |
//! | `x1`  | 2      |
//! | `y0`  | 1      |
//! | `y1`  | 0      |
//!
//! Keys compare directly, so two rectangles that agree on the high bits of
//! every field sort next to each other.

use crate::error::Result;
use crate::zorder::z_n::ZN;
use crate::zorder::z_range::ZRange;
use core::convert::TryInto;

/// A rectangle encoded as a four dimensional Z-Order value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Z4 {
    z: u64,
}

const _: () = assert!(Z4::TOTAL_BITS % Z4::DIMENSIONS == 0);

impl Z4 {
    /// Dimension offset of `x0`.
    pub const X0_OFFSET: u32 = 3;

    /// Dimension offset of `x1`.
    pub const X1_OFFSET: u32 = 2;

    /// Dimension offset of `y0`.
    pub const Y0_OFFSET: u32 = 1;

    /// Dimension offset of `y1`.
    pub const Y1_OFFSET: u32 = 0;

    /// Constructor for `Z4` from the four rectangle fields.
    ///
    /// Fields wider than 16 bits lose their high bits.
    #[must_use]
    pub fn new(x0: u32, x1: u32, y0: u32, y1: u32) -> Self {
        Self::default()
            .with_x0(x0)
            .with_x1(x1)
            .with_y0(y0)
            .with_y1(y1)
    }

    /// Constructor that fails instead of truncating fields wider than 16 bits.
    pub fn try_new(x0: u32, x1: u32, y0: u32, y1: u32) -> Result<Self> {
        let mut z = 0;
        z = Self::try_encode_field(z, x0, Self::X0_OFFSET)?;
        z = Self::try_encode_field(z, x1, Self::X1_OFFSET)?;
        z = Self::try_encode_field(z, y0, Self::Y0_OFFSET)?;
        z = Self::try_encode_field(z, y1, Self::Y1_OFFSET)?;
        Ok(Self::new_from_zorder(z))
    }

    /// Create a Z4 directly from the z value.
    #[must_use]
    pub const fn new_from_zorder(zorder: u64) -> Self {
        Z4 { z: zorder }
    }

    /// Index value.
    #[must_use]
    pub const fn z(&self) -> u64 {
        self.z
    }

    /// Return the user space values as `(x0, x1, y0, y1)`.
    #[must_use]
    pub fn decode(&self) -> (u32, u32, u32, u32) {
        (self.x0(), self.x1(), self.y0(), self.y1())
    }

    fn dim(&self, offset: u32) -> u32 {
        Self::decode_field(self.z, offset)
    }

    fn with_dim(self, value: u32, offset: u32) -> Self {
        Self::new_from_zorder(Self::encode_field(self.z, value, offset))
    }

    /// Left edge.
    #[must_use]
    pub fn x0(&self) -> u32 {
        self.dim(Self::X0_OFFSET)
    }

    /// Right edge.
    #[must_use]
    pub fn x1(&self) -> u32 {
        self.dim(Self::X1_OFFSET)
    }

    /// Top edge.
    #[must_use]
    pub fn y0(&self) -> u32 {
        self.dim(Self::Y0_OFFSET)
    }

    /// Bottom edge.
    #[must_use]
    pub fn y1(&self) -> u32 {
        self.dim(Self::Y1_OFFSET)
    }

    /// Replace `x0`, truncating to 16 bits.
    pub fn set_x0(&mut self, value: u32) {
        *self = self.with_x0(value);
    }

    /// Replace `x1`, truncating to 16 bits.
    pub fn set_x1(&mut self, value: u32) {
        *self = self.with_x1(value);
    }

    /// Replace `y0`, truncating to 16 bits.
    pub fn set_y0(&mut self, value: u32) {
        *self = self.with_y0(value);
    }

    /// Replace `y1`, truncating to 16 bits.
    pub fn set_y1(&mut self, value: u32) {
        *self = self.with_y1(value);
    }

    /// Copy of `self` with a new `x0`.
    #[must_use]
    pub fn with_x0(self, value: u32) -> Self {
        self.with_dim(value, Self::X0_OFFSET)
    }

    /// Copy of `self` with a new `x1`.
    #[must_use]
    pub fn with_x1(self, value: u32) -> Self {
        self.with_dim(value, Self::X1_OFFSET)
    }

    /// Copy of `self` with a new `y0`.
    #[must_use]
    pub fn with_y0(self, value: u32) -> Self {
        self.with_dim(value, Self::Y0_OFFSET)
    }

    /// Copy of `self` with a new `y1`.
    #[must_use]
    pub fn with_y1(self, value: u32) -> Self {
        self.with_dim(value, Self::Y1_OFFSET)
    }

    /// Keep only the `precision` most significant bits of every field.
    ///
    /// # NOTE:
    ///   panics if `precision > 16`
    #[must_use]
    pub fn truncate(&self, precision: u32) -> Self {
        Self::new_from_zorder(<Self as ZN>::truncate(self.z, precision))
    }

    /// Range of keys that match `self` at `precision`.
    #[must_use]
    pub fn bucket(&self, precision: u32) -> ZRange {
        ZRange::bucket::<Self>(self.z, precision)
    }

    /// Approximate equality: both rectangles agree on the `precision` most
    /// significant bits of every field.
    #[must_use]
    pub fn matches(&self, other: &Z4, precision: u32) -> bool {
        <Self as ZN>::truncate(self.z, precision) == <Self as ZN>::truncate(other.z, precision)
    }

    /// Highest precision at which `self` and `other` still match.
    #[must_use]
    pub fn common_precision(&self, other: &Z4) -> u32 {
        Self::longest_common_prefix(&[self.z, other.z]).precision
    }
}

impl ZN for Z4 {
    const DIMENSIONS: u32 = 4;

    const BITS_PER_DIMENSION: u32 = 16;

    const TOTAL_BITS: u32 = Self::DIMENSIONS * Self::BITS_PER_DIMENSION;

    const MAX_MASK: u64 = 0xffff;

    const SPREAD_MASK: u64 = 0x1111_1111_1111_1111;

    fn split(value: u32) -> u64 {
        let mut x = u64::from(value) & Self::MAX_MASK;
        x = (x | x << 24) & 0x0000_00ff_0000_00ff;
        x = (x | x << 12) & 0x000f_000f_000f_000f;
        x = (x | x << 6) & 0x0303_0303_0303_0303;
        (x | x << 3) & Self::SPREAD_MASK
    }

    fn combine(z: u64) -> u32 {
        let mut x = z & Self::SPREAD_MASK;
        x = (x ^ (x >> 3)) & 0x0303_0303_0303_0303;
        x = (x ^ (x >> 6)) & 0x000f_000f_000f_000f;
        x = (x ^ (x >> 12)) & 0x0000_00ff_0000_00ff;
        x = (x ^ (x >> 24)) & Self::MAX_MASK;
        x.try_into()
            .expect("combine reduces the number of bits to a quarter.")
    }
}

impl From<u64> for Z4 {
    fn from(zorder: u64) -> Self {
        Self::new_from_zorder(zorder)
    }
}

impl From<Z4> for u64 {
    fn from(z: Z4) -> Self {
        z.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZRectError;
    use crate::wide_quickcheck;

    const OFFSETS: [u32; 4] = [Z4::X0_OFFSET, Z4::X1_OFFSET, Z4::Y0_OFFSET, Z4::Y1_OFFSET];

    fn reference_encode(key: u64, value: u32, offset: u32) -> u64 {
        let mut res = key;
        for i in 0..16 {
            res &= !(1_u64 << (i * 4 + offset));
        }
        for i in 0..16 {
            if value & (1 << i) != 0 {
                res |= 1_u64 << (i * 4 + offset);
            }
        }
        res
    }

    fn reference_decode(key: u64, offset: u32) -> u32 {
        let mut res = 0;
        for i in 0..16 {
            if key & (1_u64 << (i * 4 + offset)) != 0 {
                res |= 1 << i;
            }
        }
        res
    }

    #[test]
    fn test_every_value_round_trips_in_every_dimension() {
        for &offset in &OFFSETS {
            for v in 0..=0xffff_u32 {
                assert_eq!(Z4::decode_field(Z4::encode_field(0, v, offset), offset), v);
            }
        }
    }

    #[test]
    fn test_offset_layout() {
        assert_eq!(Z4::new(0, 0, 0, 1).z(), 0b0001);
        assert_eq!(Z4::new(0, 0, 1, 0).z(), 0b0010);
        assert_eq!(Z4::new(0, 1, 0, 0).z(), 0b0100);
        assert_eq!(Z4::new(1, 0, 0, 0).z(), 0b1000);
        assert_eq!(Z4::new(2, 0, 0, 0).z(), 0b1000_0000);
        assert_eq!(Z4::new(0x8000, 0, 0, 0).z(), 1 << 63);
    }

    #[test]
    fn test_extremes() {
        let full = Z4::new(0xffff, 0xffff, 0xffff, 0xffff);
        assert_eq!(full.z(), u64::max_value());
        assert_eq!(full.decode(), (0xffff, 0xffff, 0xffff, 0xffff));
        assert_eq!(Z4::new(0, 0, 0, 0).z(), 0);
        assert_eq!(Z4::max_field(), 0xffff);
    }

    #[test]
    fn test_concrete_rectangle() {
        let rect = Z4::new(33096, 147_833, 24770, 95027);
        assert_eq!(rect.decode(), (33096, 147_833 % 65536, 24770, 95027 % 65536));
        assert_eq!(rect.decode(), (0x8148, 0x4179, 0x60c2, 0x7333));

        let truncated = rect.truncate(4);
        assert_eq!(truncated.decode(), (0x8000, 0x4000, 0x6000, 0x7000));
        assert_eq!(truncated.z() & 0x0000_ffff_ffff_ffff, 0);
        assert_eq!(truncated.z(), rect.z() & 0xffff_0000_0000_0000);
    }

    #[test]
    fn test_wide_values_are_truncated() {
        let rect = Z4::new(70000, 0, 0, 0);
        assert_eq!(rect.x0(), 70000 % 65536);
        assert_eq!(Z4::decode_field(Z4::encode_field(0, 70000, 0), 0), 4464);
    }

    #[test]
    fn test_strict_constructor_rejects_wide_values() {
        assert_eq!(
            Z4::try_new(1, 2, 70000, 4),
            Err(ZRectError::FieldOutOfRange {
                value: 70000,
                max: 0xffff
            })
        );
        assert_eq!(Z4::try_new(1, 2, 3, 4), Ok(Z4::new(1, 2, 3, 4)));
        assert_eq!(
            Z4::try_encode_field(0, 1, 4),
            Err(ZRectError::DimensionOutOfRange {
                offset: 4,
                dimensions: 4
            })
        );
    }

    #[test]
    fn test_setters() {
        let mut rect = Z4::new(10, 20, 30, 40);
        rect.set_x0(11);
        rect.set_y1(41);
        assert_eq!(rect.decode(), (11, 20, 30, 41));
        rect.set_x1(21);
        rect.set_y0(31);
        assert_eq!(rect.decode(), (11, 21, 31, 41));
    }

    #[test]
    fn test_matches() {
        let a = Z4::new(0x1200, 0x3400, 0x5600, 0x7800);
        let b = Z4::new(0x12ff, 0x34ff, 0x56ff, 0x78ff);
        assert!(a.matches(&b, 8));
        assert!(!a.matches(&b, 9));
        assert!(a.matches(&b, 0));
        assert_eq!(a.common_precision(&b), 8);
        assert_eq!(a.common_precision(&a), 16);
    }

    #[test]
    fn test_longest_common_prefix() {
        let values = [
            Z4::new(0x8000, 0, 0, 0).z(),
            Z4::new(0x8fff, 0, 0, 0).z(),
            Z4::new(0x8000, 0x0fff, 0, 0).z(),
        ];
        let prefix = Z4::longest_common_prefix(&values);
        assert_eq!(prefix.precision, 4);
        assert_eq!(prefix.prefix, Z4::new(0x8000, 0, 0, 0).z());

        let disjoint = [Z4::new(0, 0, 0, 0).z(), Z4::new(0, 0, 0, 0x8000).z()];
        assert_eq!(Z4::longest_common_prefix(&disjoint).precision, 0);
    }

    #[test]
    fn test_userspace_to_z4_and_back() {
        wide_quickcheck()
            .quickcheck(prop_userspace_to_z4_and_back as fn(u16, u16, u16, u16) -> bool);
    }

    fn prop_userspace_to_z4_and_back(x0: u16, x1: u16, y0: u16, y1: u16) -> bool {
        let rect = Z4::new(x0.into(), x1.into(), y0.into(), y1.into());
        rect.decode() == (x0.into(), x1.into(), y0.into(), y1.into())
    }

    #[test]
    fn test_encode_matches_bitwise_reference() {
        wide_quickcheck()
            .quickcheck(prop_encode_matches_bitwise_reference as fn(u64, u32, u8) -> bool);
    }

    fn prop_encode_matches_bitwise_reference(key: u64, value: u32, offset: u8) -> bool {
        let offset = u32::from(offset % 4);
        Z4::encode_field(key, value, offset) == reference_encode(key, value, offset)
            && Z4::decode_field(key, offset) == reference_decode(key, offset)
    }

    #[test]
    fn test_wide_values_keep_low_sixteen_bits() {
        wide_quickcheck().quickcheck(prop_wide_values_keep_low_sixteen_bits as fn(u32, u8) -> bool);
    }

    fn prop_wide_values_keep_low_sixteen_bits(value: u32, offset: u8) -> bool {
        let offset = u32::from(offset % 4);
        Z4::decode_field(Z4::encode_field(0, value, offset), offset) == value % 65536
    }

    #[test]
    fn test_dimension_isolation() {
        wide_quickcheck().quickcheck(prop_dimension_isolation as fn(u64, u16, u8) -> bool);
    }

    fn prop_dimension_isolation(key: u64, value: u16, offset: u8) -> bool {
        let offset = u32::from(offset % 4);
        let encoded = Z4::encode_field(key, value.into(), offset);
        OFFSETS
            .iter()
            .filter(|&&other| other != offset)
            .all(|&other| Z4::decode_field(encoded, other) == Z4::decode_field(key, other))
    }

    #[test]
    fn test_truncation_is_idempotent() {
        wide_quickcheck().quickcheck(prop_truncation_is_idempotent as fn(u64, u8) -> bool);
    }

    fn prop_truncation_is_idempotent(key: u64, precision: u8) -> bool {
        let precision = u32::from(precision % 17);
        let once = Z4::new_from_zorder(key).truncate(precision);
        once.truncate(precision) == once
    }

    #[test]
    fn test_truncation_clears_low_field_bits() {
        wide_quickcheck()
            .quickcheck(
                prop_truncation_clears_low_field_bits as fn(u16, u16, u16, u16, u8) -> bool,
            );
    }

    fn prop_truncation_clears_low_field_bits(
        x0: u16,
        x1: u16,
        y0: u16,
        y1: u16,
        p: u8,
    ) -> bool {
        let precision = u32::from(p % 17);
        let low = (1_u32 << (16 - precision)) - 1;
        let (a, b, c, d) = Z4::new(x0.into(), x1.into(), y0.into(), y1.into())
            .truncate(precision)
            .decode();
        a == u32::from(x0) & !low
            && b == u32::from(x1) & !low
            && c == u32::from(y0) & !low
            && d == u32::from(y1) & !low
    }
}
