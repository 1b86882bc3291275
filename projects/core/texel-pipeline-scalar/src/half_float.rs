//! IEEE-754 binary16 <-> binary32.
//!
//! Thin wrappers over the [`half`] crate's conversions: round to nearest even,
//! subnormals preserved, overflow saturates to infinity of the matching sign,
//! NaN stays NaN (payload class, not exact bits).

use half::f16;

/// Converts an `f32` to the bits of the nearest binary16 value.
#[inline]
pub fn pack_half(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

/// Expands binary16 bits to an `f32`. Exact for every non-NaN input.
#[inline]
pub fn unpack_half(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_non_nan_half_round_trips() {
        for bits in 0..=u16::MAX {
            let value = unpack_half(bits);
            if value.is_nan() {
                continue;
            }
            assert_eq!(pack_half(value), bits, "bits {bits:#06X}");
        }
    }

    #[rstest]
    #[case(1.0e6, 0x7C00)]
    #[case(-1.0e6, 0xFC00)]
    #[case(65520.0, 0x7C00)] // rounds up past the largest finite half
    #[case(65504.0, 0x7BFF)]
    #[case(f32::INFINITY, 0x7C00)]
    #[case(5.960_464_5e-8, 0x0001)] // smallest subnormal
    fn saturates_and_keeps_subnormals(#[case] value: f32, #[case] expected: u16) {
        assert_eq!(pack_half(value), expected);
    }

    #[test]
    fn nan_stays_nan() {
        assert!(unpack_half(pack_half(f32::NAN)).is_nan());
        assert!(unpack_half(0x7E01).is_nan());
    }
}
