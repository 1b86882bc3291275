//! Unsigned small floats as stored in `R11G11B10Float`.
//!
//! Both variants have a 5-bit exponent (bias 15) and no sign bit; the 11-bit
//! float has a 6-bit mantissa and the 10-bit float a 5-bit mantissa.
//!
//! Packing rounds to nearest (ties to even), flushes negative values and
//! negative infinity to zero, saturates finite overflow to the largest finite
//! value, and keeps `+inf` and NaN.

/// Mantissa width of the 11-bit float (red and green channels).
pub const FLOAT11_MANTISSA_BITS: u32 = 6;

/// Mantissa width of the 10-bit float (blue channel).
pub const FLOAT10_MANTISSA_BITS: u32 = 5;

const F32_EXPONENT_MASK: u32 = 0x7F80_0000;
const F32_MANTISSA_MASK: u32 = 0x007F_FFFF;

/// Packs an `f32` into an unsigned float with `mantissa_bits` of mantissa and
/// a 5-bit exponent. The result occupies the low `mantissa_bits + 5` bits.
///
/// # Parameters
///
/// - `value`: The value to pack
/// - `mantissa_bits`: [`FLOAT11_MANTISSA_BITS`] or [`FLOAT10_MANTISSA_BITS`]
pub fn pack_small_float(value: f32, mantissa_bits: u32) -> u32 {
    debug_assert!(mantissa_bits == 5 || mantissa_bits == 6);

    let bits = value.to_bits();
    let mantissa_mask = (1u32 << mantissa_bits) - 1;
    let exponent_mask = 0x1F << mantissa_bits;
    let shift = 23 - mantissa_bits;

    if bits & F32_EXPONENT_MASK == F32_EXPONENT_MASK {
        let payload = bits & F32_MANTISSA_MASK;
        if payload != 0 {
            // NaN: keep the top payload bits, or the quiet bit if those are all zero.
            let mantissa = (payload >> shift) & mantissa_mask;
            let mantissa = if mantissa == 0 {
                1 << (mantissa_bits - 1)
            } else {
                mantissa
            };
            return exponent_mask | mantissa;
        }
        return if bits & 0x8000_0000 != 0 {
            0
        } else {
            exponent_mask
        };
    }

    if bits & 0x8000_0000 != 0 {
        return 0;
    }

    // Largest finite value, as f32 bits: 65024 (11-bit) or 64512 (10-bit).
    let max_finite = (142u32 << 23) | (mantissa_mask << shift);
    if bits > max_finite {
        return (0x1E << mantissa_bits) | mantissa_mask;
    }

    let rebased = if bits < 0x3880_0000 {
        // Below 2^-14: becomes a denormal.
        let denormal_shift = 113 - (bits >> 23);
        if denormal_shift > 24 {
            0
        } else {
            (0x0080_0000 | (bits & F32_MANTISSA_MASK)) >> denormal_shift
        }
    } else {
        // Rebias the exponent from 127 to 15.
        bits.wrapping_add(0xC800_0000)
    };

    let rounded = (rebased + ((1 << (shift - 1)) - 1) + ((rebased >> shift) & 1)) >> shift;
    rounded & (exponent_mask | mantissa_mask)
}

/// Expands an unsigned small float stored in the low `mantissa_bits + 5` bits.
pub fn unpack_small_float(packed: u32, mantissa_bits: u32) -> f32 {
    let mantissa = packed & ((1 << mantissa_bits) - 1);
    let exponent = (packed >> mantissa_bits) & 0x1F;
    let shift = 23 - mantissa_bits;

    match exponent {
        0x1F => f32::from_bits(F32_EXPONENT_MASK | (mantissa << shift)),
        0 => mantissa as f32 * f32::powi(2.0, -14 - mantissa_bits as i32),
        _ => f32::from_bits(((exponent + 112) << 23) | (mantissa << shift)),
    }
}

/// Packs the red channel of an `R11G11B10Float` texel.
#[inline]
pub fn pack_float11(value: f32) -> u32 {
    pack_small_float(value, FLOAT11_MANTISSA_BITS)
}

/// Packs the blue channel of an `R11G11B10Float` texel.
#[inline]
pub fn pack_float10(value: f32) -> u32 {
    pack_small_float(value, FLOAT10_MANTISSA_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FLOAT11_MANTISSA_BITS)]
    #[case(FLOAT10_MANTISSA_BITS)]
    fn every_pattern_round_trips(#[case] mantissa_bits: u32) {
        for packed in 0..(1u32 << (mantissa_bits + 5)) {
            let value = unpack_small_float(packed, mantissa_bits);
            assert_eq!(
                pack_small_float(value, mantissa_bits),
                packed,
                "pattern {packed:#X} ({value})"
            );
        }
    }

    #[rstest]
    #[case(1.0, 0x3C0)]
    #[case(0.5, 0x380)]
    #[case(-1.0, 0)]
    #[case(f32::NEG_INFINITY, 0)]
    #[case(f32::INFINITY, 0x7C0)]
    #[case(1.0e9, 0x7BF)]
    #[case(65024.0, 0x7BF)]
    #[case(1.0e-30, 0)]
    fn packs_float11(#[case] value: f32, #[case] expected: u32) {
        assert_eq!(pack_float11(value), expected);
    }

    #[test]
    fn float10_saturates_at_its_own_maximum() {
        assert_eq!(pack_float10(1.0e9), 0x3DF);
        assert_eq!(unpack_small_float(0x3DF, FLOAT10_MANTISSA_BITS), 64512.0);
    }

    #[test]
    fn nan_is_preserved() {
        let packed = pack_float11(f32::NAN);
        assert_eq!(packed & 0x7C0, 0x7C0);
        assert_ne!(packed & 0x3F, 0);
        assert!(unpack_small_float(packed, FLOAT11_MANTISSA_BITS).is_nan());
    }

    #[test]
    fn rounds_to_nearest() {
        // 1 + 1/128 is halfway between 1 and 1 + 1/64; ties go to even.
        assert_eq!(pack_float11(1.0 + 1.0 / 128.0), 0x3C0);
        assert_eq!(pack_float11(1.0 + 3.0 / 128.0), 0x3C2);
        assert_eq!(pack_float11(1.0 + 1.0 / 100.0), 0x3C1);
    }
}
