//! `R9G9B9E5SharedExp`: three 9-bit mantissas sharing one 5-bit exponent.
//!
//! Layout (little-endian `u32`): red in bits 0-8, green 9-17, blue 18-26,
//! exponent 27-31. A channel decodes to `mantissa * 2^(exponent - 15 - 9)`.

const MANTISSA_BITS: i32 = 9;
const EXPONENT_BIAS: i32 = 15;
const MAX_EXPONENT: i32 = 31;

/// Largest representable channel value, `(511 / 512) * 2^16`.
pub const RGB9E5_MAX: f32 = 65408.0;

/// Packs three non-negative channels.
///
/// Picks the smallest shared exponent at which the largest channel fits in
/// nine bits, then rounds each channel to nearest independently. Negative
/// values and NaN become zero; values above [`RGB9E5_MAX`] are clamped.
pub fn pack_rgb9e5(rgb: [f32; 3]) -> u32 {
    let [r, g, b] = rgb.map(|v| {
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, RGB9E5_MAX) as f64
        }
    });
    let max = r.max(g).max(b);

    // log2(0) is -inf, which the lower bound absorbs.
    let mut exponent = (max.log2().floor() as i32).max(-EXPONENT_BIAS - 1) + 1 + EXPONENT_BIAS;
    let mut scale = f64::powi(2.0, exponent - EXPONENT_BIAS - MANTISSA_BITS);

    if (max / scale + 0.5).floor() as i32 == 1 << MANTISSA_BITS {
        // Rounding overflowed the mantissa.
        scale *= 2.0;
        exponent += 1;
    }
    debug_assert!((0..=MAX_EXPONENT).contains(&exponent));

    let quantize = |v: f64| ((v / scale + 0.5).floor() as u32).min(511);
    quantize(r) | (quantize(g) << 9) | (quantize(b) << 18) | ((exponent as u32) << 27)
}

/// Unpacks into `[r, g, b]`.
pub fn unpack_rgb9e5(packed: u32) -> [f32; 3] {
    let exponent = (packed >> 27) as i32;
    let scale = f32::powi(2.0, exponent - EXPONENT_BIAS - MANTISSA_BITS);
    [
        (packed & 0x1FF) as f32 * scale,
        ((packed >> 9) & 0x1FF) as f32 * scale,
        ((packed >> 18) & 0x1FF) as f32 * scale,
    ]
}

/// Spacing between adjacent representable values at the exponent stored in `packed`.
#[inline]
pub fn rgb9e5_ulp(packed: u32) -> f32 {
    f32::powi(2.0, (packed >> 27) as i32 - EXPONENT_BIAS - MANTISSA_BITS)
}
