//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::settings::Bc1DecodeSettings;
use crate::BC1_BLOCK_SIZE;
use texel_pipeline_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, CodecError,
    CodecResult,
};

/// Which palette a colour block decodes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPaletteMode {
    /// BC1 rules: 4 colours when `color0 > color1`, otherwise 3 colours plus
    /// black, transparent when `allow_alpha` is set.
    Bc1 {
        /// See [`Bc1DecodeSettings::allow_alpha`].
        allow_alpha: bool,
    },
    /// Always 4 colours, regardless of endpoint order. Used by BC2 and BC3.
    FourColor,
}

/// Builds the 4-colour palette: both endpoints, then the (2/3, 1/3) and
/// (1/3, 2/3) interpolations.
#[inline]
pub fn four_color_palette(c0: Color565, c1: Color565) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    [
        Color8888::new(r0 as u8, g0 as u8, b0 as u8, 255),
        Color8888::new(r1 as u8, g1 as u8, b1 as u8, 255),
        Color8888::new(
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
            255,
        ),
        Color8888::new(
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
            255,
        ),
    ]
}

/// Builds the 3-colour palette: both endpoints, their midpoint and black.
///
/// # Parameters
///
/// - `allow_alpha`: Whether the black entry is transparent (alpha 0) or opaque
#[inline]
pub fn three_color_palette(c0: Color565, c1: Color565, allow_alpha: bool) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    [
        Color8888::new(r0 as u8, g0 as u8, b0 as u8, 255),
        Color8888::new(r1 as u8, g1 as u8, b1 as u8, 255),
        Color8888::new(
            ((r0 + r1) / 2) as u8,
            ((g0 + g1) / 2) as u8,
            ((b0 + b1) / 2) as u8,
            255,
        ),
        Color8888::new(0, 0, 0, if allow_alpha { 0 } else { 255 }),
    ]
}

/// Builds the palette a colour block with endpoints `c0` and `c1` decodes with.
///
/// The layout is picked by comparing the packed 16-bit endpoint values.
#[inline]
pub fn color_palette(c0: Color565, c1: Color565, mode: ColorPaletteMode) -> [Color8888; 4] {
    match mode {
        ColorPaletteMode::FourColor => four_color_palette(c0, c1),
        ColorPaletteMode::Bc1 { .. } if c0.greater_than(&c1) => four_color_palette(c0, c1),
        ColorPaletteMode::Bc1 { allow_alpha } => three_color_palette(c0, c1, allow_alpha),
    }
}

/// Decodes an 8-byte colour block (a BC1 block, or the colour half of BC2/BC3).
///
/// # Parameters
///
/// - `src`: Pointer to the colour block
/// - `mode`: Palette rules to decode with
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
#[inline(always)]
pub unsafe fn decode_color_block(src: *const u8, mode: ColorPaletteMode) -> Decoded4x4Block {
    // Extract color endpoints and index data
    let c0 = Color565::from_raw(u16::from_le_bytes([*src, *src.add(1)]));
    let c1 = Color565::from_raw(u16::from_le_bytes([*src.add(2), *src.add(3)]));
    let idx: u32 = u32::from_le_bytes([*src.add(4), *src.add(5), *src.add(6), *src.add(7)]);

    let dict = color_palette(c0, c1, mode);

    let mut result = Decoded4x4Block::new(Color8888::default());
    let mut index_pos = 0;
    for y in 0..4 {
        for x in 0..4 {
            let pixel_idx = (idx >> index_pos) & 0x3;
            result.set_pixel_unchecked(x, y, *dict.get_unchecked(pixel_idx as usize));
            index_pos += 2;
        }
    }

    result
}

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC1 block (must point to at least 8 bytes of valid memory)
/// - `settings`: Decoder settings
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
///
/// # Example
///
/// ```
/// use texel_pipeline_bc1::{decode_bc1_block, Bc1DecodeSettings};
///
/// let bc1_block = [0u8; 8]; // Compressed BC1 block
///
/// // Decode the BC1 block into a structured representation
/// unsafe {
///     let decoded = decode_bc1_block(bc1_block.as_ptr(), Bc1DecodeSettings::default());
///
///     // Access individual pixels
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline(always)]
pub unsafe fn decode_bc1_block(src: *const u8, settings: Bc1DecodeSettings) -> Decoded4x4Block {
    decode_color_block(
        src,
        ColorPaletteMode::Bc1 {
            allow_alpha: settings.allow_alpha,
        },
    )
}

/// Safely wraps the unsafe [`decode_bc1_block`] function for use with slices
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if the slice is shorter than one block.
#[inline(always)]
pub fn decode_bc1_block_from_slice(
    src: &[u8],
    settings: Bc1DecodeSettings,
) -> CodecResult<Decoded4x4Block> {
    CodecError::check_block_len(src.len(), BC1_BLOCK_SIZE)?;
    unsafe { Ok(decode_bc1_block(src.as_ptr(), settings)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn can_decode_bc1_block() {
        // Test case: Simple red color
        let bc1_block = [
            0x00, 0xF8, // c0 = R:31 G:0 B:0
            0x00, 0xF8, // c1 = R:31 G:0 B:0 (identical to create solid color)
            0x00, 0x00, 0x00, 0x00, // All pixels use index 0
        ];

        let decoded = decode_bc1_block_from_slice(&bc1_block, Bc1DecodeSettings::default()).unwrap();
        assert!(decoded.has_identical_pixels());
        assert_eq!(decoded.pixels[0], Color8888::new(255, 0, 0, 255));
    }

    /// Regression: with `color0 > color1` index 2 is the 2/3 blend, never the midpoint.
    #[test]
    fn index_2_is_two_thirds_blend_when_color0_greater() {
        let block = bc1_block(0xFFFF, 0x0000, [2; 16]);
        let decoded = decode_bc1_block_from_slice(&block, Bc1DecodeSettings::default()).unwrap();
        assert!(decoded.has_identical_pixels());
        // (2 * 255 + 0) / 3 = 170; the midpoint would be 127.
        assert_eq!(decoded.pixels[0], Color8888::new(170, 170, 170, 255));

        let block = bc1_block(0xFFFF, 0x0000, [3; 16]);
        let decoded = decode_bc1_block_from_slice(&block, Bc1DecodeSettings::default()).unwrap();
        assert_eq!(decoded.pixels[0], Color8888::new(85, 85, 85, 255));
    }

    #[rstest]
    #[case(true, Color8888::new(0, 0, 0, 0))]
    #[case(false, Color8888::new(0, 0, 0, 255))]
    fn alpha_key_entry_respects_allow_alpha(#[case] allow_alpha: bool, #[case] expected: Color8888) {
        // c0 = R:30 < c1 = R:31, so this is a 3-colour block.
        let block = bc1_block(0xF000, 0xF800, [3; 16]);
        let decoded = decode_bc1_block_from_slice(&block, Bc1DecodeSettings { allow_alpha }).unwrap();
        assert!(decoded.has_identical_pixels());
        assert_eq!(decoded.pixels[0], expected);
    }

    #[test]
    fn three_color_mode_uses_midpoint() {
        let block = bc1_block(0x0000, 0xFFFF, [2; 16]);
        let decoded = decode_bc1_block_from_slice(&block, Bc1DecodeSettings::default()).unwrap();
        assert_eq!(decoded.pixels[0], Color8888::new(127, 127, 127, 255));
    }

    #[test]
    fn four_color_mode_ignores_endpoint_order() {
        let block = bc1_block(0x0000, 0xFFFF, [2; 16]);
        let decoded = unsafe { decode_color_block(block.as_ptr(), ColorPaletteMode::FourColor) };
        assert_eq!(decoded.pixels[0], Color8888::new(85, 85, 85, 255));
    }

    #[test]
    fn indices_are_row_major_two_bits_each() {
        let mut indices = [0u8; 16];
        indices[5] = 1; // (1, 1)
        indices[15] = 1; // (3, 3)
        let block = bc1_block(0xF800, 0x001F, indices);
        let decoded = decode_bc1_block_from_slice(&block, Bc1DecodeSettings::default()).unwrap();

        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(255, 0, 0, 255));
        assert_eq!(decoded.get_pixel(1, 1), Color8888::new(0, 0, 255, 255));
        assert_eq!(decoded.get_pixel(3, 3), Color8888::new(0, 0, 255, 255));
    }

    #[test]
    fn short_slice_is_invalid_argument() {
        assert!(matches!(
            decode_bc1_block_from_slice(&[0; 7], Bc1DecodeSettings::default()),
            Err(CodecError::InvalidArgument(_))
        ));
    }
}
