//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::BC3_BLOCK_SIZE;
use texel_pipeline_bc1::decode::{decode_color_block, ColorPaletteMode};
use texel_pipeline_bc4::decode_channel_block;
use texel_pipeline_common::{decoded_4x4_block::Decoded4x4Block, CodecError, CodecResult};

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC3 block (must point to at least 16 bytes of valid memory)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels with alpha
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 16 bytes of valid memory.
///
/// # Example
///
/// ```
/// use texel_pipeline_bc3::decode_bc3_block;
///
/// let bc3_block = [0u8; 16]; // Compressed BC3 block
///
/// // Decode the BC3 block into a structured representation
/// unsafe {
///     let decoded = decode_bc3_block(bc3_block.as_ptr());
///
///     // Access individual pixels
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline(always)]
pub unsafe fn decode_bc3_block(src: *const u8) -> Decoded4x4Block {
    // Last 8 bytes contain the color data (same format as BC1)
    let mut result = decode_color_block(src.add(8), ColorPaletteMode::FourColor);

    // First 8 bytes contain the BC4 compressed alpha data
    let alphas = decode_channel_block(src);
    for (pixel, alpha) in result.pixels.iter_mut().zip(alphas) {
        pixel.a = alpha;
    }

    result
}

/// Safely wraps the unsafe [`decode_bc3_block`] function for use with slices
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if the slice is shorter than one block.
#[inline(always)]
pub fn decode_bc3_block_from_slice(src: &[u8]) -> CodecResult<Decoded4x4Block> {
    CodecError::check_block_len(src.len(), BC3_BLOCK_SIZE)?;
    unsafe { Ok(decode_bc3_block(src.as_ptr())) }
}
