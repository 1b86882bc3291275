//! BC2 (DXT2/DXT3) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc2>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::BC2_BLOCK_SIZE;
use texel_pipeline_bc1::decode::{decode_color_block, ColorPaletteMode};
use texel_pipeline_common::{decoded_4x4_block::Decoded4x4Block, CodecError, CodecResult};

/// Decodes a BC2 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC2 block (must point to at least 16 bytes of valid memory)
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
/// use texel_pipeline_bc2::decode_bc2_block;
///
/// let bc2_block = [0u8; 16]; // Compressed BC2 block
///
/// // Decode the BC2 block into a structured representation
/// unsafe {
///     let decoded = decode_bc2_block(bc2_block.as_ptr());
///
///     // Access individual pixels
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline(always)]
pub unsafe fn decode_bc2_block(src: *const u8) -> Decoded4x4Block {
    // Last 8 bytes contain the color data (same format as BC1)
    let mut result = decode_color_block(src.add(8), ColorPaletteMode::FourColor);

    // First 8 bytes: 16 alpha nibbles.
    let mut alpha_bytes = [0u8; 8];
    core::ptr::copy_nonoverlapping(src, alpha_bytes.as_mut_ptr(), 8);
    let alphas = u64::from_le_bytes(alpha_bytes);

    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        let alpha = ((alphas >> (i * 4)) & 0xF) as u8;
        pixel.a = alpha * 17;
    }

    result
}

/// Safely wraps the unsafe [`decode_bc2_block`] function for use with slices
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if the slice is shorter than one block.
#[inline(always)]
pub fn decode_bc2_block_from_slice(src: &[u8]) -> CodecResult<Decoded4x4Block> {
    CodecError::check_block_len(src.len(), BC2_BLOCK_SIZE)?;
    unsafe { Ok(decode_bc2_block(src.as_ptr())) }
}
