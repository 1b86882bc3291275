//! BC2 block encoding.

use crate::BC2_BLOCK_SIZE;
use texel_pipeline_bc1::encode_color_block;
use texel_pipeline_common::{
    decoded_4x4_block::Decoded4x4Block, encoded_block::EncodedBlock, CodecError, CodecResult,
};

/// Quantizes an 8-bit alpha to the nearest 4-bit value.
#[inline]
pub fn quantize_alpha(alpha: u8) -> u8 {
    ((alpha as u32 * 15 + 127) / 255) as u8
}

/// Encodes a block as BC2.
///
/// # Parameters
///
/// - `block`: The texels to encode
/// - `refine`: Whether the colour encoder runs its least-squares refinement
///
/// # Returns
///
/// The block and its sum of squared RGBA errors.
pub fn encode_bc2_block(block: &Decoded4x4Block, refine: bool) -> EncodedBlock<BC2_BLOCK_SIZE> {
    let color = encode_color_block(block, refine);

    let mut alphas = 0u64;
    let mut alpha_error = 0u32;
    for (i, pixel) in block.pixels.iter().enumerate() {
        let nibble = quantize_alpha(pixel.a);
        let diff = pixel.a.abs_diff(nibble * 17) as u32;
        alphas |= (nibble as u64) << (i * 4);
        alpha_error += diff * diff;
    }

    let mut bytes = [0u8; BC2_BLOCK_SIZE];
    bytes[..8].copy_from_slice(&alphas.to_le_bytes());
    bytes[8..].copy_from_slice(&color.bytes);
    EncodedBlock {
        bytes,
        error: color.error + alpha_error,
    }
}

/// Encodes a block as BC2 into `dst`, returning the error metric.
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if `dst` is shorter than one block; nothing is written.
pub fn encode_bc2_block_into_slice(
    block: &Decoded4x4Block,
    dst: &mut [u8],
    refine: bool,
) -> CodecResult<u32> {
    CodecError::check_block_len(dst.len(), BC2_BLOCK_SIZE)?;
    let encoded = encode_bc2_block(block, refine);
    encoded.write_to(dst);
    Ok(encoded.error)
}
