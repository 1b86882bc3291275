//! BC3 block encoding: [`encode_channel_block`] for alpha, [`encode_color_block`] for colour.

use crate::BC3_BLOCK_SIZE;
use texel_pipeline_bc1::encode_color_block;
use texel_pipeline_bc4::encode_channel_block;
use texel_pipeline_common::{
    decoded_4x4_block::Decoded4x4Block, encoded_block::EncodedBlock, CodecError, CodecResult,
};

/// Encodes a block as BC3.
///
/// # Parameters
///
/// - `block`: The texels to encode
/// - `refine`: Whether the colour encoder runs its least-squares refinement
///
/// # Returns
///
/// The block and its error: squared RGB error plus the absolute alpha error.
pub fn encode_bc3_block(block: &Decoded4x4Block, refine: bool) -> EncodedBlock<BC3_BLOCK_SIZE> {
    let alpha = encode_channel_block(&block.pixels.map(|pixel| pixel.a));
    let color = encode_color_block(block, refine);

    let mut bytes = [0u8; BC3_BLOCK_SIZE];
    bytes[..8].copy_from_slice(&alpha.bytes);
    bytes[8..].copy_from_slice(&color.bytes);
    EncodedBlock {
        bytes,
        error: color.error + alpha.error,
    }
}

/// Encodes a block as BC3 into `dst`, returning the error metric.
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if `dst` is shorter than one block; nothing is written.
pub fn encode_bc3_block_into_slice(
    block: &Decoded4x4Block,
    dst: &mut [u8],
    refine: bool,
) -> CodecResult<u32> {
    CodecError::check_block_len(dst.len(), BC3_BLOCK_SIZE)?;
    let encoded = encode_bc3_block(block, refine);
    encoded.write_to(dst);
    Ok(encoded.error)
}
