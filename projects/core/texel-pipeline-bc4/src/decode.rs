//! BC4 and BC5 block decoding.
//!
//! BC4 decodes into red, BC5 into red and green. Remaining channels are filled
//! with blue = 0 and alpha = 255.

use crate::channel::{decode_channel_block, CHANNEL_BLOCK_SIZE};
use crate::{BC4_BLOCK_SIZE, BC5_BLOCK_SIZE};
use texel_pipeline_common::{
    color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, CodecError, CodecResult,
};

/// Decodes a BC4 block into the red channel of a [`Decoded4x4Block`].
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
#[inline(always)]
pub unsafe fn decode_bc4_block(src: *const u8) -> Decoded4x4Block {
    let red = decode_channel_block(src);

    let mut result = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
    for (pixel, r) in result.pixels.iter_mut().zip(red) {
        pixel.r = r;
    }
    result
}

/// Safely wraps the unsafe [`decode_bc4_block`] function for use with slices
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if the slice is shorter than one block.
#[inline(always)]
pub fn decode_bc4_block_from_slice(src: &[u8]) -> CodecResult<Decoded4x4Block> {
    CodecError::check_block_len(src.len(), BC4_BLOCK_SIZE)?;
    unsafe { Ok(decode_bc4_block(src.as_ptr())) }
}

/// Decodes a BC5 block: the first 8 bytes are red, the second 8 bytes green.
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 16 bytes of valid memory.
#[inline(always)]
pub unsafe fn decode_bc5_block(src: *const u8) -> Decoded4x4Block {
    let red = decode_channel_block(src);
    let green = decode_channel_block(src.add(CHANNEL_BLOCK_SIZE));

    let mut result = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        pixel.r = red[i];
        pixel.g = green[i];
    }
    result
}

/// Safely wraps the unsafe [`decode_bc5_block`] function for use with slices
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if the slice is shorter than one block.
#[inline(always)]
pub fn decode_bc5_block_from_slice(src: &[u8]) -> CodecResult<Decoded4x4Block> {
    CodecError::check_block_len(src.len(), BC5_BLOCK_SIZE)?;
    unsafe { Ok(decode_bc5_block(src.as_ptr())) }
}
