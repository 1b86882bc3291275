//! BC4 and BC5 block encoding, one [`encode_channel_block`] per channel.

use crate::channel::{encode_channel_block, CHANNEL_BLOCK_SIZE};
use crate::{BC4_BLOCK_SIZE, BC5_BLOCK_SIZE};
use texel_pipeline_common::{
    decoded_4x4_block::Decoded4x4Block, encoded_block::EncodedBlock, CodecError, CodecResult,
};

/// Encodes the red channel of a block as BC4.
///
/// # Returns
///
/// The block and its sum of absolute errors.
pub fn encode_bc4_block(block: &Decoded4x4Block) -> EncodedBlock<BC4_BLOCK_SIZE> {
    encode_channel_block(&block.pixels.map(|pixel| pixel.r))
}

/// Encodes the red and green channels of a block as BC5.
///
/// # Returns
///
/// The block and the summed absolute error of both channels.
pub fn encode_bc5_block(block: &Decoded4x4Block) -> EncodedBlock<BC5_BLOCK_SIZE> {
    let red = encode_channel_block(&block.pixels.map(|pixel| pixel.r));
    let green = encode_channel_block(&block.pixels.map(|pixel| pixel.g));

    let mut bytes = [0u8; BC5_BLOCK_SIZE];
    bytes[..CHANNEL_BLOCK_SIZE].copy_from_slice(&red.bytes);
    bytes[CHANNEL_BLOCK_SIZE..].copy_from_slice(&green.bytes);
    EncodedBlock {
        bytes,
        error: red.error + green.error,
    }
}

/// Encodes a block as BC4 into `dst`, returning the error metric.
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if `dst` is shorter than one block; nothing is written.
pub fn encode_bc4_block_into_slice(block: &Decoded4x4Block, dst: &mut [u8]) -> CodecResult<u32> {
    CodecError::check_block_len(dst.len(), BC4_BLOCK_SIZE)?;
    let encoded = encode_bc4_block(block);
    encoded.write_to(dst);
    Ok(encoded.error)
}

/// Encodes a block as BC5 into `dst`, returning the error metric.
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if `dst` is shorter than one block; nothing is written.
pub fn encode_bc5_block_into_slice(block: &Decoded4x4Block, dst: &mut [u8]) -> CodecResult<u32> {
    CodecError::check_block_len(dst.len(), BC5_BLOCK_SIZE)?;
    let encoded = encode_bc5_block(block);
    encoded.write_to(dst);
    Ok(encoded.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_bc4_block_from_slice, decode_bc5_block_from_slice};
    use texel_pipeline_common::color_8888::Color8888;

    fn normal_map_block() -> Decoded4x4Block {
        let mut block = Decoded4x4Block::new(Color8888::default());
        for (i, pixel) in block.pixels.iter_mut().enumerate() {
            *pixel = Color8888::new(120 + i as u8 * 4, 200 - i as u8 * 9, 77, 13);
        }
        block
    }

    #[test]
    fn bc5_round_trip_keeps_both_channels_close() {
        let block = normal_map_block();
        let encoded = encode_bc5_block(&block);
        let decoded = decode_bc5_block_from_slice(&encoded.bytes).unwrap();

        let mut error = 0;
        for (src, out) in block.pixels.iter().zip(decoded.pixels.iter()) {
            // Red spans 60 over 7 steps, green 135 over 7 steps.
            assert!(src.r.abs_diff(out.r) <= 5);
            assert!(src.g.abs_diff(out.g) <= 10);
            assert_eq!((out.b, out.a), (0, 255));
            error += src.r.abs_diff(out.r) as u32 + src.g.abs_diff(out.g) as u32;
        }
        assert_eq!(encoded.error, error);
    }

    #[test]
    fn bc4_ignores_other_channels() {
        let block = normal_map_block();
        let encoded = encode_bc4_block(&block);
        let decoded = decode_bc4_block_from_slice(&encoded.bytes).unwrap();
        assert!(decoded.pixels.iter().all(|p| p.g == 0 && p.b == 0 && p.a == 255));
    }

    #[test]
    fn into_slice_validates_length() {
        let block = normal_map_block();
        let mut short = [0u8; 15];
        assert!(encode_bc5_block_into_slice(&block, &mut short).is_err());
        assert_eq!(short, [0; 15]);

        let mut dst = [0u8; 8];
        assert_eq!(
            encode_bc4_block_into_slice(&block, &mut dst).unwrap(),
            encode_bc4_block(&block).error
        );
        assert_eq!(dst, encode_bc4_block(&block).bytes);
    }
}
