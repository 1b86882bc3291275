//! Single-block compress/decompress, dispatched on the format.

use crate::settings::BlockCodecSettings;
use texel_pipeline_bc1::{decode_bc1_block_from_slice, encode_bc1_block_into_slice};
use texel_pipeline_bc2::{decode_bc2_block_from_slice, encode_bc2_block_into_slice};
use texel_pipeline_bc3::{decode_bc3_block_from_slice, encode_bc3_block_into_slice};
use texel_pipeline_bc4::{
    decode_bc4_block_from_slice, decode_bc5_block_from_slice, encode_bc4_block_into_slice,
    encode_bc5_block_into_slice,
};
use texel_pipeline_common::{
    decoded_4x4_block::Decoded4x4Block, sample::Sample, CodecError, CodecResult, PixelFormat,
};

/// Bytes per block of a compressed format.
///
/// # Errors
///
/// - [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`]
/// - [`CodecError::InvalidArgument`] for uncompressed formats
pub fn block_size(format: PixelFormat) -> CodecResult<usize> {
    let info = format.info()?;
    if !info.is_compressed() {
        return Err(CodecError::InvalidArgument(
            "format is not block compressed",
        ));
    }
    Ok(info.footprint.bytes as usize)
}

/// Decodes one block of `format` into samples of kind `S`.
///
/// Blocks always decode to 8 bits per channel first; float output is the exact
/// expansion of those values.
///
/// # Parameters
///
/// - `format`: One of the BC formats
/// - `src`: At least one block of bytes
/// - `settings`: Codec settings (only `bc1_decode` is read)
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] for an uncompressed format or a short `src`,
/// [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`].
pub fn decompress_block<S: Sample>(
    format: PixelFormat,
    src: &[u8],
    settings: &BlockCodecSettings,
) -> CodecResult<Decoded4x4Block<S>> {
    CodecError::check_block_len(src.len(), block_size(format)?)?;

    let decoded = match format {
        PixelFormat::Bc1Unorm => decode_bc1_block_from_slice(src, settings.bc1_decode)?,
        PixelFormat::Bc2Unorm => decode_bc2_block_from_slice(src)?,
        PixelFormat::Bc3Unorm => decode_bc3_block_from_slice(src)?,
        PixelFormat::Bc4Unorm => decode_bc4_block_from_slice(src)?,
        PixelFormat::Bc5Unorm => decode_bc5_block_from_slice(src)?,
        other => return Err(CodecError::InvalidFormat(other)),
    };

    Ok(Decoded4x4Block {
        pixels: decoded.pixels.map(S::from_unorm8),
    })
}

/// Encodes one block of samples as `format`.
///
/// # Returns
///
/// The encoder's error metric (see the individual codecs).
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] for an uncompressed format or a short `dst`,
/// [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`]. Nothing is
/// written on error.
pub fn compress_block<S: Sample>(
    format: PixelFormat,
    block: &Decoded4x4Block<S>,
    dst: &mut [u8],
    settings: &BlockCodecSettings,
) -> CodecResult<u32> {
    // Validate before converting the block.
    CodecError::check_block_len(dst.len(), block_size(format)?)?;

    let block = block.to_unorm8();
    let refine = settings.bc1_encode.refine;
    match format {
        PixelFormat::Bc1Unorm => encode_bc1_block_into_slice(&block, dst, settings.bc1_encode),
        PixelFormat::Bc2Unorm => encode_bc2_block_into_slice(&block, dst, refine),
        PixelFormat::Bc3Unorm => encode_bc3_block_into_slice(&block, dst, refine),
        PixelFormat::Bc4Unorm => encode_bc4_block_into_slice(&block, dst),
        PixelFormat::Bc5Unorm => encode_bc5_block_into_slice(&block, dst),
        other => Err(CodecError::InvalidFormat(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use texel_pipeline_common::{color_8888::Color8888, float4::Float4};

    #[rstest]
    #[case(PixelFormat::Bc1Unorm, 8)]
    #[case(PixelFormat::Bc2Unorm, 16)]
    #[case(PixelFormat::Bc3Unorm, 16)]
    #[case(PixelFormat::Bc4Unorm, 8)]
    #[case(PixelFormat::Bc5Unorm, 16)]
    fn block_sizes(#[case] format: PixelFormat, #[case] expected: usize) {
        assert_eq!(block_size(format), Ok(expected));
    }

    #[test]
    fn uncompressed_formats_are_invalid_arguments() {
        assert!(matches!(
            decompress_block::<Color8888>(PixelFormat::R8G8B8A8Unorm, &[0; 16], &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
        assert_eq!(
            decompress_block::<Color8888>(PixelFormat::Unknown, &[0; 16], &Default::default()),
            Err(CodecError::InvalidFormat(PixelFormat::Unknown))
        );

        let block = Decoded4x4Block::new(Color8888::default());
        let mut dst = [0u8; 16];
        assert!(matches!(
            compress_block(PixelFormat::D32Float, &block, &mut dst, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[rstest]
    #[case(PixelFormat::Bc1Unorm)]
    #[case(PixelFormat::Bc2Unorm)]
    #[case(PixelFormat::Bc3Unorm)]
    #[case(PixelFormat::Bc4Unorm)]
    #[case(PixelFormat::Bc5Unorm)]
    fn short_buffers_are_rejected_without_writing(#[case] format: PixelFormat) {
        let size = block_size(format).unwrap();
        let block = Decoded4x4Block::new(Float4::new(0.5, 0.5, 0.5, 0.5));
        let mut dst = vec![0xEEu8; size - 1];
        assert!(matches!(
            compress_block(format, &block, &mut dst, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(dst.iter().all(|&b| b == 0xEE));

        assert!(matches!(
            decompress_block::<Float4>(format, &dst, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[rstest]
    #[case(PixelFormat::Bc1Unorm, Color8888::new(255, 0, 255, 255))]
    #[case(PixelFormat::Bc2Unorm, Color8888::new(255, 0, 255, 0x88))]
    #[case(PixelFormat::Bc3Unorm, Color8888::new(255, 0, 255, 13))]
    #[case(PixelFormat::Bc4Unorm, Color8888::new(77, 0, 0, 255))]
    #[case(PixelFormat::Bc5Unorm, Color8888::new(77, 201, 0, 255))]
    fn solid_blocks_round_trip_exactly(#[case] format: PixelFormat, #[case] color: Color8888) {
        let settings = BlockCodecSettings::default();
        let block = Decoded4x4Block::new(color);
        let mut dst = [0u8; 16];
        let error = compress_block(format, &block, &mut dst, &settings).unwrap();
        assert_eq!(error, 0);

        let decoded: Decoded4x4Block<Color8888> = decompress_block(format, &dst, &settings).unwrap();
        assert_eq!(decoded, block);

        let floats: Decoded4x4Block<Float4> = decompress_block(format, &dst, &settings).unwrap();
        assert_eq!(floats.pixels[0], color.to_float4());
    }
}
