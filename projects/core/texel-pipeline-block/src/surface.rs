//! Whole-surface compress/decompress over a grid of 4x4 blocks.

use crate::dispatch::{block_size, compress_block, decompress_block};
use crate::settings::BlockCodecSettings;
use texel_pipeline_common::{
    decoded_4x4_block::{Decoded4x4Block, BLOCK_DIM},
    sample::Sample,
    CodecError, CodecResult, PixelFormat,
};

/// Extent and row pitch of a compressed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSurface {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Bytes between the starts of consecutive block rows.
    pub row_pitch: usize,
}

impl BlockSurface {
    /// A tightly packed surface of `format`.
    ///
    /// # Errors
    ///
    /// Same as [`block_size`].
    pub fn tight(format: PixelFormat, width: u32, height: u32) -> CodecResult<Self> {
        let block_bytes = block_size(format)?;
        Ok(Self {
            width,
            height,
            row_pitch: blocks(width) * block_bytes,
        })
    }

    /// Blocks per row.
    #[inline]
    pub fn blocks_wide(&self) -> usize {
        blocks(self.width)
    }

    /// Rows of blocks.
    #[inline]
    pub fn blocks_high(&self) -> usize {
        blocks(self.height)
    }

    /// Bytes the surface spans; the final row does not need its padding.
    fn validate(&self, block_bytes: usize) -> CodecResult<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::InvalidArgument("surface has a zero extent"));
        }

        let packed_row = self.blocks_wide() * block_bytes;
        if self.row_pitch < packed_row {
            return Err(CodecError::InvalidArgument(
                "row pitch is smaller than one row of blocks",
            ));
        }

        Ok(self.row_pitch * (self.blocks_high() - 1) + packed_row)
    }

    #[inline]
    fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[inline]
fn blocks(texels: u32) -> usize {
    (texels as usize).div_ceil(BLOCK_DIM)
}

fn check_len(required: usize, actual: usize) -> CodecResult<()> {
    if actual < required {
        return Err(CodecError::SizeMismatch { required, actual });
    }
    Ok(())
}

/// Decompresses every block of a surface into row-major samples.
///
/// Blocks overhanging the right or bottom edge are clipped, so surfaces
/// smaller than a block (e.g. the tail of a mip chain) decode fine.
///
/// # Parameters
///
/// - `format`: One of the BC formats
/// - `src`: The compressed blocks, `surface.row_pitch` bytes per block row
/// - `surface`: Extent of the surface in texels
/// - `dst`: At least `width * height` samples, written row-major with no padding
/// - `settings`: Codec settings
///
/// # Errors
///
/// - [`CodecError::InvalidArgument`] for an uncompressed format, a zero extent,
///   or a pitch smaller than a row of blocks
/// - [`CodecError::SizeMismatch`] if `src` or `dst` is too small
pub fn decompress_blocks<S: Sample>(
    format: PixelFormat,
    src: &[u8],
    surface: BlockSurface,
    dst: &mut [S],
    settings: &BlockCodecSettings,
) -> CodecResult<()> {
    let block_bytes = block_size(format)?;
    check_len(surface.validate(block_bytes)?, src.len())?;
    check_len(surface.texel_count(), dst.len())?;

    let width = surface.width as usize;
    let height = surface.height as usize;
    for block_y in 0..surface.blocks_high() {
        let row = &src[block_y * surface.row_pitch..];
        for block_x in 0..surface.blocks_wide() {
            let block: Decoded4x4Block<S> =
                decompress_block(format, &row[block_x * block_bytes..], settings)?;

            let x0 = block_x * BLOCK_DIM;
            let y0 = block_y * BLOCK_DIM;
            let cols = BLOCK_DIM.min(width - x0);
            for y in 0..BLOCK_DIM.min(height - y0) {
                let start = (y0 + y) * width + x0;
                dst[start..start + cols]
                    .copy_from_slice(&block.pixels[y * BLOCK_DIM..y * BLOCK_DIM + cols]);
            }
        }
    }

    Ok(())
}

/// Compresses a row-major surface of samples.
///
/// The surface must be a whole number of blocks in both directions.
///
/// # Returns
///
/// The sum of the per-block error metrics.
///
/// # Errors
///
/// - [`CodecError::InvalidArgument`] for an uncompressed format, a zero extent,
///   dimensions that are not multiples of 4, or a pitch smaller than a row of blocks
/// - [`CodecError::SizeMismatch`] if `src` or `dst` is too small
///
/// Nothing is written on error.
pub fn compress_blocks<S: Sample>(
    format: PixelFormat,
    src: &[S],
    surface: BlockSurface,
    dst: &mut [u8],
    settings: &BlockCodecSettings,
) -> CodecResult<u64> {
    let block_bytes = block_size(format)?;
    if surface.width as usize % BLOCK_DIM != 0 || surface.height as usize % BLOCK_DIM != 0 {
        return Err(CodecError::InvalidArgument(
            "compressed surfaces must be a multiple of 4 texels in each dimension",
        ));
    }
    check_len(surface.validate(block_bytes)?, dst.len())?;
    check_len(surface.texel_count(), src.len())?;

    let width = surface.width as usize;
    let mut total = 0u64;
    for block_y in 0..surface.blocks_high() {
        for block_x in 0..surface.blocks_wide() {
            let mut block = Decoded4x4Block::new(S::default());
            for y in 0..BLOCK_DIM {
                let start = (block_y * BLOCK_DIM + y) * width + block_x * BLOCK_DIM;
                block.pixels[y * BLOCK_DIM..(y + 1) * BLOCK_DIM]
                    .copy_from_slice(&src[start..start + BLOCK_DIM]);
            }

            let offset = block_y * surface.row_pitch + block_x * block_bytes;
            total += compress_block(format, &block, &mut dst[offset..], settings)? as u64;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use texel_pipeline_common::{color_8888::Color8888, float4::Float4};

    fn quadrants(width: usize, height: usize) -> Vec<Color8888> {
        (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                match (x / 4 % 2, y / 4 % 2) {
                    (0, 0) => Color8888::new(255, 0, 0, 255),
                    (1, 0) => Color8888::new(0, 255, 0, 255),
                    (0, 1) => Color8888::new(0, 0, 255, 255),
                    _ => Color8888::new(255, 255, 255, 255),
                }
            })
            .collect()
    }

    #[rstest]
    #[case(PixelFormat::Bc1Unorm)]
    #[case(PixelFormat::Bc2Unorm)]
    #[case(PixelFormat::Bc3Unorm)]
    fn block_aligned_colors_survive_a_surface_round_trip(#[case] format: PixelFormat) {
        let settings = BlockCodecSettings::default();
        let texels = quadrants(8, 8);
        let surface = BlockSurface::tight(format, 8, 8).unwrap();
        let mut bytes = vec![0u8; surface.row_pitch * 2];

        let error = compress_blocks(format, &texels, surface, &mut bytes, &settings).unwrap();
        assert_eq!(error, 0);

        let mut decoded = vec![Color8888::default(); 64];
        decompress_blocks(format, &bytes, surface, &mut decoded, &settings).unwrap();
        assert_eq!(decoded, texels);
    }

    #[test]
    fn padded_row_pitch_is_honoured() {
        let format = PixelFormat::Bc4Unorm;
        let settings = BlockCodecSettings::default();
        let texels: Vec<Float4> = (0..32)
            .map(|i| Float4::new(if i % 8 < 4 { 0.0 } else { 1.0 }, 0.0, 0.0, 1.0))
            .collect();
        let surface = BlockSurface {
            width: 8,
            height: 4,
            row_pitch: 40,
        };

        let mut bytes = vec![0xAAu8; 40];
        compress_blocks(format, &texels, surface, &mut bytes, &settings).unwrap();
        assert!(bytes[16..].iter().all(|&b| b == 0xAA), "padding was written");

        let mut decoded = vec![Float4::ZERO; 32];
        decompress_blocks(format, &bytes, surface, &mut decoded, &settings).unwrap();
        assert_eq!(decoded, texels);
    }

    #[test]
    fn decoding_clips_partial_blocks() {
        let format = PixelFormat::Bc1Unorm;
        let settings = BlockCodecSettings::default();
        let texels = quadrants(8, 8);
        let full = BlockSurface::tight(format, 8, 8).unwrap();
        let mut bytes = vec![0u8; full.row_pitch * 2];
        compress_blocks(format, &texels, full, &mut bytes, &settings).unwrap();

        // 6x5 view over the same blocks.
        let clipped = BlockSurface {
            width: 6,
            height: 5,
            row_pitch: full.row_pitch,
        };
        let mut decoded = vec![Color8888::default(); 30];
        decompress_blocks(format, &bytes, clipped, &mut decoded, &settings).unwrap();
        for y in 0..5 {
            assert_eq!(decoded[y * 6..y * 6 + 6], texels[y * 8..y * 8 + 6], "row {y}");
        }
    }

    #[test]
    fn unaligned_compression_is_rejected() {
        let surface = BlockSurface::tight(PixelFormat::Bc1Unorm, 6, 4).unwrap();
        let texels = vec![Color8888::default(); 24];
        let mut bytes = vec![0u8; 64];
        assert!(matches!(
            compress_blocks(PixelFormat::Bc1Unorm, &texels, surface, &mut bytes, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_buffers_report_sizes() {
        let format = PixelFormat::Bc3Unorm;
        let surface = BlockSurface::tight(format, 8, 8).unwrap();
        let texels = vec![Color8888::default(); 64];
        let mut bytes = vec![0u8; 63];
        assert_eq!(
            compress_blocks(format, &texels, surface, &mut bytes, &Default::default()),
            Err(CodecError::SizeMismatch {
                required: 64,
                actual: 63
            })
        );

        let bytes = vec![0u8; 64];
        let mut decoded = vec![Color8888::default(); 63];
        assert_eq!(
            decompress_blocks(format, &bytes, surface, &mut decoded, &Default::default()),
            Err(CodecError::SizeMismatch {
                required: 64,
                actual: 63
            })
        );
    }

    #[test]
    fn narrow_pitch_and_zero_extent_are_invalid() {
        let format = PixelFormat::Bc1Unorm;
        let bytes = vec![0u8; 64];
        let mut decoded = vec![Color8888::default(); 64];
        let narrow = BlockSurface {
            width: 8,
            height: 8,
            row_pitch: 8,
        };
        assert!(matches!(
            decompress_blocks(format, &bytes, narrow, &mut decoded, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));

        let empty = BlockSurface::tight(format, 0, 4).unwrap();
        assert!(matches!(
            decompress_blocks(format, &bytes, empty, &mut decoded, &Default::default()),
            Err(CodecError::InvalidArgument(_))
        ));
    }
}
