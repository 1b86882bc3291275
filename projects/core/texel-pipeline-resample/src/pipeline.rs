//! The reformat pipeline: resample a source buffer into a destination buffer
//! of any format and size.

use crate::address::AddressModes;
use crate::buffer::BufferDesc;
use crate::reader::TexelReader;
use crate::transform::Transform;
use crate::weights::{get_weights, Weights};
use log::{debug, trace, warn};
use texel_pipeline_block::{compress_block, BlockCodecSettings};
use texel_pipeline_common::{
    decoded_4x4_block::{Decoded4x4Block, BLOCK_DIM},
    float4::Float4,
    CodecError, CodecResult, FormatInfo, NumericKind, PixelFormat,
};
use texel_pipeline_scalar::from_float4;

/// Settings for [`reformat_buffer`] and [`sample_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReformatSettings {
    /// Maps normalized destination coordinates to normalized source
    /// coordinates. `None` scales the source to the destination extent.
    pub transform: Option<Transform>,
    /// How source reads outside the image are resolved.
    pub address_modes: AddressModes,
    /// Settings for decoding compressed sources and encoding compressed destinations.
    pub codec: BlockCodecSettings,
}

/// Checks that texels of `from` can be converted to `to`.
///
/// Depth, stencil and integer data have no meaning inside a block compressed
/// format, so those pairs are rejected in both directions.
///
/// # Errors
///
/// - [`CodecError::InvalidFormat`] if either format is [`PixelFormat::Unknown`]
/// - [`CodecError::UnsupportedConversion`] for pairs with no codec path
pub fn check_conversion(from: PixelFormat, to: PixelFormat) -> CodecResult<()> {
    let source = from.info()?;
    let target = to.info()?;

    let exact_only = |kind| {
        matches!(
            kind,
            NumericKind::Depth | NumericKind::Stencil | NumericKind::Uint
        )
    };
    let unsupported = (target.is_compressed() && exact_only(source.kind))
        || (source.is_compressed() && exact_only(target.kind));
    if unsupported {
        warn!("Rejected conversion {} -> {}", from.name(), to.name());
        return Err(CodecError::UnsupportedConversion { from, to });
    }
    Ok(())
}

/// Converts and resizes `src` into `dst`.
///
/// Every destination texel is computed independently: its footprint on the
/// source is found per axis (see [`get_weights`]), the covered source texels
/// are decoded to float and blended, and the result is encoded to the
/// destination format. Compressed destinations are filled a block at a time.
///
/// A source and destination with identical layouts and no transform are
/// copied row by row without decoding.
///
/// # Parameters
///
/// - `src_desc`, `src`: The source layout and bytes
/// - `dst_desc`, `dst`: The destination layout and bytes
/// - `settings`: Transform, address modes and block codec settings
///
/// # Errors
///
/// - [`CodecError::InvalidFormat`] for an unknown format
/// - [`CodecError::InvalidArgument`] for zero extents, undersized pitches, or a
///   compressed destination whose width or height is not a multiple of 4
/// - [`CodecError::SizeMismatch`] if either buffer is too small
/// - [`CodecError::UnsupportedConversion`] (see [`check_conversion`])
///
/// `dst` is not written on error.
pub fn reformat_buffer(
    src_desc: &BufferDesc,
    src: &[u8],
    dst_desc: &BufferDesc,
    dst: &mut [u8],
    settings: &ReformatSettings,
) -> CodecResult<()> {
    let src_info = src_desc.check_buffer(src.len())?;
    let dst_info = dst_desc.check_buffer(dst.len())?;
    check_conversion(src_desc.format, dst_desc.format)?;
    if dst_info.is_compressed()
        && (dst_desc.width as usize % BLOCK_DIM != 0 || dst_desc.height as usize % BLOCK_DIM != 0)
    {
        return Err(CodecError::InvalidArgument(
            "compressed destinations must be a multiple of 4 texels in each dimension",
        ));
    }

    debug!(
        "Reformat {}x{}x{} {} -> {}x{}x{} {} ({}, {}, {}){}",
        src_desc.width,
        src_desc.height,
        src_desc.depth,
        src_desc.format.name(),
        dst_desc.width,
        dst_desc.height,
        dst_desc.depth,
        dst_desc.format.name(),
        direction(src_desc.width, dst_desc.width),
        direction(src_desc.height, dst_desc.height),
        direction(src_desc.depth, dst_desc.depth),
        if settings.transform.is_some() {
            " with transform"
        } else {
            ""
        },
    );

    if settings.transform.is_none() && same_layout(src_desc, dst_desc) {
        return copy_rows(src_desc, &src_info, src, dst_desc, dst);
    }

    let filter = Filter::new(src_desc, dst_desc, settings.transform);
    let unit_bytes = dst_info.footprint.bytes as usize;
    let new_reader = || {
        TexelReader::new_unchecked(
            src_desc,
            src_info,
            src,
            settings.address_modes,
            settings.codec,
        )
    };

    if dst_info.is_compressed() {
        for_each_row(dst, dst_desc, &dst_info, |z, block_y, row| {
            trace!("Encoding block row {block_y} of slice {z}");
            let mut reader = new_reader();
            let mut block = Decoded4x4Block::new(Float4::ZERO);
            for block_x in 0..dst_info.units_wide(dst_desc.width) as usize {
                for y in 0..BLOCK_DIM {
                    for x in 0..BLOCK_DIM {
                        block.pixels[y * BLOCK_DIM + x] = filter.sample(
                            &mut reader,
                            block_x * BLOCK_DIM + x,
                            block_y * BLOCK_DIM + y,
                            z,
                        )?;
                    }
                }
                compress_block(
                    dst_desc.format,
                    &block,
                    &mut row[block_x * unit_bytes..],
                    &settings.codec,
                )?;
            }
            Ok(())
        })
    } else {
        for_each_row(dst, dst_desc, &dst_info, |z, y, row| {
            let mut reader = new_reader();
            for x in 0..dst_desc.width as usize {
                let value = filter.sample(&mut reader, x, y, z)?;
                from_float4(dst_desc.format, value, &mut row[x * unit_bytes..])?;
            }
            Ok(())
        })
    }
}

/// Samples a buffer at a normalized point with linear filtering.
///
/// `point` is `[u, v, w]` where 0 and 1 are the outer edges of the image on
/// each axis; texel centres sit at `(i + 0.5) / extent`.
///
/// # Errors
///
/// Those of [`BufferDesc::check_buffer`].
///
/// # Example
///
/// ```
/// use texel_pipeline_resample::{sample_buffer, AddressModes, BufferDesc};
/// use texel_pipeline_common::PixelFormat;
///
/// let desc = BufferDesc::tight(PixelFormat::R8Unorm, 2, 1, 1).unwrap();
/// let texel = sample_buffer(&desc, &[0, 255], [0.5, 0.5, 0.5], AddressModes::default(), &Default::default()).unwrap();
/// assert_eq!(texel.r, 0.5);
/// ```
pub fn sample_buffer(
    desc: &BufferDesc,
    data: &[u8],
    point: [f32; 3],
    modes: AddressModes,
    codec: &BlockCodecSettings,
) -> CodecResult<Float4> {
    let info = desc.check_buffer(data.len())?;
    let mut reader = TexelReader::new_unchecked(desc, info, data, modes, *codec);

    let extents = [desc.width, desc.height, desc.depth];
    let [wx, wy, wz] = core::array::from_fn(|axis| {
        let center = point[axis] as f64 * extents[axis] as f64;
        get_weights(center - 0.5, center + 0.5)
    });
    accumulate(&mut reader, &wx, &wy, &wz)
}

/// Maps destination texels to weighted source footprints.
enum Filter {
    /// Per-axis weights for every destination coordinate.
    Separable([Vec<Weights>; 3]),
    /// Footprints centred on each texel's projection through a transform.
    Projected {
        transform: Transform,
        src_extent: [u32; 3],
        dst_extent: [u32; 3],
    },
}

impl Filter {
    fn new(src: &BufferDesc, dst: &BufferDesc, transform: Option<Transform>) -> Self {
        let src_extent = [src.width, src.height, src.depth];
        let dst_extent = [dst.width, dst.height, dst.depth];
        match transform {
            Some(transform) => Self::Projected {
                transform,
                src_extent,
                dst_extent,
            },
            None => Self::Separable(core::array::from_fn(|axis| {
                let scale = src_extent[axis] as f64 / dst_extent[axis] as f64;
                (0..dst_extent[axis])
                    .map(|i| get_weights(i as f64 * scale, (i + 1) as f64 * scale))
                    .collect()
            })),
        }
    }

    fn sample(
        &self,
        reader: &mut TexelReader<'_>,
        x: usize,
        y: usize,
        z: usize,
    ) -> CodecResult<Float4> {
        match self {
            Self::Separable([xs, ys, zs]) => accumulate(reader, &xs[x], &ys[y], &zs[z]),
            Self::Projected {
                transform,
                src_extent,
                dst_extent,
            } => {
                let [wx, wy, wz] = projected(transform, *src_extent, *dst_extent, [x, y, z]);
                accumulate(reader, &wx, &wy, &wz)
            }
        }
    }
}

/// Projects the destination texel centre and keeps the footprint size of
/// a plain resize around it.
fn projected(
    transform: &Transform,
    src_extent: [u32; 3],
    dst_extent: [u32; 3],
    texel: [usize; 3],
) -> [Weights; 3] {
    let normalized: [f64; 3] =
        core::array::from_fn(|axis| (texel[axis] as f64 + 0.5) / dst_extent[axis] as f64);
    let source = transform.project(normalized);

    core::array::from_fn(|axis| {
        let src_extent = src_extent[axis] as f64;
        let half = 0.5 * src_extent / dst_extent[axis] as f64;
        let center = source[axis] * src_extent;
        get_weights(center - half, center + half)
    })
}

fn accumulate(
    reader: &mut TexelReader<'_>,
    wx: &Weights,
    wy: &Weights,
    wz: &Weights,
) -> CodecResult<Float4> {
    let mut sum = Float4::ZERO;
    for (z, weight_z) in wz.iter() {
        for (y, weight_y) in wy.iter() {
            let weight_zy = weight_z * weight_y;
            for (x, weight_x) in wx.iter() {
                sum = sum + reader.read(x, y, z)? * (weight_zy * weight_x);
            }
        }
    }
    Ok(sum)
}

fn direction(src: u32, dst: u32) -> &'static str {
    match dst.cmp(&src) {
        core::cmp::Ordering::Less => "downsample",
        core::cmp::Ordering::Equal => "1:1",
        core::cmp::Ordering::Greater => "upsample",
    }
}

fn same_layout(src: &BufferDesc, dst: &BufferDesc) -> bool {
    src.format == dst.format
        && src.width == dst.width
        && src.height == dst.height
        && src.depth == dst.depth
}

fn copy_rows(
    src_desc: &BufferDesc,
    info: &FormatInfo,
    src: &[u8],
    dst_desc: &BufferDesc,
    dst: &mut [u8],
) -> CodecResult<()> {
    let packed_row = info.row_pitch(src_desc.width)?;
    for z in 0..src_desc.depth as usize {
        for y in 0..info.units_high(src_desc.height) as usize {
            let from = z * src_desc.slice_pitch + y * src_desc.row_pitch;
            let to = z * dst_desc.slice_pitch + y * dst_desc.row_pitch;
            dst[to..to + packed_row].copy_from_slice(&src[from..from + packed_row]);
        }
    }
    Ok(())
}

/// Runs `encode_row(z, unit_row, bytes)` over every row of footprint units in
/// `dst`; rows are disjoint, so workers never share output.
fn for_each_row<F>(
    dst: &mut [u8],
    desc: &BufferDesc,
    info: &FormatInfo,
    encode_row: F,
) -> CodecResult<()>
where
    F: Fn(usize, usize, &mut [u8]) -> CodecResult<()> + Send + Sync,
{
    let rows = info.units_high(desc.height) as usize;
    let dst = &mut dst[..desc.required_len(info)];

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        dst.par_chunks_mut(desc.slice_pitch)
            .enumerate()
            .try_for_each(|(z, slice)| {
                slice
                    .par_chunks_mut(desc.row_pitch)
                    .take(rows)
                    .enumerate()
                    .try_for_each(|(y, row)| encode_row(z, y, row))
            })
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (z, slice) in dst.chunks_mut(desc.slice_pitch).enumerate() {
            for (y, row) in slice.chunks_mut(desc.row_pitch).take(rows).enumerate() {
                encode_row(z, y, row)?;
            }
        }
        Ok(())
    }
}
