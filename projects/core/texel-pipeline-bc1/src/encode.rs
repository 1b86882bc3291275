//! BC1 colour block encoding.
//!
//! 1. Endpoints are fitted to the principal axis of the block's colours
//!    (power iteration on the 3x3 covariance), spanning the extreme projections.
//! 2. Every texel takes the nearest palette entry by squared RGB distance.
//! 3. Optionally, endpoints are re-solved by least squares for the chosen
//!    indices; the result is kept only if the block error drops.
//! 4. Endpoints are ordered so the decoder picks the intended layout:
//!    `color0 > color1` for 4 colours, `color0 <= color1` for 3 colours + alpha.

use crate::decode::{four_color_palette, three_color_palette};
use crate::settings::{Bc1AlphaMode, Bc1EncodeSettings};
use crate::BC1_BLOCK_SIZE;
use likely_stable::unlikely;
use texel_pipeline_common::{
    color_565::Color565,
    color_8888::Color8888,
    decoded_4x4_block::{Decoded4x4Block, BLOCK_TEXELS},
    encoded_block::EncodedBlock,
    CodecError, CodecResult,
};

const ALL_TEXELS: u16 = 0xFFFF;
const POWER_ITERATIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    FourColor,
    ThreeColor,
}

impl Layout {
    #[inline]
    fn palette(self, c0: Color565, c1: Color565) -> [Color8888; 4] {
        match self {
            Layout::FourColor => four_color_palette(c0, c1),
            Layout::ThreeColor => three_color_palette(c0, c1, true),
        }
    }

    /// Palette entries an opaque texel may use.
    #[inline]
    fn opaque_entries(self) -> usize {
        match self {
            Layout::FourColor => 4,
            Layout::ThreeColor => 3,
        }
    }

    /// Weight of `color0` in each palette entry.
    #[inline]
    fn endpoint_weights(self) -> [f32; 4] {
        match self {
            Layout::FourColor => [1.0, 0.0, 2.0 / 3.0, 1.0 / 3.0],
            Layout::ThreeColor => [1.0, 0.0, 0.5, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fit {
    c0: Color565,
    c1: Color565,
    indices: [u8; BLOCK_TEXELS],
    error: u32,
}

#[inline]
fn is_set(mask: u16, texel: usize) -> bool {
    mask & (1 << texel) != 0
}

#[inline]
fn rgb(color: &Color8888) -> [f32; 3] {
    [color.r as f32, color.g as f32, color.b as f32]
}

/// Picks the nearest palette entry for every texel in `mask`; the rest get index 3.
fn assign_indices(
    texels: &[Color8888; BLOCK_TEXELS],
    mask: u16,
    layout: Layout,
    c0: Color565,
    c1: Color565,
) -> Fit {
    let palette = layout.palette(c0, c1);
    let mut indices = [3u8; BLOCK_TEXELS];
    let mut error = 0;

    for (i, texel) in texels.iter().enumerate() {
        if !is_set(mask, i) {
            continue;
        }

        let (best, distance) = palette[..layout.opaque_entries()]
            .iter()
            .enumerate()
            .map(|(entry, color)| (entry, color.rgb_distance_squared(texel)))
            .min_by_key(|&(_, distance)| distance)
            .unwrap_or((0, 0));
        indices[i] = best as u8;
        error += distance;
    }

    Fit {
        c0,
        c1,
        indices,
        error,
    }
}

/// Endpoints at the extremes of the colours' principal axis.
fn principal_axis_endpoints(texels: &[Color8888; BLOCK_TEXELS], mask: u16) -> (Color565, Color565) {
    let points = || {
        texels
            .iter()
            .enumerate()
            .filter(move |(i, _)| is_set(mask, *i))
            .map(|(_, texel)| rgb(texel))
    };

    let count = points().count().max(1) as f32;
    let mut mean = [0f32; 3];
    for p in points() {
        for c in 0..3 {
            mean[c] += p[c] / count;
        }
    }

    let mut covariance = [[0f32; 3]; 3];
    for p in points() {
        let d = [p[0] - mean[0], p[1] - mean[1], p[2] - mean[2]];
        for row in 0..3 {
            for col in 0..3 {
                covariance[row][col] += d[row] * d[col];
            }
        }
    }

    // Start from the covariance row of the channel with the most variance.
    let widest = (0..3)
        .max_by(|&a, &b| covariance[a][a].total_cmp(&covariance[b][b]))
        .unwrap_or(0);
    let mut axis = covariance[widest];
    for _ in 0..POWER_ITERATIONS {
        let next = [0, 1, 2].map(|row| {
            covariance[row][0] * axis[0] + covariance[row][1] * axis[1] + covariance[row][2] * axis[2]
        });
        let scale = next.iter().fold(0f32, |acc, v| acc.max(v.abs()));
        if scale < 1e-6 {
            break;
        }
        axis = next.map(|v| v / scale);
    }

    let length = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    let axis = if length < 1e-6 {
        [0.0; 3]
    } else {
        axis.map(|v| v / length)
    };

    let (mut low, mut high) = (f32::MAX, f32::MIN);
    for p in points() {
        let t = (p[0] - mean[0]) * axis[0] + (p[1] - mean[1]) * axis[1] + (p[2] - mean[2]) * axis[2];
        low = low.min(t);
        high = high.max(t);
    }
    if low > high {
        (low, high) = (0.0, 0.0);
    }

    let endpoint = |t: f32| {
        Color565::from_rgb_f32(
            mean[0] + axis[0] * t,
            mean[1] + axis[1] * t,
            mean[2] + axis[2] * t,
        )
    };
    (endpoint(high), endpoint(low))
}

/// Re-solves both endpoints by least squares for a fixed index assignment.
fn least_squares_endpoints(
    texels: &[Color8888; BLOCK_TEXELS],
    mask: u16,
    indices: &[u8; BLOCK_TEXELS],
    layout: Layout,
) -> Option<(Color565, Color565)> {
    let weights = layout.endpoint_weights();
    let (mut aa, mut ab, mut bb) = (0f32, 0f32, 0f32);
    let (mut ax, mut bx) = ([0f32; 3], [0f32; 3]);

    for (i, texel) in texels.iter().enumerate() {
        if !is_set(mask, i) {
            continue;
        }
        let w0 = weights[indices[i] as usize];
        let w1 = 1.0 - w0;
        let p = rgb(texel);

        aa += w0 * w0;
        ab += w0 * w1;
        bb += w1 * w1;
        for c in 0..3 {
            ax[c] += w0 * p[c];
            bx[c] += w1 * p[c];
        }
    }

    let determinant = aa * bb - ab * ab;
    if determinant.abs() < 1e-6 {
        // Every texel uses the same blend; the system is singular.
        return None;
    }

    let e0 = [0, 1, 2].map(|c| (ax[c] * bb - bx[c] * ab) / determinant);
    let e1 = [0, 1, 2].map(|c| (bx[c] * aa - ax[c] * ab) / determinant);
    Some((
        Color565::from_rgb_f32(e0[0], e0[1], e0[2]),
        Color565::from_rgb_f32(e1[0], e1[1], e1[2]),
    ))
}

fn fit_colors(texels: &[Color8888; BLOCK_TEXELS], mask: u16, layout: Layout, refine: bool) -> Fit {
    let (c0, c1) = principal_axis_endpoints(texels, mask);
    let mut best = assign_indices(texels, mask, layout, c0, c1);

    if refine && best.error > 0 {
        if let Some((r0, r1)) = least_squares_endpoints(texels, mask, &best.indices, layout) {
            let refined = assign_indices(texels, mask, layout, r0, r1);
            if refined.error < best.error {
                best = refined;
            }
        }
    }
    best
}

/// Orders the endpoints for `layout` and packs the block.
fn pack(fit: Fit, layout: Layout) -> EncodedBlock<BC1_BLOCK_SIZE> {
    let Fit {
        mut c0,
        mut c1,
        mut indices,
        error,
    } = fit;

    match layout {
        // Equal endpoints decode as 3 colours; every opaque entry is the same colour anyway.
        Layout::FourColor if c0 == c1 => indices = [0; BLOCK_TEXELS],
        Layout::FourColor if c1.greater_than(&c0) => {
            core::mem::swap(&mut c0, &mut c1);
            indices.iter_mut().for_each(|index| *index ^= 1);
        }
        Layout::ThreeColor if c0.greater_than(&c1) => {
            core::mem::swap(&mut c0, &mut c1);
            indices
                .iter_mut()
                .filter(|index| **index < 2)
                .for_each(|index| *index ^= 1);
        }
        _ => {}
    }

    let packed_indices = indices
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &index)| acc | ((index as u32) << (i * 2)));

    let mut bytes = [0u8; BC1_BLOCK_SIZE];
    bytes[0..2].copy_from_slice(&c0.raw_value().to_le_bytes());
    bytes[2..4].copy_from_slice(&c1.raw_value().to_le_bytes());
    bytes[4..8].copy_from_slice(&packed_indices.to_le_bytes());
    EncodedBlock { bytes, error }
}

/// Encodes the colour of a block in the 4-colour layout, ignoring alpha.
///
/// This is the colour half of BC2 and BC3, which always decode 4 colours.
///
/// # Parameters
///
/// - `block`: The texels to encode
/// - `refine`: Whether to run the least-squares refinement pass
pub fn encode_color_block(block: &Decoded4x4Block, refine: bool) -> EncodedBlock<BC1_BLOCK_SIZE> {
    pack(
        fit_colors(&block.pixels, ALL_TEXELS, Layout::FourColor, refine),
        Layout::FourColor,
    )
}

/// Encodes a block as BC1.
///
/// # Parameters
///
/// - `block`: The texels to encode
/// - `settings`: Encoder settings
///
/// # Returns
///
/// The block and its sum of squared RGB errors over the texels that decode
/// as colours (transparent texels contribute nothing).
///
/// # Example
///
/// ```
/// use texel_pipeline_bc1::{decode_bc1_block_from_slice, encode_bc1_block};
/// use texel_pipeline_bc1::{Bc1DecodeSettings, Bc1EncodeSettings};
/// use texel_pipeline_common::color_8888::Color8888;
/// use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;
///
/// let block = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
/// let encoded = encode_bc1_block(&block, Bc1EncodeSettings::default());
/// assert_eq!(encoded.error, 0);
///
/// let decoded = decode_bc1_block_from_slice(&encoded.bytes, Bc1DecodeSettings::default()).unwrap();
/// assert_eq!(decoded, block);
/// ```
pub fn encode_bc1_block(
    block: &Decoded4x4Block,
    settings: Bc1EncodeSettings,
) -> EncodedBlock<BC1_BLOCK_SIZE> {
    let transparent = match settings.alpha_mode {
        Bc1AlphaMode::Opaque => 0,
        Bc1AlphaMode::PunchThrough => block
            .pixels
            .iter()
            .enumerate()
            .filter(|(_, texel)| texel.a < settings.alpha_threshold)
            .fold(0u16, |mask, (i, _)| mask | (1 << i)),
    };

    if unlikely(transparent == ALL_TEXELS) {
        // Equal endpoints select the 3-colour layout; index 3 everywhere.
        return EncodedBlock {
            bytes: [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF],
            error: 0,
        };
    }

    let layout = if transparent == 0 {
        Layout::FourColor
    } else {
        Layout::ThreeColor
    };
    pack(
        fit_colors(&block.pixels, !transparent, layout, settings.refine),
        layout,
    )
}

/// Encodes a block as BC1 into `dst`.
///
/// # Returns
///
/// The encoder's error metric, see [`encode_bc1_block`].
///
/// # Errors
///
/// [`CodecError::InvalidArgument`] if `dst` is shorter than one block; nothing is written.
pub fn encode_bc1_block_into_slice(
    block: &Decoded4x4Block,
    dst: &mut [u8],
    settings: Bc1EncodeSettings,
) -> CodecResult<u32> {
    CodecError::check_block_len(dst.len(), BC1_BLOCK_SIZE)?;
    let encoded = encode_bc1_block(block, settings);
    encoded.write_to(dst);
    Ok(encoded.error)
}
