//! Per-texel encode/decode for every uncompressed [`PixelFormat`].
//!
//! Texels are read as a little-endian integer of up to 128 bits and each
//! channel is extracted from the bit range the format registry assigns it.
//! How a channel's bits become a number depends on the format's
//! [`NumericKind`]:
//!
//! | Kind | Decode | Encode |
//! |---|---|---|
//! | Unorm | `v / (2^bits - 1)` | clamp to `[0, 1]`, round to nearest |
//! | Uint | raw value | round, clamp to `[0, 2^bits - 1]` |
//! | Float | binary32, binary16 or unsigned small float | same, see [`crate::small_float`] |
//! | SharedExponent | see [`crate::shared_exponent`] | |
//! | Depth/Stencil | depth in `r`, stencil (raw) in `g`, everything else 0 | |
//!
//! Missing colour channels decode as `r = g = b = 0`, `a = 1`.

use crate::half_float::{pack_half, unpack_half};
use crate::shared_exponent::{pack_rgb9e5, unpack_rgb9e5};
use crate::small_float::{pack_small_float, unpack_small_float};
use texel_pipeline_common::color_8888::{f32_to_unorm8, unorm8_to_f32, Color8888};
use texel_pipeline_common::float4::Float4;
use texel_pipeline_common::sample::{Sample, SampleKind};
use texel_pipeline_common::{
    Channel, ChannelBits, CodecError, CodecResult, FormatInfo, NumericKind, PixelFormat,
};

const MAX_TEXEL_BYTES: usize = 16;

/// Looks up an uncompressed format and checks `len` covers one texel.
fn texel_info(format: PixelFormat, len: usize) -> CodecResult<FormatInfo> {
    let info = format.info()?;
    if info.is_compressed() {
        return Err(CodecError::InvalidArgument(
            "block compressed formats must be decoded a block at a time",
        ));
    }

    let required = info.footprint.bytes as usize;
    if len < required {
        return Err(CodecError::SizeMismatch {
            required,
            actual: len,
        });
    }
    Ok(info)
}

#[inline]
fn load(info: &FormatInfo, src: &[u8]) -> u128 {
    let size = info.footprint.bytes as usize;
    let mut bytes = [0u8; MAX_TEXEL_BYTES];
    bytes[..size].copy_from_slice(&src[..size]);
    u128::from_le_bytes(bytes)
}

#[inline]
fn store(info: &FormatInfo, raw: u128, dst: &mut [u8]) {
    let size = info.footprint.bytes as usize;
    dst[..size].copy_from_slice(&raw.to_le_bytes()[..size]);
}

#[inline]
fn field_mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[inline]
fn extract(raw: u128, channel: &ChannelBits) -> u64 {
    (raw >> channel.offset) as u64 & field_mask(channel.bits)
}

#[inline]
fn insert(raw: &mut u128, channel: &ChannelBits, value: u64) {
    *raw |= ((value & field_mask(channel.bits)) as u128) << channel.offset;
}

#[inline]
fn unorm_to_f32(value: u64, bits: u8) -> f32 {
    // Every unorm channel is at most 24 bits wide, so both operands are exact.
    value as f32 / field_mask(bits) as f32
}

#[inline]
fn f32_to_unorm(value: f32, bits: u8) -> u64 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) as f64 * field_mask(bits) as f64).round() as u64
}

#[inline]
fn f32_to_uint(value: f32, bits: u8) -> u64 {
    if value.is_nan() {
        return 0;
    }
    (value as f64).round().clamp(0.0, field_mask(bits) as f64) as u64
}

fn float_from_bits(value: u64, bits: u8) -> f32 {
    match bits {
        32 => f32::from_bits(value as u32),
        16 => unpack_half(value as u16),
        // R11G11B10: 5 exponent bits, the rest is mantissa.
        _ => unpack_small_float(value as u32, bits as u32 - 5),
    }
}

fn float_to_bits(value: f32, bits: u8) -> u64 {
    match bits {
        32 => value.to_bits() as u64,
        16 => pack_half(value) as u64,
        _ => pack_small_float(value, bits as u32 - 5) as u64,
    }
}

/// The default a decoded texel starts from before its channels are filled in.
#[inline]
fn default_float4(kind: NumericKind) -> Float4 {
    match kind {
        NumericKind::Depth | NumericKind::Stencil => Float4::ZERO,
        _ => Float4::new(0.0, 0.0, 0.0, 1.0),
    }
}

#[inline]
fn slot(channel: Channel) -> usize {
    match channel {
        Channel::Red | Channel::Depth => 0,
        Channel::Green | Channel::Stencil => 1,
        Channel::Blue => 2,
        Channel::Alpha => 3,
    }
}

/// Decodes one texel to four floats.
///
/// # Parameters
///
/// - `format`: Format of the texel
/// - `src`: At least one texel's worth of bytes
///
/// # Errors
///
/// - [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`]
/// - [`CodecError::InvalidArgument`] for block compressed formats
/// - [`CodecError::SizeMismatch`] if `src` is shorter than one texel
pub fn to_float4(format: PixelFormat, src: &[u8]) -> CodecResult<Float4> {
    let info = texel_info(format, src.len())?;
    let raw = load(&info, src);

    if info.kind == NumericKind::SharedExponent {
        let [r, g, b] = unpack_rgb9e5(raw as u32);
        return Ok(Float4::new(r, g, b, 1.0));
    }

    let mut out = default_float4(info.kind).to_array();
    for channel in info.channels {
        let value = extract(raw, channel);
        out[slot(channel.channel)] = match (info.kind, channel.channel) {
            (_, Channel::Stencil) | (NumericKind::Uint, _) => value as f32,
            (NumericKind::Float, _) => float_from_bits(value, channel.bits),
            (NumericKind::Depth, Channel::Depth) if channel.bits == 32 => {
                f32::from_bits(value as u32)
            }
            _ => unorm_to_f32(value, channel.bits),
        };
    }
    Ok(Float4::from_array(out))
}

/// Encodes four floats as one texel, overwriting every byte of the texel
/// (padding bits are written as zero).
///
/// # Errors
///
/// Same conditions as [`to_float4`]; `dst` is untouched on error.
pub fn from_float4(format: PixelFormat, value: Float4, dst: &mut [u8]) -> CodecResult<()> {
    let info = texel_info(format, dst.len())?;

    let raw = if info.kind == NumericKind::SharedExponent {
        pack_rgb9e5([value.r, value.g, value.b]) as u128
    } else {
        let components = value.to_array();
        let mut raw = 0u128;
        for channel in info.channels {
            let v = components[slot(channel.channel)];
            let bits = match (info.kind, channel.channel) {
                (_, Channel::Stencil) | (NumericKind::Uint, _) => f32_to_uint(v, channel.bits),
                (NumericKind::Float, _) => float_to_bits(v, channel.bits),
                (NumericKind::Depth, Channel::Depth) if channel.bits == 32 => v.to_bits() as u64,
                _ => f32_to_unorm(v, channel.bits),
            };
            insert(&mut raw, channel, bits);
        }
        raw
    };

    store(&info, raw, dst);
    Ok(())
}

/// Decodes one texel to four unorm8 values.
///
/// 8-bit normalized channels are copied exactly; unsigned integer and stencil
/// channels saturate at 255; depth is quantized from its unorm or float value;
/// everything else goes through [`to_float4`].
///
/// # Errors
///
/// Same conditions as [`to_float4`].
pub fn to_unorm8(format: PixelFormat, src: &[u8]) -> CodecResult<Color8888> {
    let info = texel_info(format, src.len())?;
    if !has_exact_unorm8_path(&info) {
        return to_float4(format, src).map(Color8888::from_float4);
    }

    let raw = load(&info, src);
    let mut out = match info.kind {
        NumericKind::Depth | NumericKind::Stencil => [0; 4],
        _ => [0, 0, 0, 255],
    };
    for channel in info.channels {
        let value = extract(raw, channel);
        out[slot(channel.channel)] = match (info.kind, channel.channel) {
            (_, Channel::Stencil) | (NumericKind::Uint, _) => value.min(255) as u8,
            (NumericKind::Depth, Channel::Depth) if channel.bits == 32 => {
                f32_to_unorm8(f32::from_bits(value as u32))
            }
            _ if channel.bits == 8 => value as u8,
            _ => f32_to_unorm8(unorm_to_f32(value, channel.bits)),
        };
    }
    Ok(Color8888::from_array(out))
}

/// Encodes four unorm8 values as one texel. The exact counterpart of
/// [`to_unorm8`]: for 8-bit normalized formats `from_unorm8(to_unorm8(t)) == t`.
///
/// # Errors
///
/// Same conditions as [`to_float4`]; `dst` is untouched on error.
pub fn from_unorm8(format: PixelFormat, value: Color8888, dst: &mut [u8]) -> CodecResult<()> {
    let info = texel_info(format, dst.len())?;
    if !has_exact_unorm8_path(&info) {
        return from_float4(format, value.to_float4(), dst);
    }

    let components = value.to_array();
    let mut raw = 0u128;
    for channel in info.channels {
        let v = components[slot(channel.channel)];
        let bits = match (info.kind, channel.channel) {
            (_, Channel::Stencil) | (NumericKind::Uint, _) => v as u64,
            (NumericKind::Depth, Channel::Depth) if channel.bits == 32 => {
                unorm8_to_f32(v).to_bits() as u64
            }
            _ if channel.bits == 8 => v as u64,
            _ => f32_to_unorm(unorm8_to_f32(v), channel.bits),
        };
        insert(&mut raw, channel, bits);
    }
    store(&info, raw, dst);
    Ok(())
}

/// Float and shared-exponent formats go through [`Float4`]; the rest are
/// handled a channel at a time so stencil keeps its raw value.
#[inline]
fn has_exact_unorm8_path(info: &FormatInfo) -> bool {
    matches!(
        info.kind,
        NumericKind::Unorm | NumericKind::Uint | NumericKind::Depth | NumericKind::Stencil
    )
}

/// Decodes one texel into the sample kind `S`, taking the exact 8-bit path for
/// [`Color8888`] and the float path for [`Float4`].
#[inline]
pub fn decode_texel<S: Sample>(format: PixelFormat, src: &[u8]) -> CodecResult<S> {
    match S::KIND {
        SampleKind::Unorm8 => to_unorm8(format, src).map(S::from_unorm8),
        SampleKind::Float32 => to_float4(format, src).map(S::from_float4),
    }
}

/// Encodes one sample of kind `S`. See [`decode_texel`].
#[inline]
pub fn encode_texel<S: Sample>(format: PixelFormat, value: S, dst: &mut [u8]) -> CodecResult<()> {
    match S::KIND {
        SampleKind::Unorm8 => from_unorm8(format, value.to_unorm8(), dst),
        SampleKind::Float32 => from_float4(format, value.to_float4(), dst),
    }
}

/// Decodes `dst.len()` consecutive texels from `src`.
///
/// # Errors
///
/// [`CodecError::SizeMismatch`] if `src` holds fewer than `dst.len()` texels,
/// plus the conditions of [`to_float4`].
pub fn decode_texels<S: Sample>(format: PixelFormat, src: &[u8], dst: &mut [S]) -> CodecResult<()> {
    let size = texel_info(format, usize::MAX)?.footprint.bytes as usize;
    let required = size * dst.len();
    if src.len() < required {
        return Err(CodecError::SizeMismatch {
            required,
            actual: src.len(),
        });
    }

    for (texel, out) in src.chunks_exact(size).zip(dst.iter_mut()) {
        *out = decode_texel(format, texel)?;
    }
    Ok(())
}

/// Encodes every sample of `src` into consecutive texels of `dst`.
///
/// # Errors
///
/// [`CodecError::SizeMismatch`] if `dst` cannot hold `src.len()` texels,
/// plus the conditions of [`to_float4`]. Nothing is written on error.
pub fn encode_texels<S: Sample>(format: PixelFormat, src: &[S], dst: &mut [u8]) -> CodecResult<()> {
    let size = texel_info(format, usize::MAX)?.footprint.bytes as usize;
    let required = size * src.len();
    if dst.len() < required {
        return Err(CodecError::SizeMismatch {
            required,
            actual: dst.len(),
        });
    }

    for (value, texel) in src.iter().zip(dst.chunks_exact_mut(size)) {
        encode_texel(format, *value, texel)?;
    }
    Ok(())
}
