//! # Format Registry
//!
//! Static metadata for every [`PixelFormat`]: numeric kind, block footprint,
//! component count and which logical channel occupies which bits.
//!
//! Uncompressed formats have a 1x1 footprint whose byte size is the texel
//! size. Compressed formats have a 4x4 footprint; their channel table lists the
//! nominal precision of each channel and carries no bit offsets, because
//! individual texels are not addressable without decoding the whole block.
//!
//! ```
//! use texel_pipeline_common::format::{Channel, NumericKind, PixelFormat};
//!
//! let info = PixelFormat::B5G6R5Unorm.info().unwrap();
//! assert_eq!(info.kind, NumericKind::Unorm);
//! assert_eq!(info.footprint.bytes, 2);
//! assert_eq!(info.bits(Channel::Green), Some(6));
//! assert_eq!(info.component_count(), 3);
//! ```

use crate::error::{CodecError, CodecResult};
use derive_enum_all_values::AllValues;

/// Identifies the encoding of texels in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum PixelFormat {
    /// Unknown or unsupported format; the registry rejects it.
    Unknown,
    /// 4x 8-bit normalized, R at the lowest address.
    R8G8B8A8Unorm,
    /// 4x 8-bit normalized, B at the lowest address.
    B8G8R8A8Unorm,
    /// Single 8-bit normalized channel.
    R8Unorm,
    /// Two 8-bit normalized channels.
    R8G8Unorm,
    /// Alpha-only 8-bit normalized.
    A8Unorm,
    /// Single 16-bit normalized channel.
    R16Unorm,
    /// Two 16-bit normalized channels.
    R16G16Unorm,
    /// 4x 16-bit normalized.
    R16G16B16A16Unorm,
    /// Packed 10:10:10:2 normalized.
    R10G10B10A2Unorm,
    /// Packed 5:6:5 normalized, blue in the low bits.
    B5G6R5Unorm,
    /// Packed 5:5:5:1 normalized, blue in the low bits.
    B5G5R5A1Unorm,
    /// Packed 4:4:4:4 normalized, blue in the low bits.
    B4G4R4A4Unorm,
    /// Single 8-bit unsigned integer.
    R8Uint,
    /// 4x 8-bit unsigned integer.
    R8G8B8A8Uint,
    /// Single 16-bit unsigned integer.
    R16Uint,
    /// Single 32-bit unsigned integer.
    R32Uint,
    /// Single IEEE-754 binary16 channel.
    R16Float,
    /// Two binary16 channels.
    R16G16Float,
    /// 4x binary16.
    R16G16B16A16Float,
    /// Single binary32 channel.
    R32Float,
    /// Two binary32 channels.
    R32G32Float,
    /// 3x binary32.
    R32G32B32Float,
    /// 4x binary32.
    R32G32B32A32Float,
    /// Packed unsigned 11:11:10 small floats.
    R11G11B10Float,
    /// Three 9-bit mantissas sharing a 5-bit exponent.
    R9G9B9E5SharedExp,
    /// 16-bit normalized depth.
    D16Unorm,
    /// 24-bit normalized depth plus 8-bit stencil.
    D24UnormS8Uint,
    /// binary32 depth.
    D32Float,
    /// binary32 depth, 8-bit stencil, 24 unused bits.
    D32FloatS8X24Uint,
    /// Stencil only.
    S8Uint,
    /// BC1 (DXT1): 5:6:5 colour with optional 1-bit alpha.
    Bc1Unorm,
    /// BC2 (DXT2/3): explicit 4-bit alpha + BC1 colour.
    Bc2Unorm,
    /// BC3 (DXT4/5): interpolated alpha + BC1 colour.
    Bc3Unorm,
    /// BC4 (ATI1N): one interpolated channel.
    Bc4Unorm,
    /// BC5 (ATI2N): two interpolated channels.
    Bc5Unorm,
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::Unknown
    }
}

/// How the components of a format are stored numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Unsigned normalized integers mapping to `[0, 1]`.
    Unorm,
    /// IEEE-754 style floats (binary32, binary16, or small packed floats).
    Float,
    /// Unsigned integers exposed as their raw value.
    Uint,
    /// Mantissas sharing one exponent.
    SharedExponent,
    /// Depth, optionally with a stencil plane.
    Depth,
    /// Stencil only.
    Stencil,
    /// Block compressed.
    Compressed,
}

/// The logical meaning of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha
    Alpha,
    /// Depth
    Depth,
    /// Stencil
    Stencil,
}

/// Placement of one logical channel inside a texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelBits {
    /// Which channel this is.
    pub channel: Channel,
    /// Bit offset from the least significant bit of the little-endian texel.
    pub offset: u16,
    /// Number of bits.
    pub bits: u8,
}

const fn ch(channel: Channel, offset: u16, bits: u8) -> ChannelBits {
    ChannelBits {
        channel,
        offset,
        bits,
    }
}

/// The texel region one addressable unit covers and its size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFootprint {
    /// Texels per unit, horizontally.
    pub width: u32,
    /// Texels per unit, vertically.
    pub height: u32,
    /// Bytes per unit (texel or block).
    pub bytes: u32,
}

impl BlockFootprint {
    const fn texel(bytes: u32) -> Self {
        Self {
            width: 1,
            height: 1,
            bytes,
        }
    }

    const fn block(bytes: u32) -> Self {
        Self {
            width: 4,
            height: 4,
            bytes,
        }
    }
}

/// Registry entry for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatInfo {
    /// The format this entry describes.
    pub format: PixelFormat,
    /// Numeric kind of the components.
    pub kind: NumericKind,
    /// Block footprint; 1x1 for uncompressed formats.
    pub footprint: BlockFootprint,
    /// Channels in ascending bit order.
    pub channels: &'static [ChannelBits],
}

use Channel::{Alpha as A, Blue as B, Depth as D, Green as G, Red as R, Stencil as S};

const RGBA8: &[ChannelBits] = &[ch(R, 0, 8), ch(G, 8, 8), ch(B, 16, 8), ch(A, 24, 8)];
const BGRA8: &[ChannelBits] = &[ch(B, 0, 8), ch(G, 8, 8), ch(R, 16, 8), ch(A, 24, 8)];
const R8: &[ChannelBits] = &[ch(R, 0, 8)];
const RG8: &[ChannelBits] = &[ch(R, 0, 8), ch(G, 8, 8)];
const A8: &[ChannelBits] = &[ch(A, 0, 8)];
const R16: &[ChannelBits] = &[ch(R, 0, 16)];
const RG16: &[ChannelBits] = &[ch(R, 0, 16), ch(G, 16, 16)];
const RGBA16: &[ChannelBits] = &[ch(R, 0, 16), ch(G, 16, 16), ch(B, 32, 16), ch(A, 48, 16)];
const RGB10A2: &[ChannelBits] = &[ch(R, 0, 10), ch(G, 10, 10), ch(B, 20, 10), ch(A, 30, 2)];
const B5G6R5: &[ChannelBits] = &[ch(B, 0, 5), ch(G, 5, 6), ch(R, 11, 5)];
const B5G5R5A1: &[ChannelBits] = &[ch(B, 0, 5), ch(G, 5, 5), ch(R, 10, 5), ch(A, 15, 1)];
const B4G4R4A4: &[ChannelBits] = &[ch(B, 0, 4), ch(G, 4, 4), ch(R, 8, 4), ch(A, 12, 4)];
const R32: &[ChannelBits] = &[ch(R, 0, 32)];
const RG32: &[ChannelBits] = &[ch(R, 0, 32), ch(G, 32, 32)];
const RGB32: &[ChannelBits] = &[ch(R, 0, 32), ch(G, 32, 32), ch(B, 64, 32)];
const RGBA32: &[ChannelBits] = &[ch(R, 0, 32), ch(G, 32, 32), ch(B, 64, 32), ch(A, 96, 32)];
const R11G11B10: &[ChannelBits] = &[ch(R, 0, 11), ch(G, 11, 11), ch(B, 22, 10)];
const RGB9E5: &[ChannelBits] = &[ch(R, 0, 9), ch(G, 9, 9), ch(B, 18, 9)];
const D16: &[ChannelBits] = &[ch(D, 0, 16)];
const D24S8: &[ChannelBits] = &[ch(D, 0, 24), ch(S, 24, 8)];
const D32: &[ChannelBits] = &[ch(D, 0, 32)];
const D32S8: &[ChannelBits] = &[ch(D, 0, 32), ch(S, 32, 8)];
const S8: &[ChannelBits] = &[ch(S, 0, 8)];
const BC1: &[ChannelBits] = &[ch(R, 0, 5), ch(G, 0, 6), ch(B, 0, 5), ch(A, 0, 1)];
const BC2: &[ChannelBits] = &[ch(R, 0, 5), ch(G, 0, 6), ch(B, 0, 5), ch(A, 0, 4)];
const BC3: &[ChannelBits] = &[ch(R, 0, 5), ch(G, 0, 6), ch(B, 0, 5), ch(A, 0, 8)];
const BC4: &[ChannelBits] = &[ch(R, 0, 8)];
const BC5: &[ChannelBits] = &[ch(R, 0, 8), ch(G, 0, 8)];

impl PixelFormat {
    /// Looks up the registry entry for this format.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`]; every other
    /// format has an entry.
    pub const fn info(self) -> CodecResult<FormatInfo> {
        use NumericKind::*;
        use PixelFormat as F;

        let (kind, footprint, channels) = match self {
            F::Unknown => return Err(CodecError::InvalidFormat(self)),
            F::R8G8B8A8Unorm => (Unorm, BlockFootprint::texel(4), RGBA8),
            F::B8G8R8A8Unorm => (Unorm, BlockFootprint::texel(4), BGRA8),
            F::R8Unorm => (Unorm, BlockFootprint::texel(1), R8),
            F::R8G8Unorm => (Unorm, BlockFootprint::texel(2), RG8),
            F::A8Unorm => (Unorm, BlockFootprint::texel(1), A8),
            F::R16Unorm => (Unorm, BlockFootprint::texel(2), R16),
            F::R16G16Unorm => (Unorm, BlockFootprint::texel(4), RG16),
            F::R16G16B16A16Unorm => (Unorm, BlockFootprint::texel(8), RGBA16),
            F::R10G10B10A2Unorm => (Unorm, BlockFootprint::texel(4), RGB10A2),
            F::B5G6R5Unorm => (Unorm, BlockFootprint::texel(2), B5G6R5),
            F::B5G5R5A1Unorm => (Unorm, BlockFootprint::texel(2), B5G5R5A1),
            F::B4G4R4A4Unorm => (Unorm, BlockFootprint::texel(2), B4G4R4A4),
            F::R8Uint => (Uint, BlockFootprint::texel(1), R8),
            F::R8G8B8A8Uint => (Uint, BlockFootprint::texel(4), RGBA8),
            F::R16Uint => (Uint, BlockFootprint::texel(2), R16),
            F::R32Uint => (Uint, BlockFootprint::texel(4), R32),
            F::R16Float => (Float, BlockFootprint::texel(2), R16),
            F::R16G16Float => (Float, BlockFootprint::texel(4), RG16),
            F::R16G16B16A16Float => (Float, BlockFootprint::texel(8), RGBA16),
            F::R32Float => (Float, BlockFootprint::texel(4), R32),
            F::R32G32Float => (Float, BlockFootprint::texel(8), RG32),
            F::R32G32B32Float => (Float, BlockFootprint::texel(12), RGB32),
            F::R32G32B32A32Float => (Float, BlockFootprint::texel(16), RGBA32),
            F::R11G11B10Float => (Float, BlockFootprint::texel(4), R11G11B10),
            F::R9G9B9E5SharedExp => (SharedExponent, BlockFootprint::texel(4), RGB9E5),
            F::D16Unorm => (Depth, BlockFootprint::texel(2), D16),
            F::D24UnormS8Uint => (Depth, BlockFootprint::texel(4), D24S8),
            F::D32Float => (Depth, BlockFootprint::texel(4), D32),
            F::D32FloatS8X24Uint => (Depth, BlockFootprint::texel(8), D32S8),
            F::S8Uint => (Stencil, BlockFootprint::texel(1), S8),
            F::Bc1Unorm => (Compressed, BlockFootprint::block(8), BC1),
            F::Bc2Unorm => (Compressed, BlockFootprint::block(16), BC2),
            F::Bc3Unorm => (Compressed, BlockFootprint::block(16), BC3),
            F::Bc4Unorm => (Compressed, BlockFootprint::block(8), BC4),
            F::Bc5Unorm => (Compressed, BlockFootprint::block(16), BC5),
        };

        Ok(FormatInfo {
            format: self,
            kind,
            footprint,
            channels,
        })
    }

    /// Bytes per texel, or per block for compressed formats; `0` for [`PixelFormat::Unknown`].
    #[inline]
    pub const fn bytes_per_unit(self) -> u32 {
        match self.info() {
            Ok(info) => info.footprint.bytes,
            Err(_) => 0,
        }
    }

    /// Whether this is a block compressed format.
    #[inline]
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::Bc1Unorm | Self::Bc2Unorm | Self::Bc3Unorm | Self::Bc4Unorm | Self::Bc5Unorm
        )
    }

    /// Whether the format stores depth.
    #[inline]
    pub const fn has_depth(self) -> bool {
        matches!(
            self,
            Self::D16Unorm | Self::D24UnormS8Uint | Self::D32Float | Self::D32FloatS8X24Uint
        )
    }

    /// Whether the format stores stencil.
    #[inline]
    pub const fn has_stencil(self) -> bool {
        matches!(
            self,
            Self::D24UnormS8Uint | Self::D32FloatS8X24Uint | Self::S8Uint
        )
    }

    /// Stable numeric identifier, usable in file headers.
    pub fn to_id(self) -> u16 {
        Self::all_values()
            .iter()
            .position(|format| *format == self)
            .unwrap_or(0) as u16
    }

    /// Inverse of [`PixelFormat::to_id`]. Unrecognised ids map to [`PixelFormat::Unknown`].
    pub fn from_id(id: u16) -> Self {
        Self::all_values()
            .get(id as usize)
            .copied()
            .unwrap_or(Self::Unknown)
    }

    /// Canonical upper-case name, e.g. `R8G8B8A8_UNORM`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::R8G8B8A8Unorm => "R8G8B8A8_UNORM",
            Self::B8G8R8A8Unorm => "B8G8R8A8_UNORM",
            Self::R8Unorm => "R8_UNORM",
            Self::R8G8Unorm => "R8G8_UNORM",
            Self::A8Unorm => "A8_UNORM",
            Self::R16Unorm => "R16_UNORM",
            Self::R16G16Unorm => "R16G16_UNORM",
            Self::R16G16B16A16Unorm => "R16G16B16A16_UNORM",
            Self::R10G10B10A2Unorm => "R10G10B10A2_UNORM",
            Self::B5G6R5Unorm => "B5G6R5_UNORM",
            Self::B5G5R5A1Unorm => "B5G5R5A1_UNORM",
            Self::B4G4R4A4Unorm => "B4G4R4A4_UNORM",
            Self::R8Uint => "R8_UINT",
            Self::R8G8B8A8Uint => "R8G8B8A8_UINT",
            Self::R16Uint => "R16_UINT",
            Self::R32Uint => "R32_UINT",
            Self::R16Float => "R16_FLOAT",
            Self::R16G16Float => "R16G16_FLOAT",
            Self::R16G16B16A16Float => "R16G16B16A16_FLOAT",
            Self::R32Float => "R32_FLOAT",
            Self::R32G32Float => "R32G32_FLOAT",
            Self::R32G32B32Float => "R32G32B32_FLOAT",
            Self::R32G32B32A32Float => "R32G32B32A32_FLOAT",
            Self::R11G11B10Float => "R11G11B10_FLOAT",
            Self::R9G9B9E5SharedExp => "R9G9B9E5_SHAREDEXP",
            Self::D16Unorm => "D16_UNORM",
            Self::D24UnormS8Uint => "D24_UNORM_S8_UINT",
            Self::D32Float => "D32_FLOAT",
            Self::D32FloatS8X24Uint => "D32_FLOAT_S8X24_UINT",
            Self::S8Uint => "S8_UINT",
            Self::Bc1Unorm => "BC1_UNORM",
            Self::Bc2Unorm => "BC2_UNORM",
            Self::Bc3Unorm => "BC3_UNORM",
            Self::Bc4Unorm => "BC4_UNORM",
            Self::Bc5Unorm => "BC5_UNORM",
        }
    }

    /// Parses a canonical name (case-insensitive), see [`PixelFormat::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all_values()
            .iter()
            .copied()
            .find(|format| *format != Self::Unknown && format.name().eq_ignore_ascii_case(name))
    }
}

impl FormatInfo {
    /// Number of logical components.
    #[inline]
    pub const fn component_count(&self) -> usize {
        self.channels.len()
    }

    /// Bit width of a channel, or `None` if the format lacks it.
    pub fn bits(&self, channel: Channel) -> Option<u8> {
        self.channel_bits(channel).map(|c| c.bits)
    }

    /// Placement of a channel, or `None` if the format lacks it.
    pub fn channel_bits(&self, channel: Channel) -> Option<ChannelBits> {
        self.channels.iter().copied().find(|c| c.channel == channel)
    }

    /// Whether texels must be decoded a whole block at a time.
    #[inline]
    pub const fn is_compressed(&self) -> bool {
        matches!(self.kind, NumericKind::Compressed)
    }

    /// Number of footprint units needed to cover `width` texels.
    #[inline]
    pub const fn units_wide(&self, width: u32) -> u32 {
        width.div_ceil(self.footprint.width)
    }

    /// Number of footprint units needed to cover `height` texels.
    #[inline]
    pub const fn units_high(&self, height: u32) -> u32 {
        height.div_ceil(self.footprint.height)
    }

    /// Tightly packed bytes per row of units.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidArgument`] if the row cannot be addressed in memory.
    #[inline]
    pub fn row_pitch(&self, width: u32) -> CodecResult<usize> {
        checked_span(self.units_wide(width) as usize, self.footprint.bytes as usize)
    }

    /// Tightly packed bytes per depth slice.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidArgument`] if the slice cannot be addressed in memory.
    #[inline]
    pub fn slice_pitch(&self, width: u32, height: u32) -> CodecResult<usize> {
        checked_span(self.row_pitch(width)?, self.units_high(height) as usize)
    }
}

/// `count * stride`, rejected once it exceeds the largest possible allocation.
pub fn checked_span(count: usize, stride: usize) -> CodecResult<usize> {
    count
        .checked_mul(stride)
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(CodecError::InvalidArgument(
            "extent is too large to address in memory",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_known_format_has_an_entry() {
        for format in PixelFormat::all_values().iter().copied() {
            if format == PixelFormat::Unknown {
                assert_eq!(format.info(), Err(CodecError::InvalidFormat(format)));
                assert_eq!(format.bytes_per_unit(), 0);
                continue;
            }

            let info = format.info().unwrap();
            assert_eq!(info.format, format);
            assert!(info.footprint.bytes > 0, "{format:?}");
            assert!(info.component_count() > 0, "{format:?}");
            assert_eq!(info.is_compressed(), format.is_compressed(), "{format:?}");
            assert_eq!(
                info.kind == NumericKind::Depth,
                format.has_depth(),
                "{format:?}"
            );
        }
    }

    #[test]
    fn uncompressed_channels_fit_inside_the_texel() {
        for format in PixelFormat::all_values().iter().copied() {
            let Ok(info) = format.info() else { continue };
            if info.is_compressed() {
                continue;
            }
            for channel in info.channels {
                let end = channel.offset as u32 + channel.bits as u32;
                assert!(end <= info.footprint.bytes * 8, "{format:?} {channel:?}");
            }
        }
    }

    #[rstest]
    #[case(PixelFormat::R8G8B8A8Unorm, 5, 1, 20, 20)]
    #[case(PixelFormat::R32G32B32Float, 3, 2, 36, 72)]
    #[case(PixelFormat::Bc1Unorm, 8, 8, 16, 32)]
    #[case(PixelFormat::Bc3Unorm, 5, 5, 32, 64)]
    #[case(PixelFormat::Bc4Unorm, 1, 1, 8, 8)]
    fn computes_pitches(
        #[case] format: PixelFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] row_pitch: usize,
        #[case] slice_pitch: usize,
    ) {
        let info = format.info().unwrap();
        assert_eq!(info.row_pitch(width), Ok(row_pitch));
        assert_eq!(info.slice_pitch(width, height), Ok(slice_pitch));
    }

    #[test]
    fn oversized_slices_are_rejected() {
        let info = PixelFormat::R32G32B32A32Float.info().unwrap();
        // 16 bytes * 2^32 texels fits a 64-bit row but not a 32-bit one.
        if usize::BITS == 64 {
            assert_eq!(info.row_pitch(u32::MAX), Ok(u32::MAX as usize * 16));
        }
        assert!(matches!(
            info.slice_pitch(u32::MAX, u32::MAX),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            checked_span(usize::MAX / 2 + 1, 1),
            Err(CodecError::InvalidArgument(_))
        ));
        assert_eq!(checked_span(3, 4), Ok(12));
    }

    #[test]
    fn ids_and_names_round_trip() {
        for format in PixelFormat::all_values().iter().copied() {
            assert_eq!(PixelFormat::from_id(format.to_id()), format);
            if format != PixelFormat::Unknown {
                assert_eq!(PixelFormat::from_name(format.name()), Some(format));
            }
        }
        assert_eq!(PixelFormat::from_id(u16::MAX), PixelFormat::Unknown);
        assert_eq!(PixelFormat::from_name("bc1_unorm"), Some(PixelFormat::Bc1Unorm));
    }

    #[test]
    fn depth_stencil_channels_are_exposed() {
        let info = PixelFormat::D24UnormS8Uint.info().unwrap();
        assert_eq!(info.bits(Channel::Depth), Some(24));
        assert_eq!(info.bits(Channel::Stencil), Some(8));
        assert_eq!(info.bits(Channel::Red), None);
        assert!(PixelFormat::D24UnormS8Uint.has_stencil());
    }
}
