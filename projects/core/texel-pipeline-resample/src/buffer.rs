//! Buffer layout descriptors and texel location.

use crate::address::{resolve_coordinate, AddressModes};
use texel_pipeline_common::{
    checked_span, decoded_4x4_block::BLOCK_DIM, CodecError, CodecResult, FormatInfo, PixelFormat,
};

/// Layout of a texel buffer: format, extent and pitches.
///
/// Rows are rows of footprint units, so for block compressed formats
/// `row_pitch` is the distance between consecutive rows of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferDesc {
    /// Format of every texel in the buffer.
    pub format: PixelFormat,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth in texels (slices).
    pub depth: u32,
    /// Bytes between the starts of consecutive unit rows.
    pub row_pitch: usize,
    /// Bytes between the starts of consecutive depth slices.
    pub slice_pitch: usize,
}

/// Where a texel lives inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TexelLocation {
    /// Byte offset of the texel, or of the block containing it.
    pub offset: usize,
    /// Row-major index of the texel within its 4x4 block, for compressed formats.
    pub block_texel: Option<usize>,
}

impl BufferDesc {
    /// A tightly packed buffer of `format`.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`] and
    /// [`CodecError::InvalidArgument`] for a zero extent or one too large to
    /// address in memory.
    pub fn tight(format: PixelFormat, width: u32, height: u32, depth: u32) -> CodecResult<Self> {
        let info = format.info()?;
        let desc = Self {
            format,
            width,
            height,
            depth,
            row_pitch: info.row_pitch(width)?,
            slice_pitch: info.slice_pitch(width, height)?,
        };
        desc.validate()?;
        Ok(desc)
    }

    /// Checks extents and pitches against the format.
    ///
    /// A validated descriptor spans at most `isize::MAX` bytes, so offsets
    /// derived from it never overflow.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidFormat`] for [`PixelFormat::Unknown`]
    /// - [`CodecError::InvalidArgument`] for a zero extent, a pitch smaller
    ///   than the data it must hold, or a buffer too large to address
    pub fn validate(&self) -> CodecResult<FormatInfo> {
        let info = self.format.info()?;
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(CodecError::InvalidArgument("buffer has a zero extent"));
        }
        if self.row_pitch < info.row_pitch(self.width)? {
            return Err(CodecError::InvalidArgument(
                "row pitch is smaller than one row of texels",
            ));
        }
        let rows = info.units_high(self.height) as usize;
        if self.slice_pitch < checked_span(self.row_pitch, rows)? {
            return Err(CodecError::InvalidArgument(
                "slice pitch is smaller than one slice of rows",
            ));
        }
        self.allocation_len()?;
        Ok(info)
    }

    /// Bytes a buffer needs to hold every slice including its padding.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidArgument`] if that is more than can be addressed.
    pub fn allocation_len(&self) -> CodecResult<usize> {
        checked_span(self.slice_pitch, self.depth as usize)
    }

    /// Bytes spanned by the buffer; trailing row and slice padding is not required.
    ///
    /// `self` must have passed [`BufferDesc::validate`].
    pub fn required_len(&self, info: &FormatInfo) -> usize {
        // Every term is bounded by `allocation_len`, which validation checked.
        let packed_row = info.units_wide(self.width) as usize * info.footprint.bytes as usize;
        self.slice_pitch * (self.depth as usize - 1)
            + self.row_pitch * (info.units_high(self.height) as usize - 1)
            + packed_row
    }

    /// Validates the descriptor and checks `len` bytes are enough to hold it.
    ///
    /// # Errors
    ///
    /// Those of [`BufferDesc::validate`], plus [`CodecError::SizeMismatch`]
    /// when `len` is too small.
    pub fn check_buffer(&self, len: usize) -> CodecResult<FormatInfo> {
        let info = self.validate()?;
        let required = self.required_len(&info);
        if len < required {
            return Err(CodecError::SizeMismatch {
                required,
                actual: len,
            });
        }
        Ok(info)
    }

    /// Resolves each coordinate with its axis' address mode and returns where
    /// the texel lives.
    ///
    /// Never fails for a validated descriptor; every resolved coordinate is in range.
    ///
    /// # Parameters
    ///
    /// - `info`: The registry entry for [`BufferDesc::format`]
    /// - `x`, `y`, `z`: Texel coordinates, possibly outside the buffer
    /// - `modes`: Address mode per axis
    pub fn locate_texel(
        &self,
        info: &FormatInfo,
        x: i64,
        y: i64,
        z: i64,
        modes: AddressModes,
    ) -> TexelLocation {
        let x = resolve_coordinate(x, self.width, modes.u) as usize;
        let y = resolve_coordinate(y, self.height, modes.v) as usize;
        let z = resolve_coordinate(z, self.depth, modes.w) as usize;

        let unit_w = info.footprint.width as usize;
        let unit_h = info.footprint.height as usize;
        let offset = z * self.slice_pitch
            + (y / unit_h) * self.row_pitch
            + (x / unit_w) * info.footprint.bytes as usize;

        let block_texel = info
            .is_compressed()
            .then(|| (y % BLOCK_DIM) * BLOCK_DIM + x % BLOCK_DIM);
        TexelLocation {
            offset,
            block_texel,
        }
    }
}
