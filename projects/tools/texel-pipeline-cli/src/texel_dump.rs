//! The "texel dump" container: a 16-byte header followed by tightly packed texels.
//!
//! ```text
//! offset  size  field
//!      0     4  magic "TXLD"
//!      4     2  format id (PixelFormat::to_id)
//!      6     2  depth
//!      8     4  width
//!     12     4  height
//! ```
//!
//! All fields are little-endian. Rows of blocks (or texels) follow the header
//! without padding, slice after slice.

use std::io::Write;
use texel_pipeline_image_api::{
    BufferDesc, HandlerError, ImageFileHandler, ImageHeader, PixelFormat,
};
use thiserror::Error;

/// File signature.
pub const MAGIC: [u8; 4] = *b"TXLD";

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TexelDumpError {
    #[error("Not a texel dump (missing TXLD signature)")]
    BadMagic,
    #[error("Unknown format id {0}")]
    UnknownFormat(u16),
    #[error("Texel data is truncated: need {required} bytes, file has {actual}")]
    Truncated { required: usize, actual: usize },
    #[error("Depth {0} does not fit the 16-bit header field")]
    DepthTooLarge(u32),
}

/// Reads a header field; the caller has already checked `input` holds a header.
fn field<const N: usize>(input: &[u8], offset: usize) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&input[offset..offset + N]);
    bytes
}

/// Byte ranges of each stored row within a buffer with layout `layout`.
fn rows(layout: &BufferDesc) -> Result<impl Iterator<Item = (usize, usize)>, HandlerError> {
    let info = layout.format.info()?;
    let packed = info.row_pitch(layout.width)?;
    let (row_pitch, slice_pitch) = (layout.row_pitch, layout.slice_pitch);
    let rows_per_slice = info.units_high(layout.height) as usize;
    Ok((0..layout.depth as usize).flat_map(move |z| {
        (0..rows_per_slice).map(move |row| (z * slice_pitch + row * row_pitch, packed))
    }))
}

/// The packed texels following the header, checked to cover every row of `layout`.
fn stored_texels<'a>(input: &'a [u8], layout: &BufferDesc) -> Result<&'a [u8], HandlerError> {
    let info = layout.format.info()?;
    let slice = info.slice_pitch(layout.width, layout.height)?;
    let required = slice.checked_mul(layout.depth as usize).unwrap_or(usize::MAX);

    let texels = input.get(HEADER_SIZE..).unwrap_or_default();
    if texels.len() < required {
        return Err(TexelDumpError::Truncated {
            required,
            actual: texels.len(),
        }
        .into());
    }
    Ok(texels)
}

/// Handler for `.texels` files.
pub struct TexelDumpHandler;

impl ImageFileHandler for TexelDumpHandler {
    fn name(&self) -> &str {
        "texel-dump"
    }

    fn load_header(&self, input: &[u8]) -> Result<ImageHeader, HandlerError> {
        if input.len() < HEADER_SIZE || input[..4] != MAGIC {
            return Err(TexelDumpError::BadMagic.into());
        }

        let id = u16::from_le_bytes(field(input, 4));
        let format = PixelFormat::from_id(id);
        if format == PixelFormat::Unknown {
            return Err(TexelDumpError::UnknownFormat(id).into());
        }

        Ok(ImageHeader {
            format,
            depth: u16::from_le_bytes(field(input, 6)) as u32,
            width: u32::from_le_bytes(field(input, 8)),
            height: u32::from_le_bytes(field(input, 12)),
        })
    }

    fn validate_payload(
        &self,
        input: &[u8],
        _header: &ImageHeader,
        layout: &BufferDesc,
    ) -> Result<(), HandlerError> {
        stored_texels(input, layout).map(|_| ())
    }

    fn load_pixels(
        &self,
        input: &[u8],
        _header: &ImageHeader,
        layout: &BufferDesc,
        dst: &mut [u8],
    ) -> Result<(), HandlerError> {
        let texels = stored_texels(input, layout)?;
        let mut stored = texels.chunks_exact(layout.format.info()?.row_pitch(layout.width)?);
        for ((offset, len), src) in rows(layout)?.zip(&mut stored) {
            dst[offset..offset + len].copy_from_slice(src);
        }
        Ok(())
    }

    fn save(
        &self,
        layout: &BufferDesc,
        src: &[u8],
        output: &mut dyn Write,
    ) -> Result<(), HandlerError> {
        let depth =
            u16::try_from(layout.depth).map_err(|_| TexelDumpError::DepthTooLarge(layout.depth))?;

        let mut header = [0u8; HEADER_SIZE];
        header[0..4].copy_from_slice(&MAGIC);
        header[4..6].copy_from_slice(&layout.format.to_id().to_le_bytes());
        header[6..8].copy_from_slice(&depth.to_le_bytes());
        header[8..12].copy_from_slice(&layout.width.to_le_bytes());
        header[12..16].copy_from_slice(&layout.height.to_le_bytes());
        output.write_all(&header)?;

        for (offset, len) in rows(layout)? {
            output.write_all(&src[offset..offset + len])?;
        }
        Ok(())
    }
}
