//! The image container.

use crate::builder::ReformatBuilder;
use crate::error::{ImageError, ImageResult};
use core::ops::{Deref, DerefMut};
use texel_pipeline_common::{float4::Float4, PixelFormat};
use texel_pipeline_resample::{AddressModes, BufferDesc, TexelReader};

/// An image: a format, an extent and the one buffer holding its texels.
///
/// The image owns its buffer. [`Image::set_dimensions`] replaces it, and
/// reformat operations borrow it immutably while writing into a new image.
/// Mapping follows the borrow rules: any number of [`Image::map_read`] views,
/// or a single [`Image::map_write`] view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    desc: Option<BufferDesc>,
    data: Vec<u8>,
}

/// Read access to an image's texels.
#[derive(Debug)]
pub struct MappedRead<'a> {
    desc: BufferDesc,
    data: &'a [u8],
}

/// Write access to an image's texels.
#[derive(Debug)]
pub struct MappedWrite<'a> {
    desc: BufferDesc,
    data: &'a mut [u8],
}

impl MappedRead<'_> {
    /// Layout of the mapped bytes.
    pub fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

impl MappedWrite<'_> {
    /// Layout of the mapped bytes.
    pub fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

impl Deref for MappedRead<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl Deref for MappedWrite<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl DerefMut for MappedWrite<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

impl Image {
    /// An empty image with no dimensions or storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero-filled, tightly packed image.
    ///
    /// # Errors
    ///
    /// See [`Image::set_dimensions`].
    pub fn with_dimensions(
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
    ) -> ImageResult<Self> {
        let mut image = Self::new();
        image.set_dimensions(format, width, height, depth)?;
        Ok(image)
    }

    /// Wraps existing texel data.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for a zero extent, or the
    /// [`CodecError`](texel_pipeline_common::CodecError) raised by
    /// [`BufferDesc::check_buffer`] for a bad layout or a short `data`.
    pub fn from_parts(desc: BufferDesc, data: Vec<u8>) -> ImageResult<Self> {
        check_extent(desc.width, desc.height, desc.depth)?;
        desc.check_buffer(data.len())?;
        Ok(Self {
            desc: Some(desc),
            data,
        })
    }

    /// Resizes storage for a tightly packed image, discarding the old texels.
    ///
    /// The new buffer is zero-filled.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for a zero extent,
    /// [`CodecError::InvalidFormat`](texel_pipeline_common::CodecError::InvalidFormat)
    /// for [`PixelFormat::Unknown`], or
    /// [`CodecError::InvalidArgument`](texel_pipeline_common::CodecError::InvalidArgument)
    /// when the texels could not be addressed in memory.
    pub fn set_dimensions(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
    ) -> ImageResult<()> {
        let desc = Self::tight_layout(format, width, height, depth)?;
        self.set_layout(desc)
    }

    /// The layout [`Image::set_dimensions`] would allocate, without allocating.
    pub(crate) fn tight_layout(
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
    ) -> ImageResult<BufferDesc> {
        check_extent(width, height, depth)?;
        Ok(BufferDesc::tight(format, width, height, depth)?)
    }

    /// A zero-filled image with a layout that has already been validated.
    pub(crate) fn from_layout(desc: BufferDesc) -> ImageResult<Self> {
        let mut image = Self::new();
        image.set_layout(desc)?;
        Ok(image)
    }

    /// Like [`Image::set_dimensions`], with explicit row and slice pitches.
    ///
    /// # Errors
    ///
    /// Also fails when either pitch is too small for the extent.
    pub fn set_dimensions_with_pitch(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
        row_pitch: usize,
        slice_pitch: usize,
    ) -> ImageResult<()> {
        check_extent(width, height, depth)?;
        self.set_layout(BufferDesc {
            format,
            width,
            height,
            depth,
            row_pitch,
            slice_pitch,
        })
    }

    fn set_layout(&mut self, desc: BufferDesc) -> ImageResult<()> {
        desc.validate()?;
        let len = desc.allocation_len()?;
        self.data.clear();
        self.data.resize(len, 0);
        self.desc = Some(desc);
        Ok(())
    }

    /// Whether [`Image::set_dimensions`] has not been called yet.
    pub fn is_empty(&self) -> bool {
        self.desc.is_none()
    }

    /// The buffer layout.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for an empty image.
    pub fn desc(&self) -> ImageResult<&BufferDesc> {
        self.desc.as_ref().ok_or(ImageError::InvalidDimensions)
    }

    /// Texel format; [`PixelFormat::Unknown`] for an empty image.
    pub fn format(&self) -> PixelFormat {
        self.desc.map_or(PixelFormat::Unknown, |d| d.format)
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.desc.map_or(0, |d| d.width)
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.desc.map_or(0, |d| d.height)
    }

    /// Depth in texels.
    pub fn depth(&self) -> u32 {
        self.desc.map_or(0, |d| d.depth)
    }

    /// Bytes per row of footprint units.
    pub fn row_pitch(&self) -> usize {
        self.desc.map_or(0, |d| d.row_pitch)
    }

    /// Bytes per depth slice.
    pub fn slice_pitch(&self) -> usize {
        self.desc.map_or(0, |d| d.slice_pitch)
    }

    /// Borrows the texels for reading.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for an empty image.
    pub fn map_read(&self) -> ImageResult<MappedRead<'_>> {
        Ok(MappedRead {
            desc: *self.desc()?,
            data: &self.data,
        })
    }

    /// Borrows the texels for writing.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for an empty image.
    pub fn map_write(&mut self) -> ImageResult<MappedWrite<'_>> {
        let desc = *self.desc()?;
        Ok(MappedWrite {
            desc,
            data: &mut self.data,
        })
    }

    /// Consumes the image, returning its texel bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// A copy of this image in another format, same size.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn converted(&self, format: PixelFormat) -> ImageResult<Image> {
        ReformatBuilder::new().convert(self, format)
    }

    /// A resampled copy of this image, same format.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn resized(&self, width: u32, height: u32, depth: u32) -> ImageResult<Image> {
        ReformatBuilder::new().resize(self, width, height, depth)
    }

    /// The next mip level: every axis halved (never below 1) with a box filter.
    ///
    /// Block compressed images need the halved width and height to remain
    /// multiples of 4.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn generate_mip(&self) -> ImageResult<Image> {
        let half = |extent: u32| (extent / 2).max(1);
        self.resized(half(self.width()), half(self.height()), half(self.depth()))
    }

    /// Samples the image with linear filtering at normalized `(u, v, w)`.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for an empty image.
    pub fn sample(&self, u: f32, v: f32, w: f32, modes: AddressModes) -> ImageResult<Float4> {
        let desc = self.desc()?;
        Ok(texel_pipeline_resample::sample_buffer(
            desc,
            &self.data,
            [u, v, w],
            modes,
            &Default::default(),
        )?)
    }

    /// Decodes one texel; compressed images decode the containing block.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`] for an empty image, or
    /// [`CodecError::InvalidArgument`](texel_pipeline_common::CodecError::InvalidArgument)
    /// for coordinates outside the image.
    pub fn texel_float4(&self, x: u32, y: u32, z: u32) -> ImageResult<Float4> {
        let desc = self.desc()?;
        if x >= desc.width || y >= desc.height || z >= desc.depth {
            return Err(texel_pipeline_common::CodecError::InvalidArgument(
                "texel coordinate is outside the image",
            )
            .into());
        }

        let mut reader =
            TexelReader::new(desc, &self.data, AddressModes::default(), Default::default())?;
        Ok(reader.read(x as i64, y as i64, z as i64)?)
    }
}

fn check_extent(width: u32, height: u32, depth: u32) -> ImageResult<()> {
    if width == 0 || height == 0 || depth == 0 {
        return Err(ImageError::InvalidDimensions);
    }
    Ok(())
}
