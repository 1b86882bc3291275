//! Builder for reformat operations on images.

use crate::error::ImageResult;
use crate::image::Image;
use log::debug;
use texel_pipeline_bc1::Bc1AlphaMode;
use texel_pipeline_block::BlockCodecSettings;
use texel_pipeline_common::PixelFormat;
use texel_pipeline_resample::{
    reformat_buffer, AddressMode, AddressModes, ReformatSettings, Transform,
};

/// Configures and runs conversions and resizes between images.
///
/// Defaults: no transform, clamp addressing on every axis, BC1 alpha decoded,
/// BC1 encoded opaque with endpoint refinement.
///
/// ```
/// use texel_pipeline_common::PixelFormat;
/// use texel_pipeline_image_api::{Image, ReformatBuilder};
/// use texel_pipeline_resample::AddressMode;
///
/// let src = Image::with_dimensions(PixelFormat::R8G8B8A8Unorm, 8, 8, 1).unwrap();
/// let bc1 = ReformatBuilder::new()
///     .address_mode_all(AddressMode::Wrap)
///     .convert(&src, PixelFormat::Bc1Unorm)
///     .unwrap();
/// assert_eq!(bc1.map_read().unwrap().len(), 32);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReformatBuilder {
    settings: ReformatSettings,
}

impl ReformatBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps normalized destination coordinates to normalized source coordinates.
    pub fn transform(mut self, transform: Transform) -> Self {
        self.settings.transform = Some(transform);
        self
    }

    /// Sets the address mode of each axis.
    pub fn address_modes(mut self, modes: AddressModes) -> Self {
        self.settings.address_modes = modes;
        self
    }

    /// Uses `mode` on every axis.
    pub fn address_mode_all(mut self, mode: AddressMode) -> Self {
        self.settings.address_modes = AddressModes::all(mode);
        self
    }

    /// Whether BC1 blocks in 3-colour mode decode index 3 as transparent.
    pub fn allow_bc1_alpha(mut self, allow: bool) -> Self {
        self.settings.codec.bc1_decode.allow_alpha = allow;
        self
    }

    /// How BC1 destinations encode alpha.
    pub fn bc1_alpha_mode(mut self, mode: Bc1AlphaMode) -> Self {
        self.settings.codec.bc1_encode.alpha_mode = mode;
        self
    }

    /// Alpha below which BC1 texels become transparent in
    /// [`Bc1AlphaMode::PunchThrough`] mode.
    pub fn bc1_alpha_threshold(mut self, threshold: u8) -> Self {
        self.settings.codec.bc1_encode.alpha_threshold = threshold;
        self
    }

    /// Whether BC1/BC2/BC3 colour endpoints get a least-squares refinement pass.
    pub fn refine_endpoints(mut self, refine: bool) -> Self {
        self.settings.codec.bc1_encode.refine = refine;
        self
    }

    /// Replaces every block codec setting.
    pub fn codec(mut self, codec: BlockCodecSettings) -> Self {
        self.settings.codec = codec;
        self
    }

    /// The settings passed to the pipeline.
    pub fn settings(&self) -> &ReformatSettings {
        &self.settings
    }

    /// Resamples `src` into `dst`, keeping `dst`'s format and extent.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidDimensions`](crate::ImageError::InvalidDimensions)
    /// if either image is empty, otherwise the pipeline's
    /// [`CodecError`](texel_pipeline_common::CodecError).
    pub fn reformat(&self, src: &Image, dst: &mut Image) -> ImageResult<()> {
        let source = src.map_read()?;
        let mut target = dst.map_write()?;
        let target_desc = *target.desc();
        debug!(
            "Reformatting {} image into {}",
            source.desc().format.name(),
            target_desc.format.name()
        );
        reformat_buffer(
            source.desc(),
            &source,
            &target_desc,
            &mut target,
            &self.settings,
        )?;
        Ok(())
    }

    /// A new image holding `src` resampled to `format` and the given extent.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn reformat_to(
        &self,
        src: &Image,
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
    ) -> ImageResult<Image> {
        src.desc()?;
        let mut dst = Image::with_dimensions(format, width, height, depth)?;
        self.reformat(src, &mut dst)?;
        Ok(dst)
    }

    /// A new image holding `src` in another format, same extent.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn convert(&self, src: &Image, format: PixelFormat) -> ImageResult<Image> {
        self.reformat_to(src, format, src.width(), src.height(), src.depth())
    }

    /// A new image holding `src` at another extent, same format.
    ///
    /// # Errors
    ///
    /// See [`ReformatBuilder::reformat`].
    pub fn resize(&self, src: &Image, width: u32, height: u32, depth: u32) -> ImageResult<Image> {
        self.reformat_to(src, src.format(), width, height, depth)
    }
}
