//! Trait for pluggable image file handlers.

use crate::error::HandlerError;
use std::io::Write;
use texel_pipeline_common::PixelFormat;
use texel_pipeline_resample::BufferDesc;

/// Image metadata read from a file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
    /// Format of the stored texels.
    pub format: PixelFormat,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth in texels.
    pub depth: u32,
}

/// Reads and writes one container format.
///
/// The engine never parses containers itself. Loading asks the handler for the
/// header, lets it check the file can supply that image, allocates the image,
/// then asks the handler to fill it. Saving hands the handler the image's
/// texels and an output stream.
///
/// Errors are returned as [`HandlerError`] and reach the caller unchanged,
/// wrapped in [`ImageError::IoFailure`](crate::ImageError::IoFailure).
pub trait ImageFileHandler: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Reads the image metadata from the start of `input`.
    fn load_header(&self, input: &[u8]) -> Result<ImageHeader, HandlerError>;

    /// Checks `input` holds the texels `header` promises, before any storage
    /// is allocated for them.
    ///
    /// Handlers whose payload size is known from the header should override
    /// this so a small file cannot request a huge allocation.
    ///
    /// # Parameters
    ///
    /// - `input`: The whole file
    /// - `header`: What [`ImageFileHandler::load_header`] returned for `input`
    /// - `layout`: The tightly packed layout the image will be allocated with
    fn validate_payload(
        &self,
        input: &[u8],
        header: &ImageHeader,
        layout: &BufferDesc,
    ) -> Result<(), HandlerError> {
        let _ = (input, header, layout);
        Ok(())
    }

    /// Copies the texels stored in `input` into `dst`.
    ///
    /// # Parameters
    ///
    /// - `input`: The whole file
    /// - `header`: What [`ImageFileHandler::load_header`] returned for `input`
    /// - `layout`: Layout of `dst`, including its pitches
    /// - `dst`: Destination texel storage
    fn load_pixels(
        &self,
        input: &[u8],
        header: &ImageHeader,
        layout: &BufferDesc,
        dst: &mut [u8],
    ) -> Result<(), HandlerError>;

    /// Writes a complete file (header and texels) to `output`.
    ///
    /// # Parameters
    ///
    /// - `layout`: Layout of `src`, including its pitches
    /// - `src`: The texels to store
    /// - `output`: Destination stream
    fn save(&self, layout: &BufferDesc, src: &[u8], output: &mut dyn Write)
        -> Result<(), HandlerError>;
}
