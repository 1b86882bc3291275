//! Image loading and saving through registered file handlers.

use crate::error::{ImageError, ImageResult};
use crate::handler::ImageFileHandler;
use crate::image::Image;
use crate::registry::{FileHandlerRegistry, HandlerId};
use log::debug;
use std::io::Write;

/// Loads and saves images through the handlers it owns.
///
/// ```
/// use texel_pipeline_image_api::ImageIo;
///
/// let io = ImageIo::new();
/// assert!(io.registry().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ImageIo {
    registry: FileHandlerRegistry,
}

impl ImageIo {
    /// A facade with no handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handler table.
    pub fn registry(&self) -> &FileHandlerRegistry {
        &self.registry
    }

    /// Registers a handler; see [`FileHandlerRegistry::register`].
    ///
    /// # Errors
    ///
    /// [`ImageError::HandlerTableFull`] when every slot is taken.
    pub fn register(&mut self, handler: impl ImageFileHandler + 'static) -> ImageResult<HandlerId> {
        self.registry.register(Box::new(handler))
    }

    /// Removes a handler; see [`FileHandlerRegistry::remove`].
    ///
    /// # Errors
    ///
    /// [`ImageError::NoHandler`] if the slot is empty.
    pub fn remove(&mut self, id: HandlerId) -> ImageResult<Box<dyn ImageFileHandler>> {
        self.registry.remove(id)
    }

    /// Decodes a whole file held in memory.
    ///
    /// # Errors
    ///
    /// - [`ImageError::NoHandler`] if `id` is not registered
    /// - [`ImageError::IoFailure`] with the handler's error, including a
    ///   rejection from [`ImageFileHandler::validate_payload`]
    /// - [`ImageError::InvalidDimensions`] or a codec error if the header
    ///   describes an image that cannot be allocated
    pub fn load(&self, id: HandlerId, input: &[u8]) -> ImageResult<Image> {
        let handler = self.registry.get(id)?;
        let header = handler.load_header(input).map_err(ImageError::IoFailure)?;
        debug!(
            "Loading {}x{}x{} {} image with '{}'",
            header.width,
            header.height,
            header.depth,
            header.format.name(),
            handler.name()
        );

        let layout =
            Image::tight_layout(header.format, header.width, header.height, header.depth)?;
        handler
            .validate_payload(input, &header, &layout)
            .map_err(ImageError::IoFailure)?;

        let mut image = Image::from_layout(layout)?;
        {
            let mut texels = image.map_write()?;
            let layout = *texels.desc();
            handler
                .load_pixels(input, &header, &layout, &mut texels)
                .map_err(ImageError::IoFailure)?;
        }
        Ok(image)
    }

    /// Encodes `image` into `output`.
    ///
    /// # Errors
    ///
    /// - [`ImageError::NoHandler`] if `id` is not registered
    /// - [`ImageError::InvalidDimensions`] for an empty image
    /// - [`ImageError::IoFailure`] with the handler's error
    pub fn save(&self, id: HandlerId, image: &Image, output: &mut dyn Write) -> ImageResult<()> {
        let handler = self.registry.get(id)?;
        let texels = image.map_read()?;
        debug!(
            "Saving {}x{}x{} {} image with '{}'",
            image.width(),
            image.height(),
            image.depth(),
            image.format().name(),
            handler.name()
        );
        handler
            .save(texels.desc(), &texels, output)
            .map_err(ImageError::IoFailure)
    }

    /// Memory-maps and decodes a file.
    ///
    /// # Errors
    ///
    /// Those of [`ImageIo::load`], plus [`ImageError::FileHandle`] and
    /// [`ImageError::MemoryMapping`] when the file cannot be opened or mapped.
    #[cfg(feature = "file-io")]
    pub fn load_file(&self, id: HandlerId, path: &std::path::Path) -> ImageResult<Image> {
        crate::file_io::with_mapped_file(path, |input| self.load(id, input))
    }

    /// Encodes `image` into a file at `path`.
    ///
    /// # Errors
    ///
    /// Those of [`ImageIo::save`], plus [`ImageError::FileHandle`] and
    /// [`ImageError::MemoryMapping`] when the file cannot be created or mapped.
    #[cfg(feature = "file-io")]
    pub fn save_file(&self, id: HandlerId, image: &Image, path: &std::path::Path) -> ImageResult<()> {
        let mut encoded: Vec<u8> = Vec::new();
        self.save(id, image, &mut encoded)?;
        crate::file_io::write_file(path, &encoded)
    }
}
