//! Error types for image and file-handler operations.

use crate::registry::HandlerId;
use texel_pipeline_common::CodecError;
use thiserror::Error;

/// Error returned by a file handler, passed through to the caller unchanged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors raised by [`Image`](crate::Image), [`ImageIo`](crate::ImageIo) and
/// [`ReformatBuilder`](crate::ReformatBuilder).
#[derive(Debug, Error)]
pub enum ImageError {
    /// A codec or pipeline error.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A file handler failed; the source is the handler's own error.
    #[error("File handler failed: {0}")]
    IoFailure(#[source] HandlerError),

    /// No handler is registered under this id.
    #[error("No file handler registered as {0:?}")]
    NoHandler(HandlerId),

    /// Every handler slot is taken.
    #[error("File handler table is full ({} handlers)", crate::registry::MAX_FILE_HANDLERS)]
    HandlerTableFull,

    /// The image has no dimensions yet, or was given a zero extent.
    #[error("Image dimensions must be at least 1x1x1")]
    InvalidDimensions,

    /// Opening a file failed.
    #[cfg(feature = "file-io")]
    #[error("Failed to open file handle: {0}")]
    FileHandle(#[from] lightweight_mmap::handles::HandleOpenError),

    /// Mapping a file into memory failed.
    #[cfg(feature = "file-io")]
    #[error("Failed to create memory mapping: {0}")]
    MemoryMapping(#[from] lightweight_mmap::mmap::MmapError),
}

impl ImageError {
    /// Wraps a handler error.
    pub fn io(error: impl Into<HandlerError>) -> Self {
        Self::IoFailure(error.into())
    }
}
