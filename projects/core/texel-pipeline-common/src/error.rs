//! Error types shared by the registry, scalar codec, block codecs and the resample pipeline.

use crate::format::PixelFormat;
use thiserror::Error;

/// Result type for codec and pipeline operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by the format registry, the texel/block codecs and the reformat pipeline.
///
/// Every fallible codec function validates its inputs before writing, so an
/// `Err` always means the output buffer was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Unknown or unsupported format passed to the registry, a codec or the pipeline.
    #[error("Invalid or unsupported pixel format: {0:?}")]
    InvalidFormat(PixelFormat),

    /// A buffer is smaller than its dimensions, format and pitch require.
    #[error("Buffer too small: required {required} bytes, got {actual} bytes")]
    SizeMismatch {
        /// The required buffer size.
        required: usize,
        /// The actual buffer size provided.
        actual: usize,
    },

    /// The requested source/destination format pair has no codec path.
    #[error("Unsupported conversion from {from:?} to {to:?}")]
    UnsupportedConversion {
        /// Source format.
        from: PixelFormat,
        /// Destination format.
        to: PixelFormat,
    },

    /// An argument violates a codec precondition (block too short, wrong format family,
    /// dimensions that are not a multiple of the block footprint, zero extents...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl CodecError {
    /// Checks that a block buffer holds at least one `block_size`-byte block.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidArgument`] if `len < block_size`.
    #[inline]
    pub fn check_block_len(len: usize, block_size: usize) -> CodecResult<()> {
        if len < block_size {
            return Err(CodecError::InvalidArgument(
                "block buffer is shorter than one compressed block",
            ));
        }
        Ok(())
    }
}
