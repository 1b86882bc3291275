//! Code shared between every texel-pipeline crate.
//!
//! - [`format`]: the format registry ([`format::PixelFormat`] and its static metadata).
//! - [`color_565`], [`color_8888`], [`float4`]: endpoint and interchange colour types.
//! - [`sample`]: the sample kinds (unorm8 / float) codecs are generic over.
//! - [`decoded_4x4_block`]: a decoded 4x4 block of samples.
//! - [`encoded_block`]: an encoder's output block and its measured error.
//! - [`error`]: the error taxonomy shared by the codecs and the pipeline.
#![warn(missing_docs)]

pub mod color_565;
pub mod color_8888;
pub mod decoded_4x4_block;
pub mod encoded_block;
pub mod error;
pub mod float4;
pub mod format;
pub mod sample;

pub use error::{CodecError, CodecResult};
pub use format::{
    checked_span, BlockFootprint, Channel, ChannelBits, FormatInfo, NumericKind, PixelFormat,
};
