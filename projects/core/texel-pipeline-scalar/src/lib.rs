//! # Scalar Codec
//!
//! Bit-exact conversion of single texels between their stored encoding and the
//! two interchange samples: [`Float4`] (four `f32`) and [`Color8888`] (four
//! unorm8 values).
//!
//! Uncompressed formats are handled here; block compressed formats must be
//! decoded a whole block at a time (see the BC crates) and are rejected with
//! [`CodecError::InvalidArgument`].
//!
//! ```
//! use texel_pipeline_common::float4::Float4;
//! use texel_pipeline_common::format::PixelFormat;
//! use texel_pipeline_scalar::{from_float4, to_float4};
//!
//! let mut texel = [0u8; 8];
//! let value = Float4::new(0.5, -2.0, 1024.0, 1.0);
//! from_float4(PixelFormat::R16G16B16A16Float, value, &mut texel).unwrap();
//! assert_eq!(to_float4(PixelFormat::R16G16B16A16Float, &texel).unwrap(), value);
//! ```
//!
//! [`Float4`]: texel_pipeline_common::float4::Float4
//! [`Color8888`]: texel_pipeline_common::color_8888::Color8888
//! [`CodecError::InvalidArgument`]: texel_pipeline_common::CodecError::InvalidArgument
#![warn(missing_docs)]

pub mod half_float;
pub mod shared_exponent;
pub mod small_float;
pub mod texel;

pub use texel::{
    decode_texel, decode_texels, encode_texel, encode_texels, from_float4, from_unorm8, to_float4,
    to_unorm8,
};
