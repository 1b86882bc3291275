//! # Block Codec
//!
//! Compresses and decompresses BC1-BC5 blocks selected by [`PixelFormat`],
//! producing or consuming either sample kind ([`Color8888`] or [`Float4`]).
//!
//! - [`decompress_block`] / [`compress_block`]: one 4x4 block.
//! - [`decompress_blocks`] / [`compress_blocks`]: a whole 2D surface of blocks.
//!
//! ```
//! use texel_pipeline_block::{compress_block, decompress_block, BlockCodecSettings};
//! use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;
//! use texel_pipeline_common::float4::Float4;
//! use texel_pipeline_common::format::PixelFormat;
//!
//! let settings = BlockCodecSettings::default();
//! let block = Decoded4x4Block::new(Float4::new(1.0, 0.0, 0.0, 1.0));
//!
//! let mut bytes = [0u8; 8];
//! compress_block(PixelFormat::Bc1Unorm, &block, &mut bytes, &settings).unwrap();
//! let decoded: Decoded4x4Block<Float4> =
//!     decompress_block(PixelFormat::Bc1Unorm, &bytes, &settings).unwrap();
//! assert_eq!(decoded, block);
//! ```
//!
//! [`PixelFormat`]: texel_pipeline_common::PixelFormat
//! [`Color8888`]: texel_pipeline_common::color_8888::Color8888
//! [`Float4`]: texel_pipeline_common::float4::Float4
#![warn(missing_docs)]

pub mod dispatch;
pub mod settings;
pub mod surface;

pub use dispatch::{block_size, compress_block, decompress_block};
pub use settings::BlockCodecSettings;
pub use surface::{compress_blocks, decompress_blocks, BlockSurface};
