#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use decode::{decode_bc1_block, decode_bc1_block_from_slice, decode_color_block};
pub use encode::{encode_bc1_block, encode_bc1_block_into_slice, encode_color_block};
pub use settings::{Bc1AlphaMode, Bc1DecodeSettings, Bc1EncodeSettings};

/// Size of a BC1 block, and of the colour sub-block of BC2/BC3, in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;
