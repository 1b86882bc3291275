#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod decode;
pub mod encode;

pub use decode::{decode_bc2_block, decode_bc2_block_from_slice};
pub use encode::{encode_bc2_block, encode_bc2_block_into_slice};

/// Size of a BC2 block in bytes.
pub const BC2_BLOCK_SIZE: usize = 16;
