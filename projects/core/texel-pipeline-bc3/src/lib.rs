#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod decode;
pub mod encode;

pub use decode::{decode_bc3_block, decode_bc3_block_from_slice};
pub use encode::{encode_bc3_block, encode_bc3_block_into_slice};

/// Size of a BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;
