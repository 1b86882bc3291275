#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod channel;
pub mod decode;
pub mod encode;

pub use channel::{decode_channel_block, encode_channel_block, ramp, CHANNEL_BLOCK_SIZE};
pub use decode::{
    decode_bc4_block, decode_bc4_block_from_slice, decode_bc5_block, decode_bc5_block_from_slice,
};
pub use encode::{
    encode_bc4_block, encode_bc4_block_into_slice, encode_bc5_block, encode_bc5_block_into_slice,
};

/// Size of a BC4 block in bytes.
pub const BC4_BLOCK_SIZE: usize = CHANNEL_BLOCK_SIZE;

/// Size of a BC5 block in bytes.
pub const BC5_BLOCK_SIZE: usize = 2 * CHANNEL_BLOCK_SIZE;
