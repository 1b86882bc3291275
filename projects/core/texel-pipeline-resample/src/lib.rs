#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod address;
pub mod buffer;
pub mod pipeline;
pub mod reader;
pub mod transform;
pub mod weights;

pub use address::{resolve_coordinate, AddressMode, AddressModes};
pub use buffer::{BufferDesc, TexelLocation};
pub use pipeline::{check_conversion, reformat_buffer, sample_buffer, ReformatSettings};
pub use reader::TexelReader;
pub use transform::Transform;
pub use weights::{get_weights, Weights};
