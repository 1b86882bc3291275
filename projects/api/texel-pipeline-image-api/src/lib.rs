#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod handler;
pub mod image;
pub mod io;
pub mod registry;

#[cfg(feature = "file-io")]
mod file_io;

pub use builder::ReformatBuilder;
pub use error::{HandlerError, ImageError, ImageResult};
pub use handler::{ImageFileHandler, ImageHeader};
pub use image::{Image, MappedRead, MappedWrite};
pub use io::ImageIo;
pub use registry::{FileHandlerRegistry, HandlerId, MAX_FILE_HANDLERS};

// Types that appear in this crate's signatures.
pub use texel_pipeline_bc1::Bc1AlphaMode;
pub use texel_pipeline_common::{float4::Float4, CodecError, PixelFormat};
pub use texel_pipeline_resample::{AddressMode, AddressModes, BufferDesc, Transform};
