mod files;
mod throughput;

pub use files::*;
pub use throughput::*;
