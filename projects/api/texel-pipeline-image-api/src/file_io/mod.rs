//! File access using `lightweight-mmap`.

use crate::error::ImageResult;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;

/// Maps the file at `path` read-only and passes its bytes to `read`.
pub(crate) fn with_mapped_file<T>(
    path: &Path,
    read: impl FnOnce(&[u8]) -> ImageResult<T>,
) -> ImageResult<T> {
    let handle = ReadOnlyFileHandle::open(path)?;
    let size = handle.size()? as usize;
    if size == 0 {
        return read(&[]);
    }
    let mapping = ReadOnlyMmap::new(&handle, 0, size)?;
    read(mapping.as_slice())
}

/// Creates `path` with exactly `data` as its contents.
pub(crate) fn write_file(path: &Path, data: &[u8]) -> ImageResult<()> {
    let handle = ReadWriteFileHandle::create_preallocated(path, data.len() as i64)?;
    if data.is_empty() {
        return Ok(());
    }
    let mut mapping = ReadWriteMmap::new(&handle, 0, data.len())?;
    mapping.as_mut_slice().copy_from_slice(data);
    Ok(())
}
