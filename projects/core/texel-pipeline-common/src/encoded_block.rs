/// A compressed block produced by one of the block encoders, plus the error
/// the encoder measured against its input.
///
/// `error` is a sum of squared (colour) or absolute (single channel)
/// differences between the source texels and the block as it decodes. It is
/// only meaningful for comparing encodes of the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedBlock<const N: usize> {
    /// The block bytes, ready to be written to a surface.
    pub bytes: [u8; N],
    /// Residual error of the encode.
    pub error: u32,
}

impl<const N: usize> EncodedBlock<N> {
    /// Size of the block in bytes.
    pub const SIZE: usize = N;

    /// Copies the block into `dst`.
    ///
    /// # Panics
    ///
    /// If `dst` is shorter than `N` bytes.
    #[inline]
    pub fn write_to(&self, dst: &mut [u8]) {
        dst[..N].copy_from_slice(&self.bytes);
    }
}
