//! Random-access float reads from any buffer, compressed or not.

use crate::address::AddressModes;
use crate::buffer::BufferDesc;
use texel_pipeline_block::{decompress_block, BlockCodecSettings};
use texel_pipeline_common::{
    decoded_4x4_block::Decoded4x4Block, float4::Float4, CodecResult, FormatInfo,
};
use texel_pipeline_scalar::to_float4;

/// Decoded blocks kept by a [`TexelReader`].
///
/// A 2x box filter over a compressed source touches at most four blocks per
/// destination texel.
const CACHED_BLOCKS: usize = 4;

/// Reads texels as [`Float4`], resolving coordinates with the buffer's
/// address modes and decoding compressed blocks on demand.
///
/// Recently decoded blocks are cached, so one reader should serve a run of
/// neighbouring reads (e.g. a destination row).
pub struct TexelReader<'a> {
    desc: BufferDesc,
    info: FormatInfo,
    data: &'a [u8],
    modes: AddressModes,
    codec: BlockCodecSettings,
    cache: [Option<(usize, Decoded4x4Block<Float4>)>; CACHED_BLOCKS],
    next_slot: usize,
}

impl<'a> TexelReader<'a> {
    /// Creates a reader over `data`.
    ///
    /// # Errors
    ///
    /// Those of [`BufferDesc::check_buffer`].
    pub fn new(
        desc: &BufferDesc,
        data: &'a [u8],
        modes: AddressModes,
        codec: BlockCodecSettings,
    ) -> CodecResult<Self> {
        let info = desc.check_buffer(data.len())?;
        Ok(Self::new_unchecked(desc, info, data, modes, codec))
    }

    /// A reader over a buffer already validated with [`BufferDesc::check_buffer`].
    pub(crate) fn new_unchecked(
        desc: &BufferDesc,
        info: FormatInfo,
        data: &'a [u8],
        modes: AddressModes,
        codec: BlockCodecSettings,
    ) -> Self {
        Self {
            desc: *desc,
            info,
            data,
            modes,
            codec,
            cache: [None; CACHED_BLOCKS],
            next_slot: 0,
        }
    }

    /// The buffer layout being read.
    pub fn desc(&self) -> &BufferDesc {
        &self.desc
    }

    /// Reads the texel at `(x, y, z)`; out-of-range coordinates are resolved
    /// with the reader's address modes.
    ///
    /// # Errors
    ///
    /// Only if the underlying codec rejects the data, which cannot happen for
    /// a validated buffer.
    pub fn read(&mut self, x: i64, y: i64, z: i64) -> CodecResult<Float4> {
        let location = self
            .desc
            .locate_texel(&self.info, x, y, z, self.modes);
        match location.block_texel {
            None => to_float4(self.desc.format, &self.data[location.offset..]),
            Some(texel) => Ok(self.block(location.offset)?.pixels[texel]),
        }
    }

    fn block(&mut self, offset: usize) -> CodecResult<Decoded4x4Block<Float4>> {
        if let Some((_, block)) = self.cache.iter().flatten().find(|(at, _)| *at == offset) {
            return Ok(*block);
        }

        let block = decompress_block(self.desc.format, &self.data[offset..], &self.codec)?;
        self.cache[self.next_slot] = Some((offset, block));
        self.next_slot = (self.next_slot + 1) % CACHED_BLOCKS;
        Ok(block)
    }
}
