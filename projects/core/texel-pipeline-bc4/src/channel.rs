//! The 8-byte interpolated channel block: two 8-bit endpoints followed by
//! sixteen 3-bit indices (48 bits, little-endian, row-major).

use texel_pipeline_common::{decoded_4x4_block::BLOCK_TEXELS, encoded_block::EncodedBlock};

/// Size of one channel block in bytes.
pub const CHANNEL_BLOCK_SIZE: usize = 8;

/// Builds the 8-entry ramp for endpoints `e0` and `e1`.
///
/// If `e0 > e1` all eight entries interpolate between the endpoints in 1/7
/// steps; otherwise entries 2-5 interpolate in 1/5 steps and entries 6 and 7
/// are exactly 0 and 255.
///
/// # Example
///
/// ```
/// use texel_pipeline_bc4::ramp;
///
/// assert_eq!(ramp(70, 0), [70, 0, 60, 50, 40, 30, 20, 10]);
/// assert_eq!(ramp(0, 50), [0, 50, 10, 20, 30, 40, 0, 255]);
/// ```
#[allow(clippy::identity_op)]
pub fn ramp(e0: u8, e1: u8) -> [u8; 8] {
    let (a0, a1) = (e0 as u16, e1 as u16);

    if e0 > e1 {
        [
            e0,
            e1,
            ((6 * a0 + 1 * a1) / 7) as u8, // bit code 010
            ((5 * a0 + 2 * a1) / 7) as u8, // bit code 011
            ((4 * a0 + 3 * a1) / 7) as u8, // bit code 100
            ((3 * a0 + 4 * a1) / 7) as u8, // bit code 101
            ((2 * a0 + 5 * a1) / 7) as u8, // bit code 110
            ((1 * a0 + 6 * a1) / 7) as u8, // bit code 111
        ]
    } else {
        [
            e0,
            e1,
            ((4 * a0 + 1 * a1) / 5) as u8,
            ((3 * a0 + 2 * a1) / 5) as u8,
            ((2 * a0 + 3 * a1) / 5) as u8,
            ((1 * a0 + 4 * a1) / 5) as u8,
            0,
            255,
        ]
    }
}

/// Decodes a channel block into 16 row-major values.
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
#[inline(always)]
pub unsafe fn decode_channel_block(src: *const u8) -> [u8; BLOCK_TEXELS] {
    let values = ramp(*src, *src.add(1));

    // 48 bits of indices.
    let mut index_bytes = [0u8; 8];
    core::ptr::copy_nonoverlapping(src.add(2), index_bytes.as_mut_ptr(), 6);
    let indices = u64::from_le_bytes(index_bytes);

    let mut result = [0u8; BLOCK_TEXELS];
    for (i, value) in result.iter_mut().enumerate() {
        let index = (indices >> (i * 3)) & 0b111;
        *value = *values.get_unchecked(index as usize);
    }
    result
}

/// Picks the nearest ramp entry for every value.
fn fit(values: &[u8; BLOCK_TEXELS], e0: u8, e1: u8) -> EncodedBlock<CHANNEL_BLOCK_SIZE> {
    let entries = ramp(e0, e1);
    let mut indices = 0u64;
    let mut error = 0u32;

    for (i, &value) in values.iter().enumerate() {
        let (best, distance) = entries
            .iter()
            .enumerate()
            .map(|(entry, &candidate)| (entry, value.abs_diff(candidate) as u32))
            .min_by_key(|&(_, distance)| distance)
            .unwrap_or((0, 0));
        indices |= (best as u64) << (i * 3);
        error += distance;
    }

    let mut bytes = [0u8; CHANNEL_BLOCK_SIZE];
    bytes[0] = e0;
    bytes[1] = e1;
    bytes[2..].copy_from_slice(&indices.to_le_bytes()[..6]);
    EncodedBlock { bytes, error }
}

/// Encodes 16 row-major values as a channel block.
///
/// Tries the 8-value ramp spanning the full range (`e0 = max > e1 = min`)
/// and the 6-value ramp spanning the values strictly between 0 and 255
/// (`e0 <= e1`, with 0 and 255 available exactly), and keeps whichever has the
/// lower sum of absolute errors.
///
/// # Example
///
/// ```
/// use texel_pipeline_bc4::{decode_channel_block, encode_channel_block};
///
/// let values = [0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255];
/// let encoded = encode_channel_block(&values);
/// assert_eq!(encoded.error, 0);
/// assert_eq!(unsafe { decode_channel_block(encoded.bytes.as_ptr()) }, values);
/// ```
pub fn encode_channel_block(values: &[u8; BLOCK_TEXELS]) -> EncodedBlock<CHANNEL_BLOCK_SIZE> {
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    if min == max {
        return fit(values, max, max);
    }

    let eight = fit(values, max, min);
    if eight.error == 0 {
        return eight;
    }

    let interior = values.iter().copied().filter(|&v| v != 0 && v != 255);
    let low = interior.clone().min();
    let high = interior.max();
    let six = match (low, high) {
        (Some(low), Some(high)) => fit(values, low, high),
        _ => fit(values, 0, 0),
    };

    if six.error < eight.error {
        six
    } else {
        eight
    }
}
