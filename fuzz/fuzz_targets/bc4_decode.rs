#![no_main]

// Compares the BC4 decoder against rgbcx's BC3 alpha path, which uses the same
// interpolated channel block.

use core::ffi::c_void;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;
use texel_pipeline_bc4::decode_bc4_block_from_slice;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc4Block {
    pub bytes: [u8; 8],
}

/// Decodes a channel block by placing it in the alpha half of a BC3 block.
pub fn reference_channel(channel: &[u8]) -> [u8; 16] {
    // White 4-colour endpoints with all-zero indices for the colour half.
    let mut bc3 = [0u8; 16];
    bc3[..8].copy_from_slice(channel);
    bc3[8..12].copy_from_slice(&[0xFF, 0xFF, 0x00, 0x00]);

    let mut rgba = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc3(
            bc3.as_ptr() as *const c_void,
            rgba.as_mut_ptr() as *mut c_void,
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }
    core::array::from_fn(|i| rgba[i * 4 + 3])
}

fuzz_target!(|block: Bc4Block| {
    let ours = decode_bc4_block_from_slice(&block.bytes).unwrap();
    let expected = reference_channel(&block.bytes);

    for (i, texel) in ours.pixels.iter().enumerate() {
        assert_eq!(texel.r, expected[i], "texel {i} of {:02X?}", block.bytes);
        assert_eq!((texel.g, texel.b, texel.a), (0, 0, 255));
    }
});
