#![no_main]

// Compares the BC3 decoder against rgbcx, which decodes both halves.

use core::ffi::c_void;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;
use texel_pipeline_bc3::decode_bc3_block_from_slice;
use texel_pipeline_common::color_565::Color565;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc3Block {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: Bc3Block| {
    let c0 = Color565::from_raw(u16::from_le_bytes([block.bytes[8], block.bytes[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block.bytes[10], block.bytes[11]]));
    if !c0.greater_than(&c1) {
        return;
    }

    let ours = decode_bc3_block_from_slice(&block.bytes).unwrap();

    let mut rgba = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc3(
            block.bytes.as_ptr() as *const c_void,
            rgba.as_mut_ptr() as *mut c_void,
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }

    for (i, (texel, theirs)) in ours.pixels.iter().zip(rgba.chunks_exact(4)).enumerate() {
        assert_eq!(
            [texel.r, texel.g, texel.b, texel.a],
            theirs,
            "texel {i} of {:02X?}",
            block.bytes
        );
    }
});
